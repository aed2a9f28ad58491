//! Record storage subsystem.
//!
//! # Data Flow
//! ```text
//! writer handler ──insert──▶ RecordStore ──▶ data_table (MySQL)
//! reader handler ──list────▶ RecordStore ◀──┘
//! ```
//!
//! # Design Decisions
//! - One bounded pool per process, shared by all requests
//! - The writer creates the table lazily; the reader treats a missing table as empty
//! - Handlers depend on the `RecordStore` trait, not on MySQL

pub mod error;
pub mod mysql;
pub mod record;

use async_trait::async_trait;

pub use error::{StoreError, StoreResult};
pub use mysql::MySqlStore;
pub use record::{Record, MAX_DATA_LEN};

/// Access to `data_table`.
#[async_trait]
pub trait RecordStore: Send + Sync + 'static {
    /// Create `data_table` if absent. Existing rows are untouched.
    async fn ensure_table(&self) -> StoreResult<()>;

    /// Ensure the table, insert one row and commit. Returns the new id.
    async fn insert(&self, data: &str) -> StoreResult<i64>;

    /// All rows, highest id first.
    async fn list_newest_first(&self) -> StoreResult<Vec<Record>>;

    /// Cheap connectivity probe.
    async fn ping(&self) -> StoreResult<()>;
}
