//! Reader and writer services over a shared MySQL `data_table`.
//!
//! # Architecture Overview
//!
//! ```text
//!   browser / script                                     browser / script
//!         │ POST /update                                        │ GET / , /api/rows
//!         ▼                                                     ▼
//!   ┌───────────────┐                                   ┌───────────────┐
//!   │    writer     │                                   │    reader     │
//!   │ form → insert │                                   │ select → HTML │
//!   └──────┬────────┘                                   └──────┬────────┘
//!          │ retry + backoff          data_table               │
//!          └───────────────────────▶ (MySQL) ◀─────────────────┘
//!
//!   both: /metrics (Prometheus), /healthz, /readyz, x-request-id, tracing
//! ```
//!
//! The services never call each other; the table is the only shared state.

// Core subsystems
pub mod config;
pub mod http;
pub mod store;

// Services
pub mod reader;
pub mod writer;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;
pub mod resilience;

pub use config::ServiceConfig;
pub use http::{AppState, HttpServer, ServiceKind};
pub use lifecycle::Shutdown;
pub use store::{MySqlStore, Record, RecordStore};
