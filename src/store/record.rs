//! The `data_table` row type.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Longest `data` value the column accepts.
pub const MAX_DATA_LEN: usize = 255;

/// One row of `data_table`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Record {
    pub id: i64,
    pub data: String,
    #[serde(with = "timestamp")]
    pub created_at: NaiveDateTime,
}

/// `created_at` as `YYYY-MM-DD HH:MM:SS`, the way MySQL prints a DATETIME.
pub mod timestamp {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}
