//! Storage Layer
//!
//! Read-only access to the climate observation database: station metadata
//! and daily measurement readings, queried through an SQLite pool.

mod repository;
mod schema;
mod window;

pub use repository::{MeasurementRecord, Store, StoreConfig, TemperatureSummary, ValueColumn};
pub use schema::{TableSchema, MEASUREMENT_TABLE, STATION_TABLE};
pub use window::{window_start, DATE_FORMAT, DEFAULT_WINDOW_DAYS};

use thiserror::Error;

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
    #[error("Table `{0}` is missing from the database")]
    MissingTable(&'static str),
    #[error("Table `{table}` has no column `{column}`")]
    MissingColumn {
        table: &'static str,
        column: &'static str,
    },
    #[error("Measurement table is empty")]
    EmptyDataset,
    #[error("Invalid date `{value}`: {source}")]
    InvalidDate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
    #[error("Window of {days} days before {latest} is out of range")]
    WindowOutOfRange { latest: String, days: i64 },
}
