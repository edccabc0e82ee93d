//! Store Implementation

use crate::schema;
use crate::window::window_start;
use crate::StorageError;
use serde::{Deserialize, Serialize};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use tracing::{debug, info};

/// Database connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// SQLite URL, e.g. `sqlite://Resources/hawaii.sqlite`
    pub url: String,
    /// Upper bound on concurrently open read sessions
    pub max_connections: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://Resources/hawaii.sqlite".to_string(),
            max_connections: 4,
        }
    }
}

/// Measurement column projected next to the date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueColumn {
    /// `prcp`, nullable
    Precipitation,
    /// `tobs`
    Temperature,
}

impl ValueColumn {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Precipitation => "prcp",
            Self::Temperature => "tobs",
        }
    }
}

/// One projected measurement row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementRecord {
    pub date: String,
    pub value: Option<f64>,
}

/// Result of a min/avg/max temperature aggregate.
///
/// An SQL aggregate without `GROUP BY` always yields one row, whose values
/// are NULL when nothing matched. Both shapes stay distinguishable here.
#[derive(Debug, Clone, PartialEq)]
pub enum TemperatureSummary {
    /// At least one observation matched
    Found {
        min: f64,
        average: f64,
        max: f64,
        observations: i64,
    },
    /// The aggregate row exists but its minimum is NULL
    NullMinimum,
    /// The query returned no row at all
    NoRow,
}

/// Read-only handle on the climate database
///
/// Cheap to clone; every query checks out its own connection from the pool
/// and returns it when the call completes.
#[derive(Debug, Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    /// Open the database read-only and validate its schema
    pub async fn open(config: &StoreConfig) -> Result<Self, StorageError> {
        info!("Opening climate database at {}", config.url);

        let options = SqliteConnectOptions::from_str(&config.url)?
            .read_only(true)
            .create_if_missing(false);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections.max(1))
            .connect_with(options)
            .await?;

        Self::from_pool(pool).await
    }

    /// Wrap an existing pool, validating the schema first
    pub async fn from_pool(pool: SqlitePool) -> Result<Self, StorageError> {
        {
            let mut conn = pool.acquire().await?;
            schema::validate_all(&mut conn).await?;
        }
        info!("Climate database schema validated");
        Ok(Self { pool })
    }

    /// Most recent measurement date, if the table has any rows
    pub async fn latest_measurement_date(&self) -> Result<Option<String>, StorageError> {
        let mut conn = self.pool.acquire().await?;

        let row: Option<(Option<String>,)> =
            sqlx::query_as("SELECT date FROM measurement ORDER BY date DESC LIMIT 1")
                .fetch_optional(&mut *conn)
                .await?;

        Ok(row.and_then(|(date,)| date))
    }

    /// Exclusive start of the trailing window ending at the latest measurement
    pub async fn trailing_window_start(&self, days: i64) -> Result<String, StorageError> {
        let latest = self
            .latest_measurement_date()
            .await?
            .ok_or(StorageError::EmptyDataset)?;

        let start = window_start(&latest, days)?;
        debug!("Trailing {}-day window: ({}, {}]", days, start, latest);
        Ok(start)
    }

    /// Measurements strictly after `after`, ordered by date ascending.
    ///
    /// Rows sharing a date keep their insertion order.
    pub async fn measurements_after(
        &self,
        after: &str,
        station: Option<&str>,
        column: ValueColumn,
    ) -> Result<Vec<MeasurementRecord>, StorageError> {
        let mut sql = format!(
            "SELECT date, CAST({} AS REAL) FROM measurement WHERE date > ?",
            column.as_str()
        );
        if station.is_some() {
            sql.push_str(" AND station = ?");
        }
        sql.push_str(" ORDER BY date ASC, rowid ASC");

        let mut query = sqlx::query_as::<_, (String, Option<f64>)>(&sql).bind(after);
        if let Some(station) = station {
            query = query.bind(station);
        }

        let mut conn = self.pool.acquire().await?;
        let rows = query.fetch_all(&mut *conn).await?;
        debug!(
            "Fetched {} {} rows after {} (station: {:?})",
            rows.len(),
            column.as_str(),
            after,
            station
        );

        Ok(rows
            .into_iter()
            .map(|(date, value)| MeasurementRecord { date, value })
            .collect())
    }

    /// All station identifiers, ascending
    pub async fn station_ids(&self) -> Result<Vec<String>, StorageError> {
        let mut conn = self.pool.acquire().await?;

        let rows: Vec<(String,)> =
            sqlx::query_as("SELECT station FROM station ORDER BY station ASC")
                .fetch_all(&mut *conn)
                .await?;

        Ok(rows.into_iter().map(|(station,)| station).collect())
    }

    /// Min, average and max temperature for `start <= date <= end`.
    ///
    /// Dates compare as strings, so malformed bounds simply match nothing.
    pub async fn temperature_summary(
        &self,
        start: &str,
        end: &str,
    ) -> Result<TemperatureSummary, StorageError> {
        let mut conn = self.pool.acquire().await?;

        let row: Option<(Option<f64>, Option<f64>, Option<f64>, i64)> = sqlx::query_as(
            "SELECT CAST(MIN(tobs) AS REAL), CAST(AVG(tobs) AS REAL), CAST(MAX(tobs) AS REAL), \
             COUNT(tobs) FROM measurement WHERE date >= ? AND date <= ?",
        )
        .bind(start)
        .bind(end)
        .fetch_optional(&mut *conn)
        .await?;

        let summary = match row {
            None => TemperatureSummary::NoRow,
            Some((Some(min), Some(average), Some(max), observations)) => TemperatureSummary::Found {
                min,
                average,
                max,
                observations,
            },
            Some(_) => TemperatureSummary::NullMinimum,
        };
        debug!("Temperature summary {}..={}: {:?}", start, end, summary);

        Ok(summary)
    }
}
