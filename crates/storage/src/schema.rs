//! Declared table layout, checked against the database at startup

use crate::StorageError;
use sqlx::SqliteConnection;
use tracing::debug;

/// Expected layout of one table
#[derive(Debug, Clone, Copy)]
pub struct TableSchema {
    pub name: &'static str,
    pub columns: &'static [&'static str],
}

pub const STATION_TABLE: TableSchema = TableSchema {
    name: "station",
    columns: &["station", "name", "latitude", "longitude", "elevation"],
};

pub const MEASUREMENT_TABLE: TableSchema = TableSchema {
    name: "measurement",
    columns: &["station", "date", "prcp", "tobs"],
};

impl TableSchema {
    /// Check that the table exists and carries every declared column.
    ///
    /// Extra columns (such as an `id` primary key) are allowed.
    pub async fn validate(&self, conn: &mut SqliteConnection) -> Result<(), StorageError> {
        let present: Vec<(String,)> = sqlx::query_as("SELECT name FROM pragma_table_info(?)")
            .bind(self.name)
            .fetch_all(&mut *conn)
            .await?;

        if present.is_empty() {
            return Err(StorageError::MissingTable(self.name));
        }

        for column in self.columns {
            if !present.iter().any(|(name,)| name.eq_ignore_ascii_case(column)) {
                return Err(StorageError::MissingColumn {
                    table: self.name,
                    column,
                });
            }
        }

        debug!("Table `{}` matches declared schema", self.name);
        Ok(())
    }
}

/// Validate every table the service reads.
pub async fn validate_all(conn: &mut SqliteConnection) -> Result<(), StorageError> {
    STATION_TABLE.validate(conn).await?;
    MEASUREMENT_TABLE.validate(conn).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::Connection;

    async fn memory_conn() -> SqliteConnection {
        SqliteConnection::connect("sqlite::memory:").await.unwrap()
    }

    #[tokio::test]
    async fn test_missing_table() {
        let mut conn = memory_conn().await;

        let err = STATION_TABLE.validate(&mut conn).await.unwrap_err();
        assert!(matches!(err, StorageError::MissingTable("station")));
    }

    #[tokio::test]
    async fn test_missing_column() {
        let mut conn = memory_conn().await;
        sqlx::query("CREATE TABLE measurement (id INTEGER PRIMARY KEY, station TEXT, date TEXT, prcp FLOAT)")
            .execute(&mut conn)
            .await
            .unwrap();

        let err = MEASUREMENT_TABLE.validate(&mut conn).await.unwrap_err();
        assert!(matches!(
            err,
            StorageError::MissingColumn { table: "measurement", column: "tobs" }
        ));
        assert_eq!(err.to_string(), "Table `measurement` has no column `tobs`");
    }

    #[tokio::test]
    async fn test_extra_columns_allowed() {
        let mut conn = memory_conn().await;
        sqlx::query(
            "CREATE TABLE station (id INTEGER PRIMARY KEY, station TEXT, name TEXT, \
             latitude FLOAT, longitude FLOAT, elevation FLOAT)",
        )
        .execute(&mut conn)
        .await
        .unwrap();

        assert!(STATION_TABLE.validate(&mut conn).await.is_ok());
    }
}
