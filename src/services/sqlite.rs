use serde_json::{Map, Number, Value};
use sqlx::pool::PoolConnection;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Column, Row, Sqlite, SqliteConnection, SqlitePool, TypeInfo, ValueRef};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use crate::config::DatabaseSettings;
use crate::models::LocationRecord;

/// Errors that can occur when reading the food truck database
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),
}

const DISTANCE_COLUMN: &str = "distance";

/// Read-only access to the `food_trucks` table
///
/// Handlers acquire one pooled connection per request and hand it to
/// [`fetch_all_records`]; the connection goes back to the pool when dropped.
#[derive(Debug, Clone)]
pub struct TruckStore {
    pool: SqlitePool,
}

impl TruckStore {
    /// Open a connection pool to a SQLite database
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
        read_only: bool,
    ) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(database_url)?.read_only(read_only);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .test_before_acquire(true)
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    /// Open a connection pool from settings, running migrations if enabled
    pub async fn from_settings(settings: &DatabaseSettings) -> Result<Self, StoreError> {
        tracing::info!("Opening food truck database at {}", settings.url);

        // Migrations need a writable connection
        let read_only = settings.read_only && !settings.run_migrations;

        let store = Self::new(
            &settings.url,
            settings.max_connections.unwrap_or(5),
            settings.min_connections.unwrap_or(1),
            Duration::from_secs(settings.acquire_timeout_secs.unwrap_or(5)),
            read_only,
        )
        .await?;

        if settings.run_migrations {
            store.run_migrations().await?;
        }

        Ok(store)
    }

    /// Wrap an existing pool
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create the `food_trucks` table if it does not exist yet
    pub async fn run_migrations(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        tracing::info!("Database migrations applied");
        Ok(())
    }

    /// Acquire a connection scoped to the current request
    pub async fn acquire(&self) -> Result<PoolConnection<Sqlite>, StoreError> {
        Ok(self.pool.acquire().await?)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, StoreError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

/// Read every food truck, unfiltered and unordered
pub async fn fetch_all_records(conn: &mut SqliteConnection) -> Result<Vec<LocationRecord>, StoreError> {
    let rows = sqlx::query("SELECT * FROM food_trucks")
        .fetch_all(&mut *conn)
        .await?;

    let records = rows
        .iter()
        .map(decode_record)
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!("Fetched {} food truck records", records.len());

    Ok(records)
}

/// Turn a row into a record
///
/// `id`, `latitude` and `longitude` are interpreted; every other column is
/// passed through as a JSON value.
fn decode_record(row: &SqliteRow) -> Result<LocationRecord, StoreError> {
    let mut id = None;
    let mut latitude = None;
    let mut longitude = None;
    let mut attributes = Map::new();

    for column in row.columns() {
        let value = decode_value(row, column.ordinal(), column.name())?;
        match column.name() {
            "id" => id = decode_id(&value),
            "latitude" => latitude = decode_coordinate(&value),
            "longitude" => longitude = decode_coordinate(&value),
            // Reserved for the computed distance in responses
            DISTANCE_COLUMN => {
                tracing::debug!("Ignoring source column '{}'", DISTANCE_COLUMN);
            }
            name => {
                attributes.insert(name.to_string(), value);
            }
        }
    }

    let id = id.ok_or_else(|| StoreError::InvalidRecord("row has no integer id".to_string()))?;

    if latitude.is_some() != longitude.is_some() {
        tracing::warn!("Food truck {} has only one coordinate, treating it as unlocated", id);
    }

    Ok(LocationRecord {
        id,
        latitude,
        longitude,
        attributes,
    })
}

fn decode_value(row: &SqliteRow, index: usize, name: &str) -> Result<Value, StoreError> {
    let (is_null, type_name) = {
        let raw = row.try_get_raw(index)?;
        (raw.is_null(), raw.type_info().name().to_string())
    };

    if is_null {
        return Ok(Value::Null);
    }

    let value = match type_name.as_str() {
        "INTEGER" => Value::from(row.try_get_unchecked::<i64, _>(index)?),
        "REAL" => Number::from_f64(row.try_get_unchecked::<f64, _>(index)?)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        "BLOB" => {
            tracing::debug!("Column '{}' holds binary data, passing it through as null", name);
            Value::Null
        }
        _ => Value::String(row.try_get_unchecked::<String, _>(index)?),
    };

    Ok(value)
}

fn decode_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Coordinates may be stored as numbers or numeric text; blanks are missing
fn decode_coordinate(value: &Value) -> Option<f64> {
    let coordinate = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;

    coordinate.is_finite().then_some(coordinate)
}
