//! # Query Execution
//!
//! Backend execution of built queries.
//!
//! ## Overview
//!
//! [`QueryExecutor`] is the seam between the specification layer and a
//! database. Implementations only have to provide [`execute`] and
//! [`iterate`]; the single-row and scalar contracts are derived from
//! `execute` by default methods, so every backend reports zero-row and
//! many-row outcomes the same way.
//!
//! Rows come back as `serde_json::Value`, shaped by the query's
//! [`HydrationMode`]:
//!
//! - `Entity`: one JSON object per row, keyed by column name
//! - `Array`: one JSON array per row, values in column order
//! - `Scalar`: the first column of each row, as a bare value
//!
//! ## PostgreSQL
//!
//! [`PgExecutor`] runs queries on a `sqlx` connection pool and decodes rows
//! by column type. Unsupported column types (for example `NUMERIC` without a
//! cast) surface as [`ExecutorError::Decode`] naming the column; cast such
//! columns in the select list.
//!
//! [`execute`]: QueryExecutor::execute
//! [`iterate`]: QueryExecutor::iterate

use async_trait::async_trait;
use futures::stream::BoxStream;
use serde_json::Value;
use thiserror::Error;

use crate::query_builder::{HydrationMode, Query};

/// Rows buffered between the database cursor and an [`iterate`] consumer.
///
/// [`iterate`]: QueryExecutor::iterate
const ITERATE_BUFFER_ROWS: usize = 64;

/// Failures raised by query executors.
#[derive(Error, Debug)]
pub enum ExecutorError {
    /// A single-result fetch matched zero rows.
    #[error("query returned no rows")]
    NoResult,

    /// A single-result fetch matched more than one row.
    #[error("query returned {count} rows where exactly one was expected")]
    NonUniqueResult { count: usize },

    /// A column value could not be decoded.
    #[error("failed to decode column '{column}': {message}")]
    Decode { column: String, message: String },

    /// The database rejected or aborted the query.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl ExecutorError {
    /// Create a decode error from any string-like inputs.
    pub fn decode(column: impl Into<String>, message: impl Into<String>) -> Self {
        ExecutorError::Decode {
            column: column.into(),
            message: message.into(),
        }
    }
}

/// Executes built queries against a backend.
///
/// `single_result`, `single_scalar_result` and `scalar_result` have default
/// implementations in terms of [`execute`](Self::execute); implementations
/// normally provide only `execute` and `iterate`.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Run the query and collect every row, shaped by the query's hydration
    /// mode.
    async fn execute(&self, query: &Query) -> Result<Vec<Value>, ExecutorError>;

    /// Run the query expecting exactly one row.
    async fn single_result(&self, query: &Query) -> Result<Value, ExecutorError> {
        let mut rows = self.execute(query).await?;
        match rows.len() {
            0 => Err(ExecutorError::NoResult),
            1 => Ok(rows.remove(0)),
            count => Err(ExecutorError::NonUniqueResult { count }),
        }
    }

    /// Run the query expecting exactly one row, returning its first column.
    async fn single_scalar_result(&self, query: &Query) -> Result<Value, ExecutorError> {
        let scalar_query = query.clone().with_hydration(HydrationMode::Scalar);
        self.single_result(&scalar_query).await
    }

    /// Run the query returning the first column of every row.
    async fn scalar_result(&self, query: &Query) -> Result<Vec<Value>, ExecutorError> {
        let scalar_query = query.clone().with_hydration(HydrationMode::Scalar);
        self.execute(&scalar_query).await
    }

    /// Run the query as a lazy stream of rows.
    ///
    /// Rows are produced on demand. Dropping the stream before exhaustion
    /// releases the underlying cursor.
    fn iterate(&self, query: Query) -> BoxStream<'static, Result<Value, ExecutorError>>;
}

/// Shape one row's ordered `(column, value)` pairs according to `mode`.
pub fn hydrate_columns(columns: Vec<(String, Value)>, mode: HydrationMode) -> Value {
    match mode {
        HydrationMode::Entity => Value::Object(columns.into_iter().collect()),
        HydrationMode::Array => {
            Value::Array(columns.into_iter().map(|(_, value)| value).collect())
        }
        HydrationMode::Scalar => columns
            .into_iter()
            .next()
            .map_or(Value::Null, |(_, value)| value),
    }
}

#[cfg(feature = "postgres")]
pub use postgres::PgExecutor;

#[cfg(feature = "postgres")]
mod postgres {
    use std::time::Duration;

    use futures::StreamExt;
    use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
    use sqlx::{Column, Row, TypeInfo};
    use tracing::debug;

    use super::*;
    use crate::config::DatabaseConfig;

    /// PostgreSQL executor backed by a `sqlx` connection pool.
    #[derive(Debug, Clone)]
    pub struct PgExecutor {
        pool: PgPool,
    }

    impl PgExecutor {
        pub fn new(pool: PgPool) -> Self {
            Self { pool }
        }

        /// Open a pool from configuration and wrap it.
        pub async fn connect(config: &DatabaseConfig) -> Result<Self, ExecutorError> {
            let pool = PgPoolOptions::new()
                .max_connections(config.pool.max_connections)
                .acquire_timeout(Duration::from_secs(config.pool.connect_timeout_seconds))
                .connect(&config.database_url())
                .await?;
            debug!(
                max_connections = config.pool.max_connections,
                "connected query executor pool"
            );
            Ok(Self { pool })
        }

        pub fn pool(&self) -> &PgPool {
            &self.pool
        }
    }

    #[async_trait]
    impl QueryExecutor for PgExecutor {
        async fn execute(&self, query: &Query) -> Result<Vec<Value>, ExecutorError> {
            let sql = query.to_sql();
            debug!(sql = %sql, "executing query");
            let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
            rows.iter()
                .map(|row| decode_row(row, query.hydration()))
                .collect()
        }

        fn iterate(&self, query: Query) -> BoxStream<'static, Result<Value, ExecutorError>> {
            let pool = self.pool.clone();
            let (tx, mut rx) = tokio::sync::mpsc::channel(ITERATE_BUFFER_ROWS);

            tokio::spawn(async move {
                let sql = query.to_sql();
                debug!(sql = %sql, "iterating query");
                let mut rows = sqlx::query(&sql).fetch(&pool);
                while let Some(fetched) = rows.next().await {
                    let item = fetched
                        .map_err(ExecutorError::from)
                        .and_then(|row| decode_row(&row, query.hydration()));
                    let failed = item.is_err();
                    if tx.send(item).await.is_err() {
                        // Consumer dropped the stream; closing here releases
                        // the cursor.
                        break;
                    }
                    if failed {
                        break;
                    }
                }
            });

            Box::pin(futures::stream::poll_fn(move |cx| rx.poll_recv(cx)))
        }
    }

    /// Decode one row into ordered `(column, value)` pairs and shape them.
    fn decode_row(row: &PgRow, mode: HydrationMode) -> Result<Value, ExecutorError> {
        let mut columns = Vec::with_capacity(row.columns().len());
        for (index, column) in row.columns().iter().enumerate() {
            let value = decode_column(row, index, column.type_info().name())
                .map_err(|error| ExecutorError::decode(column.name(), error.to_string()))?;
            columns.push((column.name().to_string(), value));
        }
        Ok(hydrate_columns(columns, mode))
    }

    /// Decode a single column by its PostgreSQL type name.
    fn decode_column(row: &PgRow, index: usize, type_name: &str) -> Result<Value, sqlx::Error> {
        let value = match type_name {
            "BOOL" => row.try_get::<Option<bool>, _>(index)?.map(Value::Bool),
            "INT2" => row
                .try_get::<Option<i16>, _>(index)?
                .map(|v| Value::from(i64::from(v))),
            "INT4" => row
                .try_get::<Option<i32>, _>(index)?
                .map(|v| Value::from(i64::from(v))),
            "INT8" => row.try_get::<Option<i64>, _>(index)?.map(Value::from),
            "FLOAT4" => row
                .try_get::<Option<f32>, _>(index)?
                .map(|v| float_value(f64::from(v))),
            "FLOAT8" => row.try_get::<Option<f64>, _>(index)?.map(float_value),
            "TEXT" | "VARCHAR" | "BPCHAR" | "NAME" | "CHAR" => row
                .try_get::<Option<String>, _>(index)?
                .map(Value::String),
            "UUID" => row
                .try_get::<Option<uuid::Uuid>, _>(index)?
                .map(|v| Value::String(v.to_string())),
            "TIMESTAMPTZ" => row
                .try_get::<Option<chrono::DateTime<chrono::Utc>>, _>(index)?
                .map(|v| Value::String(v.to_rfc3339())),
            "TIMESTAMP" => row
                .try_get::<Option<chrono::NaiveDateTime>, _>(index)?
                .map(|v| Value::String(v.format("%Y-%m-%dT%H:%M:%S%.f").to_string())),
            "DATE" => row
                .try_get::<Option<chrono::NaiveDate>, _>(index)?
                .map(|v| Value::String(v.to_string())),
            "JSON" | "JSONB" => row.try_get::<Option<Value>, _>(index)?,
            _ => row.try_get::<Option<String>, _>(index)?.map(Value::String),
        };
        Ok(value.unwrap_or(Value::Null))
    }

    fn float_value(value: f64) -> Value {
        serde_json::Number::from_f64(value).map_or(Value::Null, Value::Number)
    }
}
