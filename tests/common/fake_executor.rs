//! Scripted executor for driving repository contracts without a database.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use futures::stream::BoxStream;
use futures::StreamExt;
use parking_lot::Mutex;
use serde_json::{json, Value};

use queryspec::executor::{hydrate_columns, ExecutorError, QueryExecutor};
use queryspec::query_builder::Query;

/// Executor that replays canned rows and records what it was asked to run.
///
/// Rows are stored as ordered `(column, value)` pairs and shaped per request
/// by the query's hydration mode, mirroring how the real backend decodes
/// before shaping. The pull counter increments once per row the iterate
/// stream actually yields, which is what lets tests observe laziness.
#[derive(Debug, Default)]
pub struct FakeExecutor {
    rows: Vec<Vec<(String, Value)>>,
    fail: bool,
    executed: Mutex<Vec<String>>,
    pulls: Arc<AtomicUsize>,
}

impl FakeExecutor {
    pub fn with_rows(rows: Vec<Vec<(String, Value)>>) -> Self {
        Self {
            rows,
            ..Self::default()
        }
    }

    /// Executor whose every call fails with a database error.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Every SQL statement this executor has been handed, in order.
    pub fn executed_sql(&self) -> Vec<String> {
        self.executed.lock().clone()
    }

    /// Rows yielded through `iterate` so far.
    pub fn pulls(&self) -> usize {
        self.pulls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl QueryExecutor for FakeExecutor {
    async fn execute(&self, query: &Query) -> Result<Vec<Value>, ExecutorError> {
        self.executed.lock().push(query.to_sql());
        if self.fail {
            return Err(ExecutorError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(self
            .rows
            .iter()
            .cloned()
            .map(|columns| hydrate_columns(columns, query.hydration()))
            .collect())
    }

    fn iterate(&self, query: Query) -> BoxStream<'static, Result<Value, ExecutorError>> {
        self.executed.lock().push(query.to_sql());
        if self.fail {
            return Box::pin(futures::stream::once(async {
                Err(ExecutorError::Database(sqlx::Error::PoolTimedOut))
            }));
        }
        let mode = query.hydration();
        let pulls = Arc::clone(&self.pulls);
        Box::pin(futures::stream::iter(self.rows.clone()).map(move |columns| {
            pulls.fetch_add(1, Ordering::SeqCst);
            Ok(hydrate_columns(columns, mode))
        }))
    }
}

/// Ordered columns for a user row.
pub fn user_row(id: i64, name: &str, status: &str) -> Vec<(String, Value)> {
    vec![
        ("id".to_string(), json!(id)),
        ("name".to_string(), json!(name)),
        ("status".to_string(), json!(status)),
    ]
}

/// Single-column row, as a count query would produce.
pub fn count_row(count: i64) -> Vec<(String, Value)> {
    vec![("count".to_string(), json!(count))]
}
