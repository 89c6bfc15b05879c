//! # Query Artifact
//!
//! The finished product of [`QueryBuilder::build`](super::QueryBuilder::build):
//! a rendered statement body plus the execution-time knobs that result
//! modifiers are allowed to touch (hydration mode, result window, row cap).
//!
//! Structure is frozen at this point. Filters and query modifiers act on the
//! builder; result modifiers act here.

use super::pagination::Pagination;

/// How the executor shapes each fetched row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HydrationMode {
    /// One JSON object per row, keyed by column name.
    #[default]
    Entity,
    /// One JSON array per row, values in column order.
    Array,
    /// The first column of each row, as a bare value.
    Scalar,
}

/// A fully built query, ready to hand to a `QueryExecutor`.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    body: String,
    pagination: Pagination,
    hydration: HydrationMode,
    max_results: Option<u32>,
}

impl Query {
    pub(crate) fn new(body: String, pagination: Pagination) -> Self {
        Self {
            body,
            pagination,
            hydration: HydrationMode::default(),
            max_results: None,
        }
    }

    pub fn hydration(&self) -> HydrationMode {
        self.hydration
    }

    /// Change how rows are shaped. A later call wins.
    pub fn set_hydration(&mut self, mode: HydrationMode) {
        self.hydration = mode;
    }

    /// Consuming form of [`set_hydration`](Self::set_hydration).
    pub fn with_hydration(mut self, mode: HydrationMode) -> Self {
        self.hydration = mode;
        self
    }

    pub fn max_results(&self) -> Option<u32> {
        self.max_results
    }

    /// Cap the number of returned rows, overriding any builder-level `LIMIT`.
    pub fn set_max_results(&mut self, count: u32) {
        self.max_results = Some(count);
    }

    /// Render the final SQL statement.
    pub fn to_sql(&self) -> String {
        let mut window = self.pagination;
        if let Some(count) = self.max_results {
            window.set_limit(count);
        }
        format!("{}{}", self.body, window.to_sql())
    }
}
