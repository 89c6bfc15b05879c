//! # Entity Repository
//!
//! Orchestration of specification evaluation and query execution.
//!
//! ## Overview
//!
//! [`EntityRepository`] owns a [`QueryExecutor`], a table name, and a default
//! alias. Every matching operation follows the same pipeline:
//!
//! 1. Create a [`QueryBuilder`] rooted at the table under the resolved alias.
//! 2. Apply the specification: structural mutations first, then the folded
//!    `WHERE` predicate (see [`apply_specification`]).
//! 3. Freeze the builder into a [`Query`] and apply the result modifier.
//! 4. Hand the query to the executor under one of six result contracts.
//!
//! ## Result contracts
//!
//! | Operation                    | Returns        | Zero rows        | Many rows              |
//! |------------------------------|----------------|------------------|------------------------|
//! | `match_all`                  | `Vec<T>`       | empty vec        | all rows               |
//! | `match_single_result`        | `T`            | `Error::NoResult`| `Error::NonUniqueResult` |
//! | `match_one_or_null_result`   | `Option<T>`    | `None`           | `Error::NonUniqueResult` |
//! | `match_single_scalar_result` | `T`            | `Error::NoResult`| `Error::NonUniqueResult` |
//! | `match_scalar_result`        | `Vec<T>`       | empty vec        | all first columns      |
//! | `iterate`                    | `Stream` of `T`| empty stream     | rows on demand         |
//!
//! Alias resolution is the same everywhere: an explicit per-call alias wins
//! over the instance default, and reading never mutates the stored default.

use futures::stream::{Stream, StreamExt};
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};
use crate::executor::{ExecutorError, QueryExecutor};
use crate::query_builder::{Query, QueryBuilder};
use crate::result::ResultModifier;
use crate::specification::Specification;

/// Root alias used when neither a per-call nor an instance alias is given.
pub const DEFAULT_ALIAS: &str = "e";

/// Apply a specification to a builder: structural mutations first, then the
/// folded predicate.
///
/// `None` is a valid specification and leaves the builder untouched. Running
/// modifiers before collecting predicates guarantees a join is in place
/// before any predicate that references its alias.
pub fn apply_specification(
    builder: &mut QueryBuilder,
    specification: Option<&Specification>,
    alias: &str,
) {
    let Some(specification) = specification else {
        return;
    };
    specification.modify(builder, alias);
    if let Some(predicate) = specification.filter(builder, alias) {
        builder.and_where(predicate);
    }
}

/// Repository over one table, generic in its executor.
pub struct EntityRepository<X: QueryExecutor> {
    executor: X,
    table: String,
    alias: RwLock<String>,
}

impl<X: QueryExecutor> EntityRepository<X> {
    /// Create a repository with the default alias `e`.
    pub fn new(executor: X, table: impl Into<String>) -> Self {
        Self {
            executor,
            table: table.into(),
            alias: RwLock::new(DEFAULT_ALIAS.to_string()),
        }
    }

    pub fn executor(&self) -> &X {
        &self.executor
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// The alias used when a call does not pass its own.
    pub fn default_alias(&self) -> String {
        self.alias.read().clone()
    }

    /// Replace the instance default alias for subsequent calls.
    pub fn set_default_alias(&self, alias: impl Into<String>) {
        *self.alias.write() = alias.into();
    }

    /// Build a query builder for this table with the specification applied.
    ///
    /// An explicit `alias` overrides the instance default for this call only.
    pub fn query_builder(
        &self,
        specification: Option<&Specification>,
        alias: Option<&str>,
    ) -> QueryBuilder {
        let resolved = alias.map_or_else(|| self.default_alias(), str::to_string);
        let mut builder = QueryBuilder::new(&self.table, &resolved);
        apply_specification(&mut builder, specification, &resolved);
        builder
    }

    /// Build the executable query, result modifier applied.
    pub fn query(
        &self,
        specification: Option<&Specification>,
        modifier: Option<&dyn ResultModifier>,
    ) -> Query {
        let mut query = self.query_builder(specification, None).build();
        if let Some(modifier) = modifier {
            modifier.modify(&mut query);
        }
        debug!(table = %self.table, sql = %query.to_sql(), "built specification query");
        query
    }

    /// Fetch every matching row. Zero matches is an empty vec, not an error.
    pub async fn match_all<T: DeserializeOwned>(
        &self,
        specification: Option<&Specification>,
        modifier: Option<&dyn ResultModifier>,
    ) -> Result<Vec<T>> {
        let query = self.query(specification, modifier);
        let rows = self.executor.execute(&query).await?;
        rows.into_iter().map(hydrate).collect()
    }

    /// Fetch exactly one row.
    pub async fn match_single_result<T: DeserializeOwned>(
        &self,
        specification: Option<&Specification>,
        modifier: Option<&dyn ResultModifier>,
    ) -> Result<T> {
        let query = self.query(specification, modifier);
        match self.executor.single_result(&query).await {
            Ok(row) => hydrate(row),
            Err(error) => Err(map_single_error(error)),
        }
    }

    /// Fetch at most one row, with zero matches recovered to `None`.
    pub async fn match_one_or_null_result<T: DeserializeOwned>(
        &self,
        specification: Option<&Specification>,
        modifier: Option<&dyn ResultModifier>,
    ) -> Result<Option<T>> {
        match self.match_single_result(specification, modifier).await {
            Ok(row) => Ok(Some(row)),
            Err(Error::NoResult { .. }) => Ok(None),
            Err(error) => Err(error),
        }
    }

    /// Fetch exactly one row and return its first column.
    pub async fn match_single_scalar_result<T: DeserializeOwned>(
        &self,
        specification: Option<&Specification>,
        modifier: Option<&dyn ResultModifier>,
    ) -> Result<T> {
        let query = self.query(specification, modifier);
        match self.executor.single_scalar_result(&query).await {
            Ok(value) => hydrate(value),
            Err(error) => Err(map_single_error(error)),
        }
    }

    /// Fetch the first column of every matching row.
    pub async fn match_scalar_result<T: DeserializeOwned>(
        &self,
        specification: Option<&Specification>,
        modifier: Option<&dyn ResultModifier>,
    ) -> Result<Vec<T>> {
        let query = self.query(specification, modifier);
        let values = self.executor.scalar_result(&query).await?;
        values.into_iter().map(hydrate).collect()
    }

    /// Fetch matching rows as a lazy stream.
    ///
    /// Rows are pulled from the backend on demand; dropping the stream stops
    /// production and releases backend resources.
    pub fn iterate<T>(
        &self,
        specification: Option<&Specification>,
        modifier: Option<&dyn ResultModifier>,
    ) -> impl Stream<Item = Result<T>> + Send + 'static
    where
        T: DeserializeOwned + Send + 'static,
    {
        let query = self.query(specification, modifier);
        self.executor
            .iterate(query)
            .map(|item| item.map_err(Error::from).and_then(hydrate))
    }
}

fn hydrate<T: DeserializeOwned>(row: Value) -> Result<T> {
    serde_json::from_value(row).map_err(Error::from)
}

/// Map executor zero/many-row signals onto the contract-level taxonomy.
fn map_single_error(error: ExecutorError) -> Error {
    match error {
        source @ ExecutorError::NoResult => Error::NoResult { source },
        source @ ExecutorError::NonUniqueResult { .. } => Error::NonUniqueResult { source },
        other => Error::Execution(other),
    }
}
