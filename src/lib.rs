#![allow(clippy::doc_markdown)] // Allow technical terms like PostgreSQL, SQLx in docs
#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # QuerySpec
//!
//! Composable query specifications over PostgreSQL.
//!
//! ## Overview
//!
//! QuerySpec separates *what to match* from *how to fetch it*. Match criteria
//! live in small, reusable [`Specification`] values built from filters (which
//! contribute `WHERE` predicates) and query modifiers (which add joins,
//! orderings, groupings, and windows). An [`EntityRepository`] evaluates a
//! specification against a fresh query builder and runs the result through a
//! [`QueryExecutor`] under one of six result contracts, from "give me
//! everything" to "exactly one scalar" to a lazy row stream.
//!
//! ## Key Features
//!
//! - **Closed combinator algebra**: `and` / `or` / `not` / alias substitution
//!   compose arbitrarily, and a specification that contributes nothing simply
//!   vanishes instead of emitting vacuous SQL
//! - **Capability by construction**: whether a node filters or mutates query
//!   structure is fixed by its type; there is no runtime capability check
//! - **Contract-level errors**: zero-row and many-row outcomes surface as a
//!   stable taxonomy with the backend cause preserved as `source`
//! - **Lazy iteration**: streamed rows with backend cursor release when the
//!   consumer drops the stream
//!
//! ## Module Organization
//!
//! - [`specification`] - Filters, query modifiers, combinators, and the DSL
//! - [`query_builder`] - Alias-rooted SQL generation
//! - [`result`] - Result modifiers applied to built queries
//! - [`executor`] - Execution backends and row hydration
//! - [`repository`] - The entity repository and its result contracts
//! - [`error`] - Structured error handling
//! - [`config`] - Configuration management
//! - [`logging`] - Tracing setup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use queryspec::repository::EntityRepository;
//! use queryspec::specification::dsl::{eq, is_null, order_by_desc};
//! use queryspec::{PgExecutor, QuerySpecConfig};
//! use serde::Deserialize;
//!
//! #[derive(Debug, Deserialize)]
//! struct User {
//!     id: i64,
//!     name: String,
//! }
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = QuerySpecConfig::load()?;
//! let executor = PgExecutor::connect(&config.database).await?;
//! let users = EntityRepository::new(executor, "users");
//!
//! let active = eq("status", "active")
//!     .and(is_null("deleted_at"))
//!     .and(order_by_desc("created_at"));
//!
//! let rows: Vec<User> = users.match_all(Some(&active), None).await?;
//! println!("{} active users", rows.len());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod executor;
pub mod logging;
pub mod query_builder;
pub mod repository;
pub mod result;
pub mod specification;

pub use config::{ConfigurationError, DatabaseConfig, PoolConfig, QuerySpecConfig};
pub use error::{Error, Result};
#[cfg(feature = "postgres")]
pub use executor::PgExecutor;
pub use executor::{ExecutorError, QueryExecutor};
pub use query_builder::{
    ComparisonOperator, HydrationMode, Predicate, Query, QueryBuilder, SortDirection,
};
pub use repository::{apply_specification, EntityRepository, DEFAULT_ALIAS};
pub use result::{AsArray, AsScalar, MaxResults, ResultModifier, ResultModifierCollection};
pub use specification::{Filter, IntoSqlValue, QueryModifier, Specification};
