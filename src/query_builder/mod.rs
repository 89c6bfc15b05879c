//! # Query Builder System
//!
//! Alias-rooted SQL generation for the specification layer.
//!
//! ## Overview
//!
//! This module is the mutable middle layer between specifications and the
//! executor. Specifications never concatenate SQL themselves; they mutate a
//! [`QueryBuilder`] (query modifiers) or hand it a [`Predicate`] (filters),
//! and the builder renders the statement with a fixed clause ordering:
//! `SELECT`, `FROM`, `JOIN`s, `WHERE`, `GROUP BY`, `HAVING`, `ORDER BY`,
//! `LIMIT`/`OFFSET`.
//!
//! ## Key Components
//!
//! - [`builder`] - Core query builder with SQL generation
//! - [`predicate`] - WHERE/HAVING predicate trees
//! - [`joins`] - JOIN clause management
//! - [`pagination`] - LIMIT/OFFSET windows
//! - [`query`] - Frozen query artifact handed to executors
//!
//! ## Example Usage
//!
//! ```rust
//! use queryspec::query_builder::{ComparisonOperator, Predicate, QueryBuilder};
//!
//! let mut qb = QueryBuilder::new("users", "e");
//! qb.and_where(Predicate::Comparison {
//!     field: "e.status".to_string(),
//!     operator: ComparisonOperator::Eq,
//!     value: serde_json::json!("active"),
//! });
//! assert_eq!(qb.build_sql(), "SELECT e.* FROM users e WHERE e.status = 'active'");
//! ```

pub mod builder;
pub mod joins;
pub mod pagination;
pub mod predicate;
pub mod query;

pub use builder::{QueryBuilder, SortDirection};
pub use joins::{Join, JoinType};
pub use pagination::Pagination;
pub use predicate::{ComparisonOperator, Predicate};
pub use query::{HydrationMode, Query};
