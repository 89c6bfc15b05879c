//! Free-function shorthand for building specifications.
//!
//! Each function wraps a leaf into a [`Specification`], so composition reads
//! as a single expression:
//!
//! ```rust
//! use queryspec::specification::dsl::{eq, gt_eq, limit, not, order_by_desc};
//!
//! let spec = eq("status", "active")
//!     .and(not(gt_eq("age", 65)))
//!     .and(order_by_desc("created_at"))
//!     .and(limit(20));
//! ```

use super::filter::{Comparison, In, IsNull, Like};
use super::modifier::{
    GroupBy, Having, InnerJoin, LeftJoin, Limit, Offset, OrderBy, Select,
};
use super::value::IntoSqlValue;
use super::{Filter, Specification};
use crate::error::Result;

pub fn eq(field: impl Into<String>, value: impl IntoSqlValue) -> Specification {
    Specification::from_filter(Comparison::eq(field, value))
}

pub fn not_eq(field: impl Into<String>, value: impl IntoSqlValue) -> Specification {
    Specification::from_filter(Comparison::not_eq(field, value))
}

pub fn lt(field: impl Into<String>, value: impl IntoSqlValue) -> Specification {
    Specification::from_filter(Comparison::lt(field, value))
}

pub fn lt_eq(field: impl Into<String>, value: impl IntoSqlValue) -> Specification {
    Specification::from_filter(Comparison::lt_eq(field, value))
}

pub fn gt(field: impl Into<String>, value: impl IntoSqlValue) -> Specification {
    Specification::from_filter(Comparison::gt(field, value))
}

pub fn gt_eq(field: impl Into<String>, value: impl IntoSqlValue) -> Specification {
    Specification::from_filter(Comparison::gt_eq(field, value))
}

pub fn like_contains(field: impl Into<String>, needle: impl Into<String>) -> Specification {
    Specification::from_filter(Like::contains(field, needle))
}

pub fn like_starts_with(field: impl Into<String>, needle: impl Into<String>) -> Specification {
    Specification::from_filter(Like::starts_with(field, needle))
}

pub fn like_ends_with(field: impl Into<String>, needle: impl Into<String>) -> Specification {
    Specification::from_filter(Like::ends_with(field, needle))
}

/// Membership test. Fails on an empty value set.
pub fn in_values<V: IntoSqlValue>(
    field: impl Into<String>,
    values: impl IntoIterator<Item = V>,
) -> Result<Specification> {
    Ok(Specification::from_filter(In::new(field, values)?))
}

pub fn is_null(field: impl Into<String>) -> Specification {
    Specification::from_filter(IsNull::new(field))
}

/// Negate a specification's predicate.
pub fn not(spec: Specification) -> Specification {
    spec.not()
}

/// Conjunction over any number of children.
pub fn all_of(children: Vec<Specification>) -> Specification {
    Specification::all_of(children)
}

/// Disjunction over any number of children.
pub fn any_of(children: Vec<Specification>) -> Specification {
    Specification::any_of(children)
}

/// Replace the select list. Fails on an empty field list.
pub fn select<F: Into<String>>(fields: impl IntoIterator<Item = F>) -> Result<Specification> {
    Ok(Specification::from_modifier(Select::new(fields)?))
}

pub fn order_by_asc(field: impl Into<String>) -> Specification {
    Specification::from_modifier(OrderBy::asc(field))
}

pub fn order_by_desc(field: impl Into<String>) -> Specification {
    Specification::from_modifier(OrderBy::desc(field))
}

pub fn group_by(field: impl Into<String>) -> Specification {
    Specification::from_modifier(GroupBy::new(field))
}

/// Attach a filter's predicate to the `HAVING` clause.
pub fn having(filter: impl Filter + 'static) -> Specification {
    Specification::from_modifier(Having::filter(filter))
}

/// Attach a raw expression to the `HAVING` clause. Fails on a blank
/// expression.
pub fn having_expression(expression: impl Into<String>) -> Result<Specification> {
    Ok(Specification::from_modifier(Having::expression(expression)?))
}

pub fn inner_join(
    table: impl Into<String>,
    join_alias: impl Into<String>,
    parent_key: impl Into<String>,
    join_key: impl Into<String>,
) -> Specification {
    Specification::from_modifier(InnerJoin::new(table, join_alias, parent_key, join_key))
}

pub fn left_join(
    table: impl Into<String>,
    join_alias: impl Into<String>,
    parent_key: impl Into<String>,
    join_key: impl Into<String>,
) -> Specification {
    Specification::from_modifier(LeftJoin::new(table, join_alias, parent_key, join_key))
}

pub fn limit(count: u32) -> Specification {
    Specification::from_modifier(Limit::new(count))
}

pub fn offset(start: u32) -> Specification {
    Specification::from_modifier(Offset::new(start))
}
