//! # Filter Leaves
//!
//! Condition factories that contribute `WHERE` predicates.
//!
//! A [`Filter`] is asked for its predicate against a read-only view of the
//! builder and the alias currently in effect. Returning `None` means the
//! filter contributes nothing to this query; combinators treat such children
//! as absent rather than as a boolean literal.
//!
//! Field names are qualified with the alias at evaluation time, so the same
//! filter value can be reused under different aliases.

use std::fmt;

use serde_json::Value;

use super::{qualify, value::IntoSqlValue};
use crate::error::{Error, Result};
use crate::query_builder::{ComparisonOperator, Predicate, QueryBuilder};

/// A specification leaf that can contribute a `WHERE` predicate.
///
/// Implementations must not mutate query structure; the shared borrow makes
/// that impossible to express.
pub trait Filter: fmt::Debug + Send + Sync {
    /// Produce the predicate for this filter, or `None` to contribute nothing.
    fn filter(&self, builder: &QueryBuilder, alias: &str) -> Option<Predicate>;
}

/// Binary comparison against a single field.
#[derive(Debug, Clone)]
pub struct Comparison {
    field: String,
    operator: ComparisonOperator,
    value: Value,
}

impl Comparison {
    pub fn new(
        operator: ComparisonOperator,
        field: impl Into<String>,
        value: impl IntoSqlValue,
    ) -> Self {
        Self {
            field: field.into(),
            operator,
            value: value.into_sql_value(),
        }
    }

    pub fn eq(field: impl Into<String>, value: impl IntoSqlValue) -> Self {
        Self::new(ComparisonOperator::Eq, field, value)
    }

    pub fn not_eq(field: impl Into<String>, value: impl IntoSqlValue) -> Self {
        Self::new(ComparisonOperator::NotEq, field, value)
    }

    pub fn lt(field: impl Into<String>, value: impl IntoSqlValue) -> Self {
        Self::new(ComparisonOperator::Lt, field, value)
    }

    pub fn lt_eq(field: impl Into<String>, value: impl IntoSqlValue) -> Self {
        Self::new(ComparisonOperator::LtEq, field, value)
    }

    pub fn gt(field: impl Into<String>, value: impl IntoSqlValue) -> Self {
        Self::new(ComparisonOperator::Gt, field, value)
    }

    pub fn gt_eq(field: impl Into<String>, value: impl IntoSqlValue) -> Self {
        Self::new(ComparisonOperator::GtEq, field, value)
    }
}

impl Filter for Comparison {
    fn filter(&self, _builder: &QueryBuilder, alias: &str) -> Option<Predicate> {
        Some(Predicate::Comparison {
            field: qualify(alias, &self.field),
            operator: self.operator,
            value: self.value.clone(),
        })
    }
}

/// Where in the column value the `LIKE` needle must sit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    Contains,
    StartsWith,
    EndsWith,
}

/// Pattern match against a text field. The needle is wrapped in `%` wildcards
/// according to [`MatchMode`].
#[derive(Debug, Clone)]
pub struct Like {
    field: String,
    needle: String,
    mode: MatchMode,
}

impl Like {
    pub fn new(mode: MatchMode, field: impl Into<String>, needle: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            needle: needle.into(),
            mode,
        }
    }

    pub fn contains(field: impl Into<String>, needle: impl Into<String>) -> Self {
        Self::new(MatchMode::Contains, field, needle)
    }

    pub fn starts_with(field: impl Into<String>, needle: impl Into<String>) -> Self {
        Self::new(MatchMode::StartsWith, field, needle)
    }

    pub fn ends_with(field: impl Into<String>, needle: impl Into<String>) -> Self {
        Self::new(MatchMode::EndsWith, field, needle)
    }
}

impl Filter for Like {
    fn filter(&self, _builder: &QueryBuilder, alias: &str) -> Option<Predicate> {
        let pattern = match self.mode {
            MatchMode::Contains => format!("%{}%", self.needle),
            MatchMode::StartsWith => format!("{}%", self.needle),
            MatchMode::EndsWith => format!("%{}", self.needle),
        };
        Some(Predicate::Like {
            field: qualify(alias, &self.field),
            pattern,
        })
    }
}

/// Membership test against a fixed set of values.
#[derive(Debug, Clone)]
pub struct In {
    field: String,
    values: Vec<Value>,
}

impl In {
    /// Build a membership filter. An empty value set is rejected at
    /// construction time; `field IN ()` is not valid SQL.
    pub fn new<V: IntoSqlValue>(
        field: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Result<Self> {
        let field = field.into();
        let values: Vec<Value> = values
            .into_iter()
            .map(IntoSqlValue::into_sql_value)
            .collect();
        if values.is_empty() {
            return Err(Error::invalid_argument(format!(
                "IN filter for field '{field}' requires at least one value"
            )));
        }
        Ok(Self { field, values })
    }
}

impl Filter for In {
    fn filter(&self, _builder: &QueryBuilder, alias: &str) -> Option<Predicate> {
        Some(Predicate::In {
            field: qualify(alias, &self.field),
            values: self.values.clone(),
        })
    }
}

/// `IS NULL` test. Negate with the specification algebra for `IS NOT NULL`.
#[derive(Debug, Clone)]
pub struct IsNull {
    field: String,
}

impl IsNull {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }
}

impl Filter for IsNull {
    fn filter(&self, _builder: &QueryBuilder, alias: &str) -> Option<Predicate> {
        Some(Predicate::IsNull {
            field: qualify(alias, &self.field),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> QueryBuilder {
        QueryBuilder::new("users", "e")
    }

    #[test]
    fn test_comparison_qualifies_field_with_alias() {
        let filter = Comparison::eq("status", "active");
        let predicate = filter.filter(&builder(), "u").expect("predicate");
        assert_eq!(predicate.to_sql(), "u.status = 'active'");
    }

    #[test]
    fn test_already_qualified_field_is_untouched() {
        let filter = Comparison::gt("o.total", 100);
        let predicate = filter.filter(&builder(), "e").expect("predicate");
        assert_eq!(predicate.to_sql(), "o.total > 100");
    }

    #[test]
    fn test_like_contains_wraps_needle() {
        let filter = Like::contains("name", "smith");
        let predicate = filter.filter(&builder(), "e").expect("predicate");
        assert_eq!(predicate.to_sql(), "e.name LIKE '%smith%'");
    }

    #[test]
    fn test_like_starts_with_appends_wildcard() {
        let filter = Like::starts_with("email", "admin@");
        let predicate = filter.filter(&builder(), "e").expect("predicate");
        assert_eq!(predicate.to_sql(), "e.email LIKE 'admin@%'");
    }

    #[test]
    fn test_like_ends_with_prepends_wildcard() {
        let filter = Like::ends_with("email", "@example.com");
        let predicate = filter.filter(&builder(), "e").expect("predicate");
        assert_eq!(predicate.to_sql(), "e.email LIKE '%@example.com'");
    }

    #[test]
    fn test_in_renders_value_list() {
        let filter = In::new("status", ["new", "open"]).expect("non-empty");
        let predicate = filter.filter(&builder(), "e").expect("predicate");
        assert_eq!(predicate.to_sql(), "e.status IN ('new', 'open')");
    }

    #[test]
    fn test_in_rejects_empty_value_set() {
        let error = In::new("status", Vec::<String>::new()).unwrap_err();
        assert!(matches!(error, Error::InvalidArgument(_)));
        assert!(error.to_string().contains("status"));
    }

    #[test]
    fn test_is_null() {
        let filter = IsNull::new("deleted_at");
        let predicate = filter.filter(&builder(), "e").expect("predicate");
        assert_eq!(predicate.to_sql(), "e.deleted_at IS NULL");
    }

    #[test]
    fn test_same_filter_usable_under_different_aliases() {
        let filter = Comparison::eq("status", "active");
        let first = filter.filter(&builder(), "a").expect("predicate");
        let second = filter.filter(&builder(), "b").expect("predicate");
        assert_eq!(first.to_sql(), "a.status = 'active'");
        assert_eq!(second.to_sql(), "b.status = 'active'");
    }
}
