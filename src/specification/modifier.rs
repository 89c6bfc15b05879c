//! # Query Modifier Leaves
//!
//! Structural mutations of the query under construction.
//!
//! A [`QueryModifier`] changes what the query selects, joins, groups, orders,
//! or windows. Unlike filters, modifiers receive the builder mutably and
//! return nothing; their effect is the mutation itself. Modifiers run before
//! filter predicates are collected, so a join is always in place before a
//! `WHERE` clause that references its alias.

use std::fmt;

use super::{filter::Filter, qualify};
use crate::error::{Error, Result};
use crate::query_builder::{Join, Predicate, QueryBuilder, SortDirection};

/// A specification leaf that mutates query structure.
pub trait QueryModifier: fmt::Debug + Send + Sync {
    /// Apply this modifier to the builder under the alias in effect.
    fn modify(&self, builder: &mut QueryBuilder, alias: &str);
}

/// Replace the select list. Fields are qualified with the evaluation alias.
#[derive(Debug, Clone)]
pub struct Select {
    fields: Vec<String>,
}

impl Select {
    /// An empty field list is rejected; it would render `SELECT  FROM ...`.
    pub fn new<F: Into<String>>(fields: impl IntoIterator<Item = F>) -> Result<Self> {
        let fields: Vec<String> = fields.into_iter().map(Into::into).collect();
        if fields.is_empty() {
            return Err(Error::invalid_argument(
                "SELECT modifier requires at least one field",
            ));
        }
        Ok(Self { fields })
    }
}

impl QueryModifier for Select {
    fn modify(&self, builder: &mut QueryBuilder, alias: &str) {
        let qualified: Vec<String> = self
            .fields
            .iter()
            .map(|field| qualify(alias, field))
            .collect();
        builder.select(qualified);
    }
}

/// Append one `ORDER BY` entry. Multiple instances compose in declaration
/// order.
#[derive(Debug, Clone)]
pub struct OrderBy {
    field: String,
    direction: SortDirection,
}

impl OrderBy {
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    pub fn asc(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Asc)
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Desc)
    }
}

impl QueryModifier for OrderBy {
    fn modify(&self, builder: &mut QueryBuilder, alias: &str) {
        builder.order_by(qualify(alias, &self.field), self.direction);
    }
}

/// Append one `GROUP BY` field.
#[derive(Debug, Clone)]
pub struct GroupBy {
    field: String,
}

impl GroupBy {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }
}

impl QueryModifier for GroupBy {
    fn modify(&self, builder: &mut QueryBuilder, alias: &str) {
        builder.group_by(qualify(alias, &self.field));
    }
}

#[derive(Debug)]
enum HavingCondition {
    Filter(Box<dyn Filter>),
    Expression(String),
}

/// Attach a condition to the `HAVING` clause.
///
/// This is the supported way to express aggregate conditions. Filter-backed
/// conditions are evaluated under the current alias like any other filter; a
/// filter contributing nothing leaves the clause untouched. Raw expressions
/// attach verbatim.
#[derive(Debug)]
pub struct Having {
    condition: HavingCondition,
}

impl Having {
    pub fn filter(filter: impl Filter + 'static) -> Self {
        Self {
            condition: HavingCondition::Filter(Box::new(filter)),
        }
    }

    /// A blank expression is rejected; it would render `HAVING ` with nothing
    /// to assert.
    pub fn expression(expression: impl Into<String>) -> Result<Self> {
        let expression = expression.into();
        if expression.trim().is_empty() {
            return Err(Error::invalid_argument(
                "HAVING modifier requires a non-blank expression",
            ));
        }
        Ok(Self {
            condition: HavingCondition::Expression(expression),
        })
    }
}

impl QueryModifier for Having {
    fn modify(&self, builder: &mut QueryBuilder, alias: &str) {
        match &self.condition {
            HavingCondition::Filter(filter) => {
                if let Some(predicate) = filter.filter(builder, alias) {
                    builder.having(predicate);
                }
            }
            HavingCondition::Expression(expression) => {
                builder.having(Predicate::Raw(expression.clone()));
            }
        }
    }
}

/// Join a related table under its own alias.
///
/// The `ON` condition renders `{join_alias}.{join_key} = {alias}.{parent_key}`
/// where `alias` is resolved at evaluation time, so the same join leaf works
/// under any root alias.
#[derive(Debug, Clone)]
pub struct InnerJoin {
    table: String,
    join_alias: String,
    parent_key: String,
    join_key: String,
}

impl InnerJoin {
    pub fn new(
        table: impl Into<String>,
        join_alias: impl Into<String>,
        parent_key: impl Into<String>,
        join_key: impl Into<String>,
    ) -> Self {
        Self {
            table: table.into(),
            join_alias: join_alias.into(),
            parent_key: parent_key.into(),
            join_key: join_key.into(),
        }
    }
}

impl QueryModifier for InnerJoin {
    fn modify(&self, builder: &mut QueryBuilder, alias: &str) {
        let on = format!(
            "{}.{} = {}.{}",
            self.join_alias, self.join_key, alias, self.parent_key
        );
        builder.join(Join::inner(&self.table, &self.join_alias, &on));
    }
}

/// Left join a related table under its own alias. `ON` rendering matches
/// [`InnerJoin`].
#[derive(Debug, Clone)]
pub struct LeftJoin {
    table: String,
    join_alias: String,
    parent_key: String,
    join_key: String,
}

impl LeftJoin {
    pub fn new(
        table: impl Into<String>,
        join_alias: impl Into<String>,
        parent_key: impl Into<String>,
        join_key: impl Into<String>,
    ) -> Self {
        Self {
            table: table.into(),
            join_alias: join_alias.into(),
            parent_key: parent_key.into(),
            join_key: join_key.into(),
        }
    }
}

impl QueryModifier for LeftJoin {
    fn modify(&self, builder: &mut QueryBuilder, alias: &str) {
        let on = format!(
            "{}.{} = {}.{}",
            self.join_alias, self.join_key, alias, self.parent_key
        );
        builder.join(Join::left(&self.table, &self.join_alias, &on));
    }
}

/// Cap the number of rows the statement returns.
#[derive(Debug, Clone, Copy)]
pub struct Limit {
    count: u32,
}

impl Limit {
    pub fn new(count: u32) -> Self {
        Self { count }
    }
}

impl QueryModifier for Limit {
    fn modify(&self, builder: &mut QueryBuilder, _alias: &str) {
        builder.limit(self.count);
    }
}

/// Skip a number of leading rows.
#[derive(Debug, Clone, Copy)]
pub struct Offset {
    start: u32,
}

impl Offset {
    pub fn new(start: u32) -> Self {
        Self { start }
    }
}

impl QueryModifier for Offset {
    fn modify(&self, builder: &mut QueryBuilder, _alias: &str) {
        builder.offset(self.start);
    }
}
