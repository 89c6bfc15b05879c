//! # Specification System
//!
//! Composable query predicates with a closed combinator algebra.
//!
//! ## Overview
//!
//! A [`Specification`] is a value describing *what to match*, detached from
//! any one query. Leaves are either a [`Filter`] (contributes a `WHERE`
//! predicate) or a [`QueryModifier`] (mutates query structure). Combinators
//! build trees out of leaves: conjunction, disjunction, negation, alias
//! substitution, and a legacy `HAVING` wrapper. The same specification value
//! can be evaluated against any number of builders, under any alias.
//!
//! ## Evaluation
//!
//! Evaluation is two-phased, and the repository drives both phases:
//!
//! 1. [`Specification::modify`] walks the tree and applies every structural
//!    mutation (joins, select lists, orderings, windows) in declaration
//!    order.
//! 2. [`Specification::filter`] walks the tree and folds leaf predicates into
//!    a single optional predicate.
//!
//! A filter may decline to contribute by returning `None`. Declined children
//! simply vanish from their combinator: a conjunction of nothing is nothing,
//! never a vacuous `1=1`, and a single surviving child is used directly
//! without a wrapping combinator.
//!
//! ## Capability and the type system
//!
//! Whether a node filters, modifies, or both is fixed by its variant, so a
//! value with neither capability cannot be constructed. There is no runtime
//! capability check anywhere in the crate.
//!
//! ## Example Usage
//!
//! ```rust
//! use queryspec::specification::dsl::{eq, is_null, order_by_desc};
//! use queryspec::query_builder::QueryBuilder;
//!
//! let spec = eq("status", "active")
//!     .and(is_null("deleted_at"))
//!     .and(order_by_desc("created_at"));
//!
//! let mut qb = QueryBuilder::new("users", "e");
//! spec.modify(&mut qb, "e");
//! if let Some(predicate) = spec.filter(&qb, "e") {
//!     qb.and_where(predicate);
//! }
//! assert_eq!(
//!     qb.build_sql(),
//!     "SELECT e.* FROM users e \
//!      WHERE (e.status = 'active' AND e.deleted_at IS NULL) \
//!      ORDER BY e.created_at DESC"
//! );
//! ```

pub mod dsl;
pub mod filter;
pub mod modifier;
pub mod value;

pub use filter::{Comparison, Filter, In, IsNull, Like, MatchMode};
pub use modifier::{
    GroupBy, Having, InnerJoin, LeftJoin, Limit, Offset, OrderBy, QueryModifier, Select,
};
pub use value::IntoSqlValue;

use crate::error::Result;
use crate::query_builder::{Predicate, QueryBuilder};

/// Prefix `field` with `alias`. Dotted fields and expressions (anything with
/// a parenthesis or space) are taken as-is.
pub(crate) fn qualify(alias: &str, field: &str) -> String {
    if field.contains('.') || field.contains('(') || field.contains(' ') {
        field.to_string()
    } else {
        format!("{alias}.{field}")
    }
}

/// Child of the legacy [`Specification::Having`] wrapper.
#[derive(Debug)]
pub enum HavingChild {
    Filter(Box<dyn Filter>),
    Modifier(Box<dyn QueryModifier>),
    Expression(String),
}

/// A composable query specification.
///
/// Build leaves with [`from_filter`](Self::from_filter) /
/// [`from_modifier`](Self::from_modifier) or the [`dsl`] free functions, then
/// combine with [`and`](Self::and), [`or`](Self::or), [`not`](Self::not),
/// [`all_of`](Self::all_of) and [`any_of`](Self::any_of).
#[derive(Debug)]
pub enum Specification {
    /// Leaf contributing a `WHERE` predicate.
    Filter(Box<dyn Filter>),
    /// Leaf mutating query structure.
    Modifier(Box<dyn QueryModifier>),
    /// Conjunction: all children must hold.
    And(Vec<Specification>),
    /// Disjunction: at least one child must hold.
    Or(Vec<Specification>),
    /// Negation of the child's predicate. Structural mutations of the child
    /// still apply unnegated; only the predicate is inverted.
    Not(Box<Specification>),
    /// Evaluate the child under a different alias.
    Aliased {
        alias: String,
        child: Box<Specification>,
    },
    /// Legacy wrapper routing its child to the `HAVING` clause. Contributes
    /// no `WHERE` predicate. Superseded by the [`modifier::Having`] query
    /// modifier.
    Having(HavingChild),
}

impl Specification {
    /// Wrap a filter leaf.
    pub fn from_filter(filter: impl Filter + 'static) -> Self {
        Specification::Filter(Box::new(filter))
    }

    /// Wrap a query modifier leaf.
    pub fn from_modifier(modifier: impl QueryModifier + 'static) -> Self {
        Specification::Modifier(Box::new(modifier))
    }

    /// Conjunction over any number of children.
    pub fn all_of(children: Vec<Specification>) -> Self {
        Specification::And(children)
    }

    /// Disjunction over any number of children.
    pub fn any_of(children: Vec<Specification>) -> Self {
        Specification::Or(children)
    }

    /// Conjoin with `other`. If `self` is already a conjunction the child is
    /// appended rather than nested.
    pub fn and(self, other: Specification) -> Self {
        match self {
            Specification::And(mut children) => {
                children.push(other);
                Specification::And(children)
            }
            first => Specification::And(vec![first, other]),
        }
    }

    /// Disjoin with `other`. If `self` is already a disjunction the child is
    /// appended rather than nested.
    pub fn or(self, other: Specification) -> Self {
        match self {
            Specification::Or(mut children) => {
                children.push(other);
                Specification::Or(children)
            }
            first => Specification::Or(vec![first, other]),
        }
    }

    /// Negate this specification's predicate.
    pub fn not(self) -> Self {
        Specification::Not(Box::new(self))
    }

    /// Evaluate this specification under `alias` instead of the alias in
    /// effect at its position in the tree.
    pub fn with_alias(self, alias: impl Into<String>) -> Self {
        Specification::Aliased {
            alias: alias.into(),
            child: Box::new(self),
        }
    }

    /// Legacy `HAVING` wrapper around a filter.
    #[deprecated(note = "use the Having query modifier via dsl::having instead")]
    pub fn having_filter(filter: impl Filter + 'static) -> Self {
        Specification::Having(HavingChild::Filter(Box::new(filter)))
    }

    /// Legacy `HAVING` wrapper around a query modifier.
    #[deprecated(note = "use the Having query modifier via dsl::having instead")]
    pub fn having_modifier(modifier: impl QueryModifier + 'static) -> Self {
        Specification::Having(HavingChild::Modifier(Box::new(modifier)))
    }

    /// Legacy `HAVING` wrapper around a raw expression.
    #[deprecated(note = "use the Having query modifier via dsl::having_expression instead")]
    pub fn having_expression(expression: impl Into<String>) -> Result<Self> {
        let expression = expression.into();
        if expression.trim().is_empty() {
            return Err(crate::error::Error::invalid_argument(
                "HAVING specification requires a non-blank expression",
            ));
        }
        Ok(Specification::Having(HavingChild::Expression(expression)))
    }

    /// Fold this tree into a single `WHERE` predicate, or `None` if no node
    /// contributes one.
    pub fn filter(&self, builder: &QueryBuilder, alias: &str) -> Option<Predicate> {
        match self {
            Specification::Filter(filter) => filter.filter(builder, alias),
            Specification::Modifier(_) => None,
            Specification::And(children) => {
                combine(children, builder, alias, Predicate::And)
            }
            Specification::Or(children) => combine(children, builder, alias, Predicate::Or),
            Specification::Not(child) => child
                .filter(builder, alias)
                .map(|predicate| Predicate::Not(Box::new(predicate))),
            Specification::Aliased { alias: own, child } => child.filter(builder, own),
            Specification::Having(_) => None,
        }
    }

    /// Apply every structural mutation in this tree, in declaration order.
    pub fn modify(&self, builder: &mut QueryBuilder, alias: &str) {
        match self {
            Specification::Filter(_) => {}
            Specification::Modifier(modifier) => modifier.modify(builder, alias),
            Specification::And(children) | Specification::Or(children) => {
                for child in children {
                    child.modify(builder, alias);
                }
            }
            Specification::Not(child) => child.modify(builder, alias),
            Specification::Aliased { alias: own, child } => child.modify(builder, own),
            Specification::Having(child) => match child {
                HavingChild::Filter(filter) => {
                    if let Some(predicate) = filter.filter(builder, alias) {
                        builder.having(predicate);
                    }
                }
                HavingChild::Modifier(modifier) => modifier.modify(builder, alias),
                HavingChild::Expression(expression) => {
                    builder.having(Predicate::Raw(expression.clone()));
                }
            },
        }
    }
}

/// Collect the children's predicates and fold the survivors.
///
/// Zero survivors collapse to `None`, one survivor is passed through without
/// a wrapper, two or more are handed to `wrap`.
fn combine(
    children: &[Specification],
    builder: &QueryBuilder,
    alias: &str,
    wrap: fn(Vec<Predicate>) -> Predicate,
) -> Option<Predicate> {
    let mut parts: Vec<Predicate> = children
        .iter()
        .filter_map(|child| child.filter(builder, alias))
        .collect();
    match parts.len() {
        0 => None,
        1 => parts.pop(),
        _ => Some(wrap(parts)),
    }
}
