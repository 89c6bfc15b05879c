//! # Predicate Expressions
//!
//! Boolean expressions attached to `WHERE` and `HAVING` clauses.
//!
//! Predicates form a small expression tree: comparison leaves over a qualified
//! field, and `AND`/`OR`/`NOT` combinators over sub-predicates. [`Predicate::to_sql`]
//! renders the tree into a parenthesized SQL fragment. Values are carried as
//! `serde_json::Value` and rendered as SQL literals with single-quote escaping.

use serde_json::Value;

/// Comparison operators supported by [`Predicate::Comparison`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOperator {
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
}

impl ComparisonOperator {
    /// SQL spelling of this operator.
    pub fn to_sql(self) -> &'static str {
        match self {
            ComparisonOperator::Eq => "=",
            ComparisonOperator::NotEq => "<>",
            ComparisonOperator::Lt => "<",
            ComparisonOperator::LtEq => "<=",
            ComparisonOperator::Gt => ">",
            ComparisonOperator::GtEq => ">=",
        }
    }
}

/// A boolean condition over query columns.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Binary comparison: `field <op> value`
    Comparison {
        field: String,
        operator: ComparisonOperator,
        value: Value,
    },
    /// Pattern match: `field LIKE 'pattern'`
    Like { field: String, pattern: String },
    /// Membership: `field IN (v1, v2, ...)`
    In { field: String, values: Vec<Value> },
    /// Null check: `field IS NULL`
    IsNull { field: String },
    /// Conjunction of sub-predicates
    And(Vec<Predicate>),
    /// Disjunction of sub-predicates
    Or(Vec<Predicate>),
    /// Negation of a sub-predicate
    Not(Box<Predicate>),
    /// Raw SQL fragment, attached verbatim
    Raw(String),
}

impl Predicate {
    /// Render this predicate as a SQL fragment.
    pub fn to_sql(&self) -> String {
        match self {
            Predicate::Comparison {
                field,
                operator,
                value,
            } => {
                format!("{} {} {}", field, operator.to_sql(), format_value(value))
            }
            Predicate::Like { field, pattern } => {
                format!("{} LIKE '{}'", field, escape_string(pattern))
            }
            Predicate::In { field, values } => {
                let rendered: Vec<String> = values.iter().map(format_value).collect();
                format!("{} IN ({})", field, rendered.join(", "))
            }
            Predicate::IsNull { field } => format!("{field} IS NULL"),
            Predicate::And(parts) => join_parts(parts, " AND ", "1=1"),
            Predicate::Or(parts) => join_parts(parts, " OR ", "1=0"),
            Predicate::Not(inner) => format!("NOT ({})", inner.to_sql()),
            Predicate::Raw(sql) => sql.clone(),
        }
    }
}

/// Render a combinator's children joined by `separator`.
///
/// Empty combinators only arise from hand-built predicates, never from the
/// specification layer, and render as their boolean identity (`empty` is
/// `1=1` for AND, `1=0` for OR). A single child renders without parentheses.
fn join_parts(parts: &[Predicate], separator: &str, empty: &str) -> String {
    match parts.len() {
        0 => empty.to_string(),
        1 => parts[0].to_sql(),
        _ => {
            let rendered: Vec<String> = parts.iter().map(Predicate::to_sql).collect();
            format!("({})", rendered.join(separator))
        }
    }
}

/// Render a JSON value as a SQL literal.
pub(crate) fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => format!("'{}'", escape_string(s)),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "NULL".to_string(),
        other => format!("'{}'", escape_string(&other.to_string())),
    }
}

fn escape_string(input: &str) -> String {
    input.replace('\'', "''")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_comparison_to_sql() {
        let predicate = Predicate::Comparison {
            field: "e.status".to_string(),
            operator: ComparisonOperator::Eq,
            value: json!("active"),
        };
        assert_eq!(predicate.to_sql(), "e.status = 'active'");
    }

    #[test]
    fn test_numeric_comparison_is_unquoted() {
        let predicate = Predicate::Comparison {
            field: "e.age".to_string(),
            operator: ComparisonOperator::GtEq,
            value: json!(21),
        };
        assert_eq!(predicate.to_sql(), "e.age >= 21");
    }

    #[test]
    fn test_like_to_sql() {
        let predicate = Predicate::Like {
            field: "e.name".to_string(),
            pattern: "%smith%".to_string(),
        };
        assert_eq!(predicate.to_sql(), "e.name LIKE '%smith%'");
    }

    #[test]
    fn test_in_to_sql() {
        let predicate = Predicate::In {
            field: "e.status".to_string(),
            values: vec![json!("new"), json!("open")],
        };
        assert_eq!(predicate.to_sql(), "e.status IN ('new', 'open')");
    }

    #[test]
    fn test_is_null_to_sql() {
        let predicate = Predicate::IsNull {
            field: "e.deleted_at".to_string(),
        };
        assert_eq!(predicate.to_sql(), "e.deleted_at IS NULL");
    }

    #[test]
    fn test_and_parenthesizes_multiple_parts() {
        let predicate = Predicate::And(vec![
            Predicate::IsNull {
                field: "e.deleted_at".to_string(),
            },
            Predicate::Comparison {
                field: "e.age".to_string(),
                operator: ComparisonOperator::Lt,
                value: json!(65),
            },
        ]);
        assert_eq!(predicate.to_sql(), "(e.deleted_at IS NULL AND e.age < 65)");
    }

    #[test]
    fn test_single_part_renders_bare() {
        let predicate = Predicate::Or(vec![Predicate::IsNull {
            field: "e.closed_at".to_string(),
        }]);
        assert_eq!(predicate.to_sql(), "e.closed_at IS NULL");
    }

    #[test]
    fn test_empty_combinators_render_identity() {
        assert_eq!(Predicate::And(vec![]).to_sql(), "1=1");
        assert_eq!(Predicate::Or(vec![]).to_sql(), "1=0");
    }

    #[test]
    fn test_not_wraps_inner_predicate() {
        let predicate = Predicate::Not(Box::new(Predicate::Comparison {
            field: "e.role".to_string(),
            operator: ComparisonOperator::Eq,
            value: json!("admin"),
        }));
        assert_eq!(predicate.to_sql(), "NOT (e.role = 'admin')");
    }

    #[test]
    fn test_nested_or_inside_and() {
        let predicate = Predicate::And(vec![
            Predicate::Or(vec![
                Predicate::Comparison {
                    field: "e.status".to_string(),
                    operator: ComparisonOperator::Eq,
                    value: json!("new"),
                },
                Predicate::Comparison {
                    field: "e.status".to_string(),
                    operator: ComparisonOperator::Eq,
                    value: json!("open"),
                },
            ]),
            Predicate::IsNull {
                field: "e.assignee".to_string(),
            },
        ]);
        assert_eq!(
            predicate.to_sql(),
            "((e.status = 'new' OR e.status = 'open') AND e.assignee IS NULL)"
        );
    }

    #[test]
    fn test_string_values_escape_single_quotes() {
        let predicate = Predicate::Comparison {
            field: "e.name".to_string(),
            operator: ComparisonOperator::Eq,
            value: json!("O'Brien"),
        };
        assert_eq!(predicate.to_sql(), "e.name = 'O''Brien'");
    }

    #[test]
    fn test_null_value_renders_as_null_literal() {
        assert_eq!(format_value(&Value::Null), "NULL");
    }

    #[test]
    fn test_raw_renders_verbatim() {
        let predicate = Predicate::Raw("COUNT(o.id) > 5".to_string());
        assert_eq!(predicate.to_sql(), "COUNT(o.id) > 5");
    }
}
