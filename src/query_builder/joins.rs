/// Join flavors reachable through the specification layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinType {
    Inner,
    Left,
}

impl JoinType {
    pub fn to_sql(self) -> &'static str {
        match self {
            JoinType::Inner => "INNER JOIN",
            JoinType::Left => "LEFT JOIN",
        }
    }
}

/// A SQL JOIN clause with its own alias and `ON` condition.
#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    pub join_type: JoinType,
    pub table: String,
    pub alias: String,
    pub on_condition: String,
}

impl Join {
    /// Create an INNER JOIN.
    pub fn inner(table: &str, alias: &str, on_condition: &str) -> Self {
        Self {
            join_type: JoinType::Inner,
            table: table.to_string(),
            alias: alias.to_string(),
            on_condition: on_condition.to_string(),
        }
    }

    /// Create a LEFT JOIN.
    pub fn left(table: &str, alias: &str, on_condition: &str) -> Self {
        Self {
            join_type: JoinType::Left,
            table: table.to_string(),
            alias: alias.to_string(),
            on_condition: on_condition.to_string(),
        }
    }

    /// Convert to a SQL string.
    pub fn to_sql(&self) -> String {
        format!(
            "{} {} {} ON {}",
            self.join_type.to_sql(),
            self.table,
            self.alias,
            self.on_condition
        )
    }
}
