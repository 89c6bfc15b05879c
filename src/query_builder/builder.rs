use super::{Join, Pagination, Predicate, Query};

/// Sort order for `ORDER BY` entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn to_sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Mutable query structure that specifications act upon.
///
/// The builder is rooted at a single table with a root alias. Query modifiers
/// mutate it in place through `&mut` access; filters only read it. Once
/// [`build`](Self::build) is called the structure is frozen into a [`Query`].
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    table: String,
    alias: String,
    select_fields: Vec<String>,
    joins: Vec<Join>,
    where_clauses: Vec<Predicate>,
    group_by: Vec<String>,
    having: Vec<Predicate>,
    order_by: Vec<String>,
    pagination: Pagination,
}

impl QueryBuilder {
    /// Create a builder selecting every column of `table` under `alias`.
    pub fn new(table: &str, alias: &str) -> Self {
        Self {
            table: table.to_string(),
            alias: alias.to_string(),
            select_fields: vec![format!("{alias}.*")],
            joins: Vec::new(),
            where_clauses: Vec::new(),
            group_by: Vec::new(),
            having: Vec::new(),
            order_by: Vec::new(),
            pagination: Pagination::none(),
        }
    }

    /// Root alias this builder was created with.
    pub fn alias(&self) -> &str {
        &self.alias
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// Replace the select list.
    pub fn select(&mut self, fields: Vec<String>) {
        self.select_fields = fields;
    }

    /// Append a JOIN clause. Joins render in declaration order.
    pub fn join(&mut self, join: Join) {
        self.joins.push(join);
    }

    /// Append a WHERE predicate. Predicates are conjoined with `AND`.
    pub fn and_where(&mut self, predicate: Predicate) {
        self.where_clauses.push(predicate);
    }

    /// Append a HAVING predicate. Predicates are conjoined with `AND`.
    pub fn having(&mut self, predicate: Predicate) {
        self.having.push(predicate);
    }

    /// Append a GROUP BY field.
    pub fn group_by(&mut self, field: impl Into<String>) {
        self.group_by.push(field.into());
    }

    /// Append an ORDER BY entry. Entries render in declaration order.
    pub fn order_by(&mut self, field: impl Into<String>, direction: SortDirection) {
        self.order_by
            .push(format!("{} {}", field.into(), direction.to_sql()));
    }

    /// Set the row cap. A later call replaces an earlier one.
    pub fn limit(&mut self, limit: u32) {
        self.pagination.set_limit(limit);
    }

    /// Set the number of leading rows to skip. A later call replaces an
    /// earlier one.
    pub fn offset(&mut self, offset: u32) {
        self.pagination.set_offset(offset);
    }

    /// Render the statement body without the `LIMIT`/`OFFSET` window.
    fn build_body(&self) -> String {
        let mut sql = String::new();

        // SELECT clause
        sql.push_str("SELECT ");
        sql.push_str(&self.select_fields.join(", "));

        // FROM clause
        sql.push_str(&format!(" FROM {} {}", self.table, self.alias));

        // JOIN clauses
        for join in &self.joins {
            sql.push(' ');
            sql.push_str(&join.to_sql());
        }

        // WHERE clauses
        if !self.where_clauses.is_empty() {
            sql.push_str(" WHERE ");
            let where_parts: Vec<String> = self
                .where_clauses
                .iter()
                .map(Predicate::to_sql)
                .collect();
            sql.push_str(&where_parts.join(" AND "));
        }

        // GROUP BY
        if !self.group_by.is_empty() {
            sql.push_str(&format!(" GROUP BY {}", self.group_by.join(", ")));
        }

        // HAVING
        if !self.having.is_empty() {
            sql.push_str(" HAVING ");
            let having_parts: Vec<String> = self.having.iter().map(Predicate::to_sql).collect();
            sql.push_str(&having_parts.join(" AND "));
        }

        // ORDER BY
        if !self.order_by.is_empty() {
            sql.push_str(&format!(" ORDER BY {}", self.order_by.join(", ")));
        }

        sql
    }

    /// Build the complete SQL statement, window included.
    pub fn build_sql(&self) -> String {
        format!("{}{}", self.build_body(), self.pagination.to_sql())
    }

    /// Freeze this builder into an executable [`Query`].
    pub fn build(self) -> Query {
        Query::new(self.build_body(), self.pagination)
    }
}
