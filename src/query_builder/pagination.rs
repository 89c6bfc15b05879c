/// Window over the result set, rendered as `LIMIT`/`OFFSET`.
///
/// Both bounds are unsigned at the type level, so a negative limit or offset
/// cannot be expressed at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pagination {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl Pagination {
    /// Empty window: no `LIMIT` or `OFFSET` clause at all.
    pub fn none() -> Self {
        Self::default()
    }

    /// Replace the row cap. A later call wins over an earlier one.
    pub fn set_limit(&mut self, limit: u32) {
        self.limit = Some(limit);
    }

    /// Replace the number of leading rows to skip.
    pub fn set_offset(&mut self, offset: u32) {
        self.offset = Some(offset);
    }

    pub fn is_empty(&self) -> bool {
        self.limit.is_none() && self.offset.is_none()
    }

    /// Render the window, with a leading space when non-empty.
    pub fn to_sql(&self) -> String {
        let mut sql = String::new();

        if let Some(limit) = self.limit {
            sql.push_str(&format!(" LIMIT {limit}"));
        }

        if let Some(offset) = self.offset {
            sql.push_str(&format!(" OFFSET {offset}"));
        }

        sql
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_window_renders_nothing() {
        let pagination = Pagination::none();
        assert!(pagination.is_empty());
        assert_eq!(pagination.to_sql(), "");
    }

    #[test]
    fn test_limit_only() {
        let mut pagination = Pagination::none();
        pagination.set_limit(5);
        assert_eq!(pagination.to_sql(), " LIMIT 5");
    }

    #[test]
    fn test_offset_only() {
        let mut pagination = Pagination::none();
        pagination.set_offset(15);
        assert_eq!(pagination.to_sql(), " OFFSET 15");
    }

    #[test]
    fn test_limit_and_offset() {
        let mut pagination = Pagination::none();
        pagination.set_limit(10);
        pagination.set_offset(20);
        assert_eq!(pagination.to_sql(), " LIMIT 10 OFFSET 20");
    }

    #[test]
    fn test_later_limit_replaces_earlier() {
        let mut pagination = Pagination::none();
        pagination.set_limit(10);
        pagination.set_limit(3);
        assert_eq!(pagination.limit, Some(3));
    }

    #[test]
    fn test_zero_offset_is_rendered() {
        let mut pagination = Pagination::none();
        pagination.set_offset(0);
        assert_eq!(pagination.to_sql(), " OFFSET 0");
    }
}
