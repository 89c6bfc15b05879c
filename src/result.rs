//! # Result Modifiers
//!
//! Adjustments applied to a built [`Query`] just before execution.
//!
//! Result modifiers run after specification evaluation, once query structure
//! is frozen. They only touch execution-time knobs: hydration mode and the
//! returned-row cap. Modifiers compose through
//! [`ResultModifierCollection`], which applies its children in order, so a
//! later child overrides an earlier one where they touch the same knob.

use std::fmt;

use crate::query_builder::{HydrationMode, Query};

/// Adjusts how a built query executes and how its rows come back.
pub trait ResultModifier: fmt::Debug + Send + Sync {
    fn modify(&self, query: &mut Query);
}

/// Hydrate each row as a JSON array of column values.
#[derive(Debug, Clone, Copy, Default)]
pub struct AsArray;

impl ResultModifier for AsArray {
    fn modify(&self, query: &mut Query) {
        query.set_hydration(HydrationMode::Array);
    }
}

/// Hydrate each row as its first column value.
#[derive(Debug, Clone, Copy, Default)]
pub struct AsScalar;

impl ResultModifier for AsScalar {
    fn modify(&self, query: &mut Query) {
        query.set_hydration(HydrationMode::Scalar);
    }
}

/// Cap the number of returned rows, overriding any builder-level `LIMIT`.
#[derive(Debug, Clone, Copy)]
pub struct MaxResults {
    count: u32,
}

impl MaxResults {
    pub fn new(count: u32) -> Self {
        Self { count }
    }
}

impl ResultModifier for MaxResults {
    fn modify(&self, query: &mut Query) {
        query.set_max_results(self.count);
    }
}

/// Ordered group of result modifiers, itself a result modifier.
///
/// Children are applied strictly in the order given, and the collection only
/// accepts result modifiers at the type level, so a foreign element cannot
/// end up inside it.
#[derive(Debug, Default)]
pub struct ResultModifierCollection {
    children: Vec<Box<dyn ResultModifier>>,
}

impl ResultModifierCollection {
    pub fn new(children: Vec<Box<dyn ResultModifier>>) -> Self {
        Self { children }
    }

    /// Append a child, keeping application order.
    pub fn push(mut self, child: impl ResultModifier + 'static) -> Self {
        self.children.push(Box::new(child));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl ResultModifier for ResultModifierCollection {
    fn modify(&self, query: &mut Query) {
        for child in &self.children {
            child.modify(query);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query_builder::{Pagination, Query};

    fn sample_query() -> Query {
        Query::new("SELECT e.* FROM users e".to_string(), Pagination::none())
    }

    #[test]
    fn test_as_array_switches_hydration() {
        let mut query = sample_query();
        AsArray.modify(&mut query);
        assert_eq!(query.hydration(), HydrationMode::Array);
    }

    #[test]
    fn test_max_results_caps_rows() {
        let mut query = sample_query();
        MaxResults::new(7).modify(&mut query);
        assert_eq!(query.to_sql(), "SELECT e.* FROM users e LIMIT 7");
    }

    #[test]
    fn test_collection_applies_children_in_order() {
        let collection = ResultModifierCollection::default()
            .push(AsArray)
            .push(MaxResults::new(3))
            .push(AsScalar);

        let mut query = sample_query();
        collection.modify(&mut query);

        // Last hydration change wins; max results unaffected by it
        assert_eq!(query.hydration(), HydrationMode::Scalar);
        assert_eq!(query.max_results(), Some(3));
    }

    #[test]
    fn test_empty_collection_changes_nothing() {
        let collection = ResultModifierCollection::default();
        let mut query = sample_query();
        collection.modify(&mut query);
        assert!(collection.is_empty());
        assert_eq!(query.hydration(), HydrationMode::Entity);
        assert_eq!(query.max_results(), None);
    }

    #[test]
    fn test_nested_collections_flatten_by_order() {
        let inner = ResultModifierCollection::new(vec![Box::new(AsArray)]);
        let outer = ResultModifierCollection::default()
            .push(inner)
            .push(AsScalar);

        let mut query = sample_query();
        outer.modify(&mut query);
        assert_eq!(query.hydration(), HydrationMode::Scalar);
    }
}
