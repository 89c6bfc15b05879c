use proptest::prelude::*;

use queryspec::specification::{dsl, Specification};

/// Strategy for generating column names
pub fn field_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,11}"
}

/// Strategy for generating text values, single quotes included so escaping
/// gets exercised. Lowercase only, so values can never collide with SQL
/// keywords in clause-scanning assertions.
pub fn text_value_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9 ']{0,12}"
}

/// Strategy for generating filter-only leaves
pub fn filter_leaf_strategy() -> impl Strategy<Value = Specification> {
    prop_oneof![
        (field_strategy(), text_value_strategy()).prop_map(|(field, value)| dsl::eq(field, value)),
        (field_strategy(), any::<i32>()).prop_map(|(field, value)| dsl::gt(field, value)),
        (field_strategy(), text_value_strategy())
            .prop_map(|(field, needle)| dsl::like_contains(field, needle)),
        field_strategy().prop_map(dsl::is_null),
    ]
}

/// Strategy for generating modifier-only leaves
pub fn modifier_leaf_strategy() -> impl Strategy<Value = Specification> {
    prop_oneof![
        field_strategy().prop_map(dsl::order_by_asc),
        field_strategy().prop_map(dsl::order_by_desc),
        field_strategy().prop_map(dsl::group_by),
        (0u32..500).prop_map(dsl::limit),
        (0u32..500).prop_map(dsl::offset),
    ]
}

/// Strategy for generating combinator trees over filter leaves
pub fn filter_tree_strategy() -> impl Strategy<Value = Specification> {
    filter_leaf_strategy().prop_recursive(4, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 1..4).prop_map(Specification::all_of),
            prop::collection::vec(inner.clone(), 1..4).prop_map(Specification::any_of),
            inner.prop_map(Specification::not),
        ]
    })
}

/// Strategy for generating combinator trees over modifier leaves
pub fn modifier_tree_strategy() -> impl Strategy<Value = Specification> {
    modifier_leaf_strategy().prop_recursive(3, 12, 3, |inner| {
        prop::collection::vec(inner, 1..4).prop_map(Specification::all_of)
    })
}

/// Strategy for generating mixed trees of filters and modifiers
pub fn mixed_tree_strategy() -> impl Strategy<Value = Specification> {
    prop_oneof![filter_leaf_strategy(), modifier_leaf_strategy()].prop_recursive(
        4,
        24,
        4,
        |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 1..4).prop_map(Specification::all_of),
                prop::collection::vec(inner.clone(), 1..4).prop_map(Specification::any_of),
                inner.prop_map(Specification::not),
            ]
        },
    )
}
