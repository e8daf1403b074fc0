//! Domain-specific assertion macros for insights harnesses.
//!
//! These wrap `pretty_assertions` and add context-rich failure messages that
//! name the invariant that was violated.

/// Assert that no record in a JSON array response carries the store's
/// internal identifier.
///
/// ```rust
/// assert_no_ids!(body);
/// ```
#[macro_export]
macro_rules! assert_no_ids {
    ($body:expr) => {{
        let body: &serde_json::Value = &$body;
        let items = body
            .as_array()
            .unwrap_or_else(|| panic!("assert_no_ids! expected an array, got {}", body));
        for (i, item) in items.iter().enumerate() {
            if item.get(insights::ID_FIELD).is_some() {
                panic!(
                    "assert_no_ids! failed: element {} exposes {:?}: {}",
                    i,
                    insights::ID_FIELD,
                    item
                );
            }
        }
    }};
}

/// Assert that every record in a JSON array response has `field == value`.
///
/// ```rust
/// assert_all_have!(body, "topic", "oil");
/// ```
#[macro_export]
macro_rules! assert_all_have {
    ($body:expr, $field:expr, $value:expr) => {{
        let body: &serde_json::Value = &$body;
        let field: &str = $field;
        let expected = serde_json::json!($value);
        let items = body
            .as_array()
            .unwrap_or_else(|| panic!("assert_all_have! expected an array, got {}", body));
        for (i, item) in items.iter().enumerate() {
            match item.get(field) {
                Some(actual) if *actual == expected => {}
                Some(actual) => panic!(
                    "assert_all_have! failed: element {}[{:?}]\n  expected: {}\n  actual:   {}",
                    i, field, expected, actual
                ),
                None => panic!(
                    "assert_all_have! failed: element {} has no field {:?}: {}",
                    i, field, item
                ),
            }
        }
    }};
}

/// Assert the length of a JSON array response.
#[macro_export]
macro_rules! assert_len {
    ($body:expr, $len:expr) => {{
        let body: &serde_json::Value = &$body;
        let actual = body
            .as_array()
            .unwrap_or_else(|| panic!("assert_len! expected an array, got {}", body))
            .len();
        pretty_assertions::assert_eq!(actual, $len, "response: {}", body);
    }};
}
