//! Shared proptest generators.
//!
//! Value trees are generated bottom-up with `prop_recursive`, covering every
//! variant, duplicate object keys, escapes and non-ASCII text.

use proptest::prelude::*;
use vault_json::{Map, Number, Value};

/// Generate string content including quotes, backslashes, control
/// characters and characters outside the Basic Multilingual Plane.
pub fn json_string_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9_ -]{0,16}",
        prop::collection::vec(
            prop_oneof![
                Just('"'),
                Just('\\'),
                Just('/'),
                Just('\n'),
                Just('\t'),
                Just('\u{1}'),
                Just('\u{1f}'),
                Just('é'),
                Just('\u{2028}'),
                Just('😀'),
                prop::char::range('a', 'z'),
            ],
            0..12,
        )
        .prop_map(|chars| chars.into_iter().collect()),
    ]
}

/// Generate numbers in every textual shape the grammar allows.
pub fn json_number_strategy() -> impl Strategy<Value = Number> {
    prop_oneof![
        any::<i64>().prop_map(Number::from),
        any::<u64>().prop_map(Number::from),
        (-1.0e12f64..1.0e12).prop_filter_map("finite", Number::from_f64),
        ("-?(0|[1-9][0-9]{0,5})", "(\\.[0-9]{1,4})?", "([eE][+-]?[0-9]{1,2})?")
            .prop_filter_map("valid number", |(int, frac, exp)| {
                Number::from_text(format!("{int}{frac}{exp}")).ok()
            }),
    ]
}

/// Generate scalar values.
pub fn json_scalar_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        json_number_strategy().prop_map(Value::Number),
        json_string_strategy().prop_map(Value::String),
    ]
}

/// Generate object keys from a small alphabet so duplicates are common.
pub fn json_key_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => "[a-c]",
        1 => json_string_strategy(),
    ]
}

/// Generate arbitrary value trees up to a few levels deep.
pub fn json_value_strategy() -> impl Strategy<Value = Value> {
    json_scalar_strategy().prop_recursive(4, 64, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::vec((json_key_strategy(), inner), 0..6).prop_map(|members| {
                let mut map = Map::new();
                for (key, value) in members {
                    map.append(key, value);
                }
                Value::Object(map)
            }),
        ]
    })
}

/// Generate attempt limits for retry tests.
pub fn max_attempts_strategy() -> impl Strategy<Value = u32> {
    1u32..8
}
