// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use facet_search::*;
use pretty_assertions::assert_eq;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test]
fn test_filter_values_from_json() {
    let values: Vec<FilterValue> = serde_json::from_value(serde_json::json!([
        "Alaska",
        42,
        2.5,
        true,
        { "name": "small", "from": 0, "to": "1000" },
        { "name": "large" },
    ]))
    .unwrap();

    assert_eq!(
        values,
        vec![
            FilterValue::from("Alaska"),
            FilterValue::from(42_i64),
            FilterValue::Number(serde_json::Number::from_f64(2.5).unwrap()),
            FilterValue::from(true),
            FilterValueRange::new("small", Some(0_i64.into()), Some("1000".into())).into(),
            FilterValueRange::named("large").into(),
        ]
    );
}

#[test_log::test]
fn test_filter_from_json() {
    let filter: Filter = serde_json::from_value(serde_json::json!({
        "field": "states",
        "type": "none",
        "values": ["Alaska", "Hawaii"],
    }))
    .unwrap();

    assert_eq!(
        filter,
        Filter::none(
            "states",
            [FilterValue::from("Alaska"), FilterValue::from("Hawaii")]
        )
    );

    // Combinator defaults to `all`
    let filter: Filter = serde_json::from_value(serde_json::json!({
        "field": "states",
        "values": ["Alaska"],
    }))
    .unwrap();

    assert_eq!(filter.combinator, Combinator::All);
}

#[test_log::test]
fn test_unknown_combinator_is_rejected() {
    let res = serde_json::from_value::<Filter>(serde_json::json!({
        "field": "states",
        "type": "some",
        "values": ["Alaska"],
    }));

    assert!(res.is_err());
}

#[test_log::test]
fn test_range_to_json_skips_missing_bounds() {
    let range = FilterValueRange::new("large", Some(1000_i64.into()), None);

    assert_eq!(
        range.to_json(),
        serde_json::json!({ "name": "large", "from": 1000 })
    );
    assert_eq!(
        serde_json::to_value(FilterValue::from(range)).unwrap(),
        serde_json::json!({ "name": "large", "from": 1000 })
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test]
fn test_filter_value_equality() {
    let one = FilterValue::from(1_i64);
    let one_float = FilterValue::Number(serde_json::Number::from_f64(1.0).unwrap());

    assert_eq!(one, one_float);
    assert_ne!(one, FilterValue::from("1"));
    assert_ne!(FilterValue::from(true), FilterValue::from("true"));
    assert_ne!(
        FilterValue::from("small"),
        FilterValue::from(FilterValueRange::named("small"))
    );
}

#[test_log::test]
fn test_filter_value_truthiness() {
    assert!(FilterValue::from("true").is_true_literal());
    assert!(!FilterValue::from(true).is_true_literal());

    assert!(FilterValue::from("true").to_filter_boolean());
    assert!(!FilterValue::from("yes").to_filter_boolean());
    assert!(FilterValue::from(7_i64).to_filter_boolean());
    assert!(!FilterValue::from(0_i64).to_filter_boolean());
    assert!(FilterValue::from(FilterValueRange::named("small")).to_filter_boolean());
}

#[test_log::test]
fn test_range_bound_truthiness() {
    assert!(RangeBound::from(10_i64).is_truthy());
    assert!(RangeBound::from("2024-01-01").is_truthy());
    assert!(!RangeBound::from(0_i64).is_truthy());
    assert!(!RangeBound::from("").is_truthy());
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
