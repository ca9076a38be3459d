// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use facet_search::*;
use facet_search_elasticsearch::ElasticsearchAggregationBuilder;
use pretty_assertions::assert_eq;
use serde_json::json;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test]
fn test_value_facet_defaults() {
    let facet = FacetConfiguration::from(ValueFacetConfiguration::default());

    assert_eq!(
        ElasticsearchAggregationBuilder::transform_facet_to_aggs("states", &facet),
        json!({
            "terms": {
                "field": "states",
                "size": 20,
                "order": { "_count": "desc" }
            }
        })
    );
}

#[test_log::test]
fn test_value_facet_explicit_field_and_size() {
    let facet = FacetConfiguration::from(ValueFacetConfiguration {
        field: Some("states.keyword".to_string()),
        size: Some(50),
        sort: None,
    });

    assert_eq!(
        ElasticsearchAggregationBuilder::transform_facet_to_aggs("states", &facet),
        json!({
            "terms": {
                "field": "states.keyword",
                "size": 50,
                "order": { "_count": "desc" }
            }
        })
    );

    // Zero size falls back to the default
    let facet = FacetConfiguration::from(ValueFacetConfiguration {
        size: Some(0),
        ..Default::default()
    });

    assert_eq!(
        ElasticsearchAggregationBuilder::transform_facet_to_aggs("states", &facet)["terms"]["size"],
        json!(20)
    );
}

#[test_log::test]
fn test_value_facet_order() {
    let order = |order_by, direction| {
        ElasticsearchAggregationBuilder::resolve_order(Some(&FacetSortOption {
            order_by,
            direction,
        }))
    };

    assert_eq!(
        ElasticsearchAggregationBuilder::resolve_order(None),
        json!({ "_count": "desc" })
    );
    assert_eq!(
        order(FacetOrderBy::Count, None),
        json!({ "_count": "desc" })
    );
    assert_eq!(
        order(FacetOrderBy::Count, Some(SortDirection::Asc)),
        json!({ "_count": "asc" })
    );
    assert_eq!(order(FacetOrderBy::Value, None), json!({ "_key": "asc" }));
    assert_eq!(
        order(FacetOrderBy::Value, Some(SortDirection::Desc)),
        json!({ "_key": "desc" })
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test]
fn test_range_facet() {
    let facet = FacetConfiguration::from(RangeFacetConfiguration {
        field: Some("acres_total".to_string()),
        ranges: vec![
            FilterValueRange::new("small", None, Some(1000_i64.into())),
            FilterValueRange::new("medium", Some(1000_i64.into()), Some("10000".into())),
            FilterValueRange::new("large", Some(10000_i64.into()), None),
        ],
    });

    assert_eq!(
        ElasticsearchAggregationBuilder::transform_facet_to_aggs("acres", &facet),
        json!({
            "filters": {
                "filters": {
                    "small": { "range": { "acres_total": { "lte": 1000 } } },
                    "medium": { "range": { "acres_total": { "gte": 1000, "lte": 10000 } } },
                    "large": { "range": { "acres_total": { "gte": 10000 } } }
                }
            }
        })
    );
}

#[test_log::test]
fn test_date_range_facet() {
    let facet = FacetConfiguration::from(RangeFacetConfiguration {
        field: None,
        ranges: vec![FilterValueRange::new(
            "20th_century",
            Some("1900-01-01".into()),
            Some("1999-12-31T23:59:59".into()),
        )],
    });

    assert_eq!(
        ElasticsearchAggregationBuilder::transform_facet_to_aggs("date_established", &facet),
        json!({
            "filters": {
                "filters": {
                    "20th_century": {
                        "range": {
                            "date_established": {
                                "gte": "1900-01-01",
                                "lte": "1999-12-31T23:59:59"
                            }
                        }
                    }
                }
            }
        })
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test]
fn test_geo_distance_facet() {
    let facet = FacetConfiguration::from(GeoDistanceFacetConfiguration {
        field: None,
        ranges: vec![
            FilterValueRange::new("nearby", Some(0_i64.into()), Some(100_i64.into())),
            FilterValueRange::new("medium", Some("100".into()), Some(500_i64.into())),
            FilterValueRange::new("far", Some(500_i64.into()), None),
        ],
        center: GeoPoint::LatLon {
            lat: 37.7749,
            lon: -122.4194,
        },
        unit: Some("mi".to_string()),
    });

    assert_eq!(
        ElasticsearchAggregationBuilder::transform_facet_to_aggs("location", &facet),
        json!({
            "geo_distance": {
                "field": "location",
                "origin": { "lat": 37.7749, "lon": -122.4194 },
                "unit": "mi",
                "keyed": true,
                "ranges": [
                    { "key": "nearby", "to": 100 },
                    { "key": "medium", "from": 100, "to": 500 },
                    { "key": "far", "from": 500 }
                ]
            }
        })
    );
}

#[test_log::test]
fn test_geo_distance_facet_without_unit() {
    let facet = FacetConfiguration::from(GeoDistanceFacetConfiguration {
        field: Some("coordinates".to_string()),
        ranges: vec![FilterValueRange::new("close", None, Some(1000_i64.into()))],
        center: GeoPoint::Text("37.7749,-122.4194".to_string()),
        unit: None,
    });

    assert_eq!(
        ElasticsearchAggregationBuilder::transform_facet_to_aggs("location", &facet),
        json!({
            "geo_distance": {
                "field": "coordinates",
                "origin": "37.7749,-122.4194",
                "keyed": true,
                "ranges": [
                    { "key": "close", "to": 1000 }
                ]
            }
        })
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
