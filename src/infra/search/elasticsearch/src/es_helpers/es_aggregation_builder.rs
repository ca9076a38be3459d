// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use facet_search::*;

use crate::{ElasticsearchBoundCoercion, ElasticsearchFilterTransformer};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct ElasticsearchAggregationBuilder {}

impl ElasticsearchAggregationBuilder {
    pub fn transform_facet_to_aggs(
        facet_key: &str,
        facet: &FacetConfiguration,
    ) -> serde_json::Value {
        let field = facet.resolve_field(facet_key);

        match facet {
            FacetConfiguration::Value(value_facet) => {
                let size = value_facet
                    .size
                    .filter(|size| *size > 0)
                    .unwrap_or(DEFAULT_TERMS_AGGREGATION_SIZE);

                serde_json::json!({
                    "terms": {
                        "field": field,
                        "size": size,
                        "order": Self::resolve_order(value_facet.sort.as_ref()),
                    }
                })
            }

            FacetConfiguration::Range(range_facet) => {
                let buckets = range_facet
                    .ranges
                    .iter()
                    .map(|range| {
                        (
                            range.name.clone(),
                            ElasticsearchFilterTransformer::range_clause(field, range),
                        )
                    })
                    .collect::<serde_json::Map<_, _>>();

                serde_json::json!({
                    "filters": {
                        "filters": buckets
                    }
                })
            }

            FacetConfiguration::GeoDistance(geo_facet) => {
                let ranges = geo_facet
                    .ranges
                    .iter()
                    .map(|range| Self::geo_distance_range(field, range))
                    .collect::<Vec<_>>();

                let mut aggregation = serde_json::json!({
                    "field": field,
                    "origin": geo_facet.center.to_json(),
                    "keyed": true,
                    "ranges": ranges,
                });
                if let Some(unit) = &geo_facet.unit {
                    aggregation["unit"] = serde_json::json!(unit);
                }

                serde_json::json!({ "geo_distance": aggregation })
            }
        }
    }

    /// Bucket ordering of a terms aggregation: by count descending unless the
    /// facet asks otherwise. Ordering by value defaults to ascending.
    pub fn resolve_order(sort: Option<&FacetSortOption>) -> serde_json::Value {
        let Some(sort) = sort else {
            return serde_json::json!({ "_count": "desc" });
        };

        match sort.order_by {
            FacetOrderBy::Count => {
                let direction = sort.direction.unwrap_or(SortDirection::Desc);
                serde_json::json!({ "_count": direction.as_str() })
            }
            FacetOrderBy::Value => {
                let direction = sort.direction.unwrap_or(SortDirection::Asc);
                serde_json::json!({ "_key": direction.as_str() })
            }
        }
    }

    // Zero bounds are left open
    fn geo_distance_range(field: &str, range: &FilterValueRange) -> serde_json::Value {
        let mut range_json = serde_json::Map::new();
        range_json.insert("key".to_string(), serde_json::json!(range.name));

        if let Some(from) = range.from.as_ref().filter(|b| b.is_truthy()) {
            range_json.insert(
                "from".to_string(),
                ElasticsearchBoundCoercion::numeric_bound(field, from),
            );
        }
        if let Some(to) = range.to.as_ref().filter(|b| b.is_truthy()) {
            range_json.insert(
                "to".to_string(),
                ElasticsearchBoundCoercion::numeric_bound(field, to),
            );
        }

        serde_json::Value::Object(range_json)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
