// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::BTreeMap;

use facet_search::SearchFieldConfig;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub const DEFAULT_SEARCH_FIELD_BOOST: f64 = 1.0;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct MultiMatchPolicyBuilder {}

impl MultiMatchPolicyBuilder {
    pub fn build_relevance_policy(
        search_fields: &BTreeMap<String, SearchFieldConfig>,
    ) -> MultiMatchPolicy {
        let specs = search_fields
            .iter()
            .map(|(field_name, field_config)| MultiMatchFieldSpec {
                field_name: field_name.clone(),
                boost: field_config.weight.unwrap_or(DEFAULT_SEARCH_FIELD_BOOST),
            })
            .collect();

        MultiMatchPolicy { specs }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug)]
pub struct MultiMatchPolicy {
    pub specs: Vec<MultiMatchFieldSpec>,
}

impl MultiMatchPolicy {
    /// Fields in `field^boost` notation
    pub fn boosted_fields(&self) -> Vec<String> {
        self.specs
            .iter()
            .map(|spec| format!("{}^{}", spec.field_name, spec.boost))
            .collect()
    }

    /// Disjunction of four strategies, any of which is enough to match:
    ///   - best fields, requiring all terms (fuzzy when enabled),
    ///   - cross fields,
    ///   - exact phrase,
    ///   - phrase prefix, for search-as-you-type.
    pub fn relevance_query(&self, search_term: &str, fuzziness_enabled: bool) -> serde_json::Value {
        let fields = self.boosted_fields();

        let mut best_fields = serde_json::json!({
            "query": search_term,
            "fields": fields,
            "type": "best_fields",
            "operator": "and",
        });
        if fuzziness_enabled {
            best_fields["fuzziness"] = serde_json::json!("AUTO");
        }

        serde_json::json!({
            "bool": {
                "must": [
                    {
                        "bool": {
                            "minimum_should_match": 1,
                            "should": [
                                { "multi_match": best_fields },
                                {
                                    "multi_match": {
                                        "query": search_term,
                                        "fields": fields,
                                        "type": "cross_fields",
                                    }
                                },
                                {
                                    "multi_match": {
                                        "query": search_term,
                                        "fields": fields,
                                        "type": "phrase",
                                    }
                                },
                                {
                                    "multi_match": {
                                        "query": search_term,
                                        "fields": fields,
                                        "type": "phrase_prefix",
                                    }
                                }
                            ]
                        }
                    }
                ]
            }
        })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug)]
pub struct MultiMatchFieldSpec {
    pub field_name: String, // might include nested fields
    pub boost: f64,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
