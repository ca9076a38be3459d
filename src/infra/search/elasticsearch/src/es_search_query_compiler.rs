// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use facet_search::*;

use crate::{
    ElasticsearchAggregationBuilder,
    ElasticsearchFilterTransformer,
    ElasticsearchJsonMerge,
    MultiMatchPolicyBuilder,
    SearchQueryDocument,
};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub const FACET_BUCKET_ALL: &str = "facet_bucket_all";
pub const FACET_BUCKET_PREFIX: &str = "facet_bucket_";

/// Applied facet filter paired with its encoded clause
pub type FacetClause<'a> = (&'a Filter, serde_json::Value);

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Compiles request state and search configuration into a query document.
///
/// Compilation is all-or-nothing: a configuration defect fails the whole call.
pub struct ElasticsearchQueryCompiler {}

impl ElasticsearchQueryCompiler {
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(
            search_term = %state.search_term,
            current = state.current,
            num_filters = state.filters.len(),
        )
    )]
    pub fn compile(
        state: &RequestState,
        config: &QueryConfig,
    ) -> Result<SearchQueryDocument, ConfigurationError> {
        let (from, size) = Self::pagination(state);

        let facet_clauses = Self::build_facet_clauses(state, config)?;
        let post_filter = Self::build_post_filter(&facet_clauses);

        let document = SearchQueryDocument {
            aggs: Self::build_aggregations(state, config, &facet_clauses, post_filter.as_ref()),
            post_filter,
            query: Self::build_query(state, config),
            sort: Self::build_sort(state),
            highlight: Self::build_highlight(config),
            source: Self::build_source(config),
            from,
            size,
        };

        tracing::debug!(document = %document.to_json(), "Compiled search query");

        Ok(document)
    }

    /// `from`/`size` of the requested 1-based page
    pub fn pagination(state: &RequestState) -> (usize, usize) {
        let page = usize::try_from(state.current.max(1)).unwrap_or(1);
        let size = state.results_per_page;
        ((page - 1).saturating_mul(size), size)
    }

    pub fn build_source(config: &QueryConfig) -> Option<Vec<String>> {
        if config.result_fields.is_empty() {
            None
        } else {
            Some(config.result_fields.keys().cloned().collect())
        }
    }

    /// Sort precedence: the sort list, then a single sort field, then relevance.
    /// A non-empty sort list whose entries all lack a direction yields an empty
    /// sort rather than relevance.
    pub fn build_sort(state: &RequestState) -> serde_json::Value {
        if let Some(sort_list) = state.sort_list.as_ref().filter(|l| !l.is_empty()) {
            let parts = sort_list
                .iter()
                .filter_map(|spec| {
                    let direction = spec.direction?;
                    let field = spec.field.as_str();
                    Some(serde_json::json!({ field: direction.as_str() }))
                })
                .collect();

            return serde_json::Value::Array(parts);
        }

        if let (Some(field), Some(direction)) = (&state.sort_field, state.sort_direction) {
            let field = field.as_str();
            return serde_json::json!({ field: direction.as_str() });
        }

        serde_json::json!("_score")
    }

    pub fn build_highlight(config: &QueryConfig) -> Option<serde_json::Value> {
        let fields = config
            .result_fields
            .iter()
            .filter(|(_, field_config)| field_config.snippet)
            .map(|(field, _)| (field.clone(), serde_json::json!({})))
            .collect::<serde_json::Map<_, _>>();

        if fields.is_empty() {
            None
        } else {
            Some(serde_json::json!({ "fields": fields }))
        }
    }

    /// Facet aggregations.
    ///
    /// A disjunctive facet gets its own bucket once anything beyond the base
    /// filters is selected. That bucket applies every facet filter except the
    /// facet's own, so picking one of its values keeps the sibling counts.
    /// All other facets share one bucket narrowed by the full post-filter.
    pub fn build_aggregations(
        state: &RequestState,
        config: &QueryConfig,
        facet_clauses: &[FacetClause<'_>],
        post_filter: Option<&serde_json::Value>,
    ) -> Option<serde_json::Value> {
        if config.facets.is_empty() {
            return None;
        }

        let has_selected_filters = state
            .filters
            .iter()
            .any(|filter| !config.has_base_filter_on(&filter.field));

        let mut aggs = serde_json::Map::new();
        let mut shared_aggs = serde_json::Map::new();

        for (facet_key, facet) in &config.facets {
            let facet_aggs = ElasticsearchAggregationBuilder::transform_facet_to_aggs(facet_key, facet);

            if config.is_disjunctive(facet_key) && has_selected_filters {
                let facet_field = facet.resolve_field(facet_key);

                let bucket_filters = facet_clauses
                    .iter()
                    .filter(|(filter, _)| filter.field != facet_field)
                    .map(|(_, clause)| clause.clone())
                    .collect::<Vec<_>>();

                aggs.insert(
                    format!("{FACET_BUCKET_PREFIX}{facet_key}"),
                    serde_json::json!({
                        "aggs": {
                            facet_key: facet_aggs
                        },
                        "filter": {
                            "bool": {
                                "must": bucket_filters
                            }
                        }
                    }),
                );
            } else {
                shared_aggs.insert(facet_key.clone(), facet_aggs);
            }
        }

        let shared_filter = post_filter
            .cloned()
            .unwrap_or_else(|| serde_json::json!({ "bool": { "must": [] } }));

        aggs.insert(
            FACET_BUCKET_ALL.to_string(),
            serde_json::json!({
                "aggs": shared_aggs,
                "filter": shared_filter,
            }),
        );

        Some(serde_json::Value::Object(aggs))
    }

    /// Applied filters that belong to a configured facet, each encoded once
    /// with its facet configuration
    pub fn build_facet_clauses<'a>(
        state: &'a RequestState,
        config: &QueryConfig,
    ) -> Result<Vec<FacetClause<'a>>, ConfigurationError> {
        state
            .filters
            .iter()
            .filter_map(|filter| {
                config
                    .find_facet(&filter.field)
                    .map(|(_, facet)| (filter, facet))
            })
            .map(|(filter, facet)| {
                let clause = ElasticsearchFilterTransformer::transform_facet(filter, Some(facet))?;
                Ok((filter, clause))
            })
            .collect()
    }

    /// Conjunction of all applied facet filters, `None` when there are none
    pub fn build_post_filter(facet_clauses: &[FacetClause<'_>]) -> Option<serde_json::Value> {
        if facet_clauses.is_empty() {
            return None;
        }

        let clauses = facet_clauses
            .iter()
            .map(|(_, clause)| clause.clone())
            .collect::<Vec<_>>();

        Some(serde_json::json!({ "bool": { "must": clauses } }))
    }

    /// Relevance clause merged with the structural filter clause, `None` when
    /// neither is present
    pub fn build_query(state: &RequestState, config: &QueryConfig) -> Option<serde_json::Value> {
        ElasticsearchJsonMerge::deep_merge_opt(
            Self::build_relevance_query(state, config),
            Self::build_structural_filter(state, config),
        )
    }

    pub fn build_relevance_query(
        state: &RequestState,
        config: &QueryConfig,
    ) -> Option<serde_json::Value> {
        if state.search_term.is_empty() {
            return None;
        }

        if let Some(custom_query_fn) = &config.custom_query_fn {
            return Some(custom_query_fn.build_query(state, config)).filter(|q| !q.is_null());
        }

        let policy = MultiMatchPolicyBuilder::build_relevance_policy(&config.search_fields);
        Some(policy.relevance_query(&state.search_term, config.fuzziness_enabled))
    }

    /// Applied filters outside of facets, plus the base filters. Base filters
    /// always land here, even on faceted fields.
    pub fn build_structural_filter(
        state: &RequestState,
        config: &QueryConfig,
    ) -> Option<serde_json::Value> {
        let clauses = state
            .filters
            .iter()
            .filter(|filter| config.find_facet(&filter.field).is_none())
            .chain(&config.base_filters)
            .map(ElasticsearchFilterTransformer::transform_filter)
            .collect::<Vec<_>>();

        if clauses.is_empty() {
            None
        } else {
            Some(serde_json::json!({ "bool": { "filter": clauses } }))
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
