// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use facet_search::*;

use crate::ElasticsearchBoundCoercion;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct ElasticsearchFilterTransformer {}

impl ElasticsearchFilterTransformer {
    /// Slot of the `bool` query a filter's clauses go to
    pub fn bool_clause_kind(combinator: Combinator) -> &'static str {
        match combinator {
            Combinator::Any => "should",
            Combinator::All => "filter",
            Combinator::None => "must_not",
        }
    }

    /// Encodes a filter without regard to facets: scalars become `term`
    /// clauses, ranges become `range` clauses
    pub fn transform_filter(filter: &Filter) -> serde_json::Value {
        let clauses = filter
            .values
            .iter()
            .map(|value| Self::transform_filter_value(&filter.field, value))
            .collect();

        Self::bool_clause(filter.combinator, clauses)
    }

    /// Encodes a filter on a faceted field, resolving named ranges against
    /// the facet configuration
    pub fn transform_facet(
        filter: &Filter,
        facet: Option<&FacetConfiguration>,
    ) -> Result<serde_json::Value, ConfigurationError> {
        let Some(facet) = facet else {
            return Err(FacetNotFoundError {
                field: filter.field.clone(),
            }
            .into());
        };

        match facet {
            FacetConfiguration::Value(_) => Ok(Self::transform_filter(filter)),

            FacetConfiguration::Range(_) => {
                let clauses = filter
                    .values
                    .iter()
                    .map(|value| {
                        let range = Self::resolve_range(&filter.field, value, facet)?;
                        Ok(Self::range_clause(&filter.field, range))
                    })
                    .collect::<Result<Vec<_>, ConfigurationError>>()?;

                Ok(Self::bool_clause(filter.combinator, clauses))
            }

            FacetConfiguration::GeoDistance(geo) => {
                let clauses = filter
                    .values
                    .iter()
                    .map(|value| {
                        let range = Self::resolve_geo_range(&filter.field, value, facet)?;
                        Ok(Self::geo_distance_clause(&filter.field, range, geo))
                    })
                    .collect::<Result<Vec<_>, ConfigurationError>>()?;

                Ok(Self::bool_clause(filter.combinator, clauses))
            }
        }
    }

    /// `range` clause with `gte`/`lte` present only for the bounds that are set
    pub fn range_clause(field: &str, range: &FilterValueRange) -> serde_json::Value {
        let mut bounds = serde_json::Map::new();
        if let Some(from) = &range.from {
            bounds.insert(
                "gte".to_string(),
                ElasticsearchBoundCoercion::range_query_bound(field, from),
            );
        }
        if let Some(to) = &range.to {
            bounds.insert(
                "lte".to_string(),
                ElasticsearchBoundCoercion::range_query_bound(field, to),
            );
        }

        serde_json::json!({
            "range": {
                field: bounds
            }
        })
    }

    fn transform_filter_value(field: &str, value: &FilterValue) -> serde_json::Value {
        match value {
            FilterValue::Range(range) => Self::range_clause(field, range),
            scalar => serde_json::json!({
                "term": {
                    field: scalar.to_json()
                }
            }),
        }
    }

    fn bool_clause(combinator: Combinator, clauses: Vec<serde_json::Value>) -> serde_json::Value {
        let kind = Self::bool_clause_kind(combinator);
        serde_json::json!({
            "bool": {
                kind: clauses
            }
        })
    }

    fn resolve_range<'a>(
        field: &str,
        value: &'a FilterValue,
        facet: &'a FacetConfiguration,
    ) -> Result<&'a FilterValueRange, ConfigurationError> {
        match value {
            FilterValue::Range(range) if range.has_bounds() => Ok(range),

            FilterValue::Range(_) => facet
                .find_range(value)
                .ok_or_else(|| Self::range_not_found(field, value)),

            scalar => {
                // Deprecated: ranges selected by bare name instead of a structured value
                tracing::warn!(
                    field,
                    value = %scalar,
                    "Range filter value given as a bare name, pass a structured range instead",
                );
                facet
                    .find_range(scalar)
                    .ok_or_else(|| Self::range_not_found(field, scalar))
            }
        }
    }

    // Bounds always come from the configured range when the name resolves
    fn resolve_geo_range<'a>(
        field: &str,
        value: &'a FilterValue,
        facet: &'a FacetConfiguration,
    ) -> Result<&'a FilterValueRange, ConfigurationError> {
        if let Some(range) = facet.find_range(value) {
            return Ok(range);
        }

        match value {
            FilterValue::Range(range) if range.has_bounds() => Ok(range),
            _ => Err(Self::range_not_found(field, value)),
        }
    }

    /// Ring between two radii around the facet center. The inner radius
    /// excludes, the outer radius includes.
    fn geo_distance_clause(
        field: &str,
        range: &FilterValueRange,
        geo: &GeoDistanceFacetConfiguration,
    ) -> serde_json::Value {
        let unit = geo.unit.as_deref().unwrap_or_default();
        let center = geo.center.to_json();

        let mut clause = serde_json::Map::new();
        if let Some(from) = range.from.as_ref().filter(|b| b.is_truthy()) {
            clause.insert(
                "must_not".to_string(),
                serde_json::json!([{
                    "geo_distance": {
                        "distance": format!("{from}{unit}"),
                        field: center,
                    }
                }]),
            );
        }
        if let Some(to) = range.to.as_ref().filter(|b| b.is_truthy()) {
            clause.insert(
                "must".to_string(),
                serde_json::json!([{
                    "geo_distance": {
                        "distance": format!("{to}{unit}"),
                        field: center,
                    }
                }]),
            );
        }

        serde_json::json!({ "bool": clause })
    }

    fn range_not_found(field: &str, value: &FilterValue) -> ConfigurationError {
        RangeNotFoundError {
            field: field.to_string(),
            value: value.to_string(),
        }
        .into()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
