// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use serde::{Deserialize, Deserializer};

use crate::{FacetConfiguration, FacetConfigurationDto, Filter, LoadQueryConfigError, RequestState};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Builds the relevance clause in place of the default multi-match strategy.
///
/// Receives the request state and configuration verbatim. Whatever it returns
/// is merged with the structural filter clause as-is.
pub trait CustomQueryFn: Send + Sync {
    fn build_query(&self, state: &RequestState, config: &QueryConfig) -> serde_json::Value;
}

impl<F> CustomQueryFn for F
where
    F: Fn(&RequestState, &QueryConfig) -> serde_json::Value + Send + Sync,
{
    fn build_query(&self, state: &RequestState, config: &QueryConfig) -> serde_json::Value {
        self(state, config)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Static search configuration shared by all requests against one index
#[derive(Clone, Default, Deserialize)]
#[serde(try_from = "QueryConfigDto")]
pub struct QueryConfig {
    /// Fields returned with every hit
    pub result_fields: BTreeMap<String, ResultFieldConfig>,

    /// Fields matched against the search term, with their weights
    pub search_fields: BTreeMap<String, SearchFieldConfig>,

    pub facets: BTreeMap<String, FacetConfiguration>,

    /// Facet keys supporting multi-select
    pub disjunctive_facets: BTreeSet<String>,

    /// Always-on filters applied to every request
    pub base_filters: Vec<Filter>,

    pub fuzziness_enabled: bool,

    pub custom_query_fn: Option<Arc<dyn CustomQueryFn>>,
}

impl QueryConfig {
    pub fn from_json_str(s: &str) -> Result<Self, LoadQueryConfigError> {
        let config = serde_json::from_str(s)?;
        Ok(config)
    }

    pub fn from_yaml_str(s: &str) -> Result<Self, LoadQueryConfigError> {
        let config = serde_yaml::from_str(s)?;
        Ok(config)
    }

    pub fn with_custom_query_fn(mut self, custom_query_fn: impl CustomQueryFn + 'static) -> Self {
        self.custom_query_fn = Some(Arc::new(custom_query_fn));
        self
    }

    /// Finds the facet a filter on `field` belongs to: by facet key first, then
    /// by the facet's explicit field
    pub fn find_facet(&self, field: &str) -> Option<(&str, &FacetConfiguration)> {
        if let Some((key, facet)) = self.facets.get_key_value(field) {
            return Some((key.as_str(), facet));
        }

        self.facets
            .iter()
            .find(|(_, facet)| facet.field() == Some(field))
            .map(|(key, facet)| (key.as_str(), facet))
    }

    pub fn is_disjunctive(&self, facet_key: &str) -> bool {
        self.disjunctive_facets.contains(facet_key)
    }

    pub fn has_base_filter_on(&self, field: &str) -> bool {
        self.base_filters.iter().any(|f| f.field == field)
    }
}

impl std::fmt::Debug for QueryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryConfig")
            .field("result_fields", &self.result_fields)
            .field("search_fields", &self.search_fields)
            .field("facets", &self.facets)
            .field("disjunctive_facets", &self.disjunctive_facets)
            .field("base_filters", &self.base_filters)
            .field("fuzziness_enabled", &self.fuzziness_enabled)
            .field(
                "custom_query_fn",
                &self.custom_query_fn.as_ref().map(|_| "<fn>"),
            )
            .finish()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ResultFieldConfig {
    /// Accepts `true`/`false` or snippet options, any options object enables it
    #[serde(default, deserialize_with = "deserialize_snippet")]
    pub snippet: bool,
}

impl ResultFieldConfig {
    pub fn raw() -> Self {
        Self { snippet: false }
    }

    pub fn snippet() -> Self {
        Self { snippet: true }
    }
}

fn deserialize_snippet<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => false,
        Some(serde_json::Value::Bool(enabled)) => enabled,
        Some(_) => true,
    })
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SearchFieldConfig {
    #[serde(default)]
    pub weight: Option<f64>,
}

impl SearchFieldConfig {
    pub fn weighted(weight: f64) -> Self {
        Self {
            weight: Some(weight),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Deserialize)]
struct QueryConfigDto {
    #[serde(default)]
    result_fields: BTreeMap<String, ResultFieldConfig>,

    #[serde(default)]
    search_fields: BTreeMap<String, SearchFieldConfig>,

    #[serde(default)]
    facets: BTreeMap<String, FacetConfigurationDto>,

    #[serde(default, rename = "disjunctiveFacets")]
    disjunctive_facets: BTreeSet<String>,

    #[serde(default)]
    filters: Vec<Filter>,

    #[serde(default)]
    fuzziness: bool,
}

impl TryFrom<QueryConfigDto> for QueryConfig {
    type Error = crate::ConfigurationError;

    fn try_from(dto: QueryConfigDto) -> Result<Self, Self::Error> {
        let facets = dto
            .facets
            .into_iter()
            .map(|(key, raw)| {
                let facet = FacetConfiguration::resolve(&key, raw)?;
                Ok((key, facet))
            })
            .collect::<Result<BTreeMap<_, _>, crate::ConfigurationError>>()?;

        Ok(Self {
            result_fields: dto.result_fields,
            search_fields: dto.search_fields,
            facets,
            disjunctive_facets: dto.disjunctive_facets,
            base_filters: dto.filters,
            fuzziness_enabled: dto.fuzziness,
            custom_query_fn: None,
        })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
