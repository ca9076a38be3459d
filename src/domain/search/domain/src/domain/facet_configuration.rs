// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde::{Deserialize, Serialize};

use crate::{FilterValue, FilterValueRange, MissingRangesError, SortDirection};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub const DEFAULT_TERMS_AGGREGATION_SIZE: usize = 20;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FacetKind {
    Value,
    Range,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Facet configuration, resolved from its raw shape once at load time.
///
/// A `range` facet with a `center` becomes [`FacetConfiguration::GeoDistance`],
/// without one it becomes [`FacetConfiguration::Range`].
#[derive(Debug, Clone, PartialEq)]
pub enum FacetConfiguration {
    Value(ValueFacetConfiguration),
    Range(RangeFacetConfiguration),
    GeoDistance(GeoDistanceFacetConfiguration),
}

impl FacetConfiguration {
    pub fn kind(&self) -> FacetKind {
        match self {
            FacetConfiguration::Value(_) => FacetKind::Value,
            FacetConfiguration::Range(_) | FacetConfiguration::GeoDistance(_) => FacetKind::Range,
        }
    }

    /// Explicitly configured document field, if any
    pub fn field(&self) -> Option<&str> {
        let field = match self {
            FacetConfiguration::Value(c) => c.field.as_deref(),
            FacetConfiguration::Range(c) => c.field.as_deref(),
            FacetConfiguration::GeoDistance(c) => c.field.as_deref(),
        };
        field.filter(|f| !f.is_empty())
    }

    /// Document field the facet aggregates on, defaulting to the facet key
    pub fn resolve_field<'a>(&'a self, facet_key: &'a str) -> &'a str {
        self.field().unwrap_or(facet_key)
    }

    pub fn ranges(&self) -> &[FilterValueRange] {
        match self {
            FacetConfiguration::Value(_) => &[],
            FacetConfiguration::Range(c) => &c.ranges,
            FacetConfiguration::GeoDistance(c) => &c.ranges,
        }
    }

    /// Finds a configured range by name. A range value is looked up by its
    /// name, a bare string value is treated as the name itself.
    pub fn find_range(&self, value: &FilterValue) -> Option<&FilterValueRange> {
        let name = match value {
            FilterValue::Range(range) => range.name.as_str(),
            FilterValue::Text(text) => text.as_str(),
            FilterValue::Boolean(_) | FilterValue::Number(_) => return None,
        };
        self.ranges().iter().find(|range| range.name == name)
    }

    pub fn resolve(
        facet_key: &str,
        raw: FacetConfigurationDto,
    ) -> Result<FacetConfiguration, MissingRangesError> {
        match raw.kind {
            FacetKind::Value => Ok(FacetConfiguration::Value(ValueFacetConfiguration {
                field: raw.field,
                size: raw.size,
                sort: raw.sort,
            })),
            FacetKind::Range => {
                let Some(ranges) = raw.ranges else {
                    return Err(MissingRangesError {
                        facet: facet_key.to_string(),
                    });
                };

                if let Some(center) = raw.center {
                    Ok(FacetConfiguration::GeoDistance(
                        GeoDistanceFacetConfiguration {
                            field: raw.field,
                            ranges,
                            center,
                            unit: raw.unit,
                        },
                    ))
                } else {
                    Ok(FacetConfiguration::Range(RangeFacetConfiguration {
                        field: raw.field,
                        ranges,
                    }))
                }
            }
        }
    }
}

impl From<ValueFacetConfiguration> for FacetConfiguration {
    fn from(value: ValueFacetConfiguration) -> Self {
        FacetConfiguration::Value(value)
    }
}

impl From<RangeFacetConfiguration> for FacetConfiguration {
    fn from(value: RangeFacetConfiguration) -> Self {
        FacetConfiguration::Range(value)
    }
}

impl From<GeoDistanceFacetConfiguration> for FacetConfiguration {
    fn from(value: GeoDistanceFacetConfiguration) -> Self {
        FacetConfiguration::GeoDistance(value)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueFacetConfiguration {
    pub field: Option<String>,
    pub size: Option<usize>,
    pub sort: Option<FacetSortOption>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RangeFacetConfiguration {
    pub field: Option<String>,
    pub ranges: Vec<FilterValueRange>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeoDistanceFacetConfiguration {
    pub field: Option<String>,
    pub ranges: Vec<FilterValueRange>,
    pub center: GeoPoint,
    /// Distance unit, e.g. `km` or `mi`. The engine assumes meters when unset.
    pub unit: Option<String>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacetSortOption {
    #[serde(rename = "orderBy")]
    pub order_by: FacetOrderBy,

    #[serde(default)]
    pub direction: Option<SortDirection>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FacetOrderBy {
    Count,
    Value,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Origin of geo-distance facets, in any of the notations the engine accepts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GeoPoint {
    LatLon { lat: f64, lon: f64 },
    Coordinates([f64; 2]),
    Text(String),
}

impl GeoPoint {
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            GeoPoint::LatLon { lat, lon } => serde_json::json!({ "lat": lat, "lon": lon }),
            GeoPoint::Coordinates(coords) => serde_json::json!(coords),
            GeoPoint::Text(text) => serde_json::json!(text),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Facet configuration as it appears in configuration documents
#[derive(Debug, Clone, Deserialize)]
pub struct FacetConfigurationDto {
    #[serde(rename = "type")]
    pub kind: FacetKind,

    #[serde(default)]
    pub field: Option<String>,

    #[serde(default)]
    pub size: Option<usize>,

    #[serde(default)]
    pub sort: Option<FacetSortOption>,

    #[serde(default)]
    pub ranges: Option<Vec<FilterValueRange>>,

    #[serde(default)]
    pub center: Option<GeoPoint>,

    #[serde(default)]
    pub unit: Option<String>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
