// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde::{Deserialize, Deserializer, Serialize};

use crate::Filter;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub const DEFAULT_RESULTS_PER_PAGE: usize = 20;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Search intent of a single request, as tracked by the embedding application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RequestState {
    /// Free-text term, empty when the user has not typed anything
    pub search_term: String,

    /// 1-based page index. Values below 1 are treated as the first page.
    pub current: i64,

    pub results_per_page: usize,

    /// Applied filters, in the order they were selected
    pub filters: Vec<Filter>,

    #[serde(deserialize_with = "deserialize_non_empty_string")]
    pub sort_field: Option<String>,

    #[serde(deserialize_with = "deserialize_sort_direction")]
    pub sort_direction: Option<SortDirection>,

    /// Multi-field sort, takes precedence over `sort_field`
    pub sort_list: Option<Vec<SortSpec>>,
}

impl Default for RequestState {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            current: 1,
            results_per_page: DEFAULT_RESULTS_PER_PAGE,
            filters: Vec::new(),
            sort_field: None,
            sort_direction: None,
            sort_list: None,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: String,

    #[serde(default, deserialize_with = "deserialize_sort_direction")]
    pub direction: Option<SortDirection>,
}

impl SortSpec {
    pub fn new(field: impl Into<String>, direction: Option<SortDirection>) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl std::fmt::Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

// UI state uses empty strings for "not set"
fn deserialize_sort_direction<'de, D>(deserializer: D) -> Result<Option<SortDirection>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(direction) = deserialize_non_empty_string(deserializer)? else {
        return Ok(None);
    };

    match direction.as_str() {
        "asc" => Ok(Some(SortDirection::Asc)),
        "desc" => Ok(Some(SortDirection::Desc)),
        other => Err(serde::de::Error::unknown_variant(other, &["asc", "desc"])),
    }
}

fn deserialize_non_empty_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
