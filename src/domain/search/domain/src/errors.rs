// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use thiserror::Error;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Defect in the facet configuration or in how filters refer to it.
/// Not transient: retrying the same request fails the same way.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error(transparent)]
    FacetNotFound(#[from] FacetNotFoundError),

    #[error(transparent)]
    RangeNotFound(#[from] RangeNotFoundError),

    #[error(transparent)]
    MissingRanges(#[from] MissingRangesError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Facet configuration for '{field}' not found")]
pub struct FacetNotFoundError {
    pub field: String,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Range for '{field}' with value '{value}' not found in facet configuration")]
pub struct RangeNotFoundError {
    pub field: String,
    pub value: String,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Range facet '{facet}' does not define any ranges")]
pub struct MissingRangesError {
    pub facet: String,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum LoadQueryConfigError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
