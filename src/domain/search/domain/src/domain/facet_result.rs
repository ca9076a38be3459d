// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde::{Deserialize, Serialize};

use crate::{FacetKind, FilterValue};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Options of one facet with their counts, as shown to the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacetResult {
    pub field: String,

    #[serde(rename = "type")]
    pub kind: FacetKind,

    pub data: Vec<FacetValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacetValue {
    pub value: FilterValue,

    pub count: u64,

    #[serde(default)]
    pub selected: bool,
}

impl FacetValue {
    pub fn new(value: impl Into<FilterValue>, count: u64) -> Self {
        Self {
            value: value.into(),
            count,
            selected: false,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
