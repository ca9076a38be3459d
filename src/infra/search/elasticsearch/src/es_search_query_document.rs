// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde::{Serialize, Serializer};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Body of a `_search` request, compiled for exactly one request.
///
/// Read-only once built. Absent optional parts are left out of the JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQueryDocument {
    pub(crate) query: Option<serde_json::Value>,
    pub(crate) post_filter: Option<serde_json::Value>,
    pub(crate) aggs: Option<serde_json::Value>,
    pub(crate) sort: serde_json::Value,
    pub(crate) highlight: Option<serde_json::Value>,
    pub(crate) source: Option<Vec<String>>,
    pub(crate) from: usize,
    pub(crate) size: usize,
}

impl SearchQueryDocument {
    pub fn query(&self) -> Option<&serde_json::Value> {
        self.query.as_ref()
    }

    pub fn post_filter(&self) -> Option<&serde_json::Value> {
        self.post_filter.as_ref()
    }

    pub fn aggs(&self) -> Option<&serde_json::Value> {
        self.aggs.as_ref()
    }

    pub fn sort(&self) -> &serde_json::Value {
        &self.sort
    }

    pub fn highlight(&self) -> Option<&serde_json::Value> {
        self.highlight.as_ref()
    }

    /// Projected source fields, `None` means all fields
    pub fn source_fields(&self) -> Option<&[String]> {
        self.source.as_deref()
    }

    pub fn from(&self) -> usize {
        self.from
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn to_json(&self) -> serde_json::Value {
        let mut query_json = serde_json::json!({
            "sort": self.sort,
            "from": self.from,
            "size": self.size,
        });

        if let Some(query) = &self.query {
            query_json["query"] = query.clone();
        }
        if let Some(post_filter) = &self.post_filter {
            query_json["post_filter"] = post_filter.clone();
        }
        if let Some(aggs) = &self.aggs {
            query_json["aggs"] = aggs.clone();
        }
        if let Some(highlight) = &self.highlight {
            query_json["highlight"] = highlight.clone();
        }
        if let Some(source) = &self.source {
            query_json["_source"] = serde_json::json!(source);
        }

        query_json
    }
}

impl Serialize for SearchQueryDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
