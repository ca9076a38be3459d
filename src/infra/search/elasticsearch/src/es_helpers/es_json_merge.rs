// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct ElasticsearchJsonMerge {}

impl ElasticsearchJsonMerge {
    /// Recursively merges `overlay` into `base`:
    ///   - objects merge key by key,
    ///   - arrays at the same key are concatenated, `base` elements first,
    ///   - any other collision is won by `overlay`.
    pub fn deep_merge(base: serde_json::Value, overlay: serde_json::Value) -> serde_json::Value {
        use serde_json::Value;

        match (base, overlay) {
            (Value::Object(mut base), Value::Object(overlay)) => {
                for (key, overlay_value) in overlay {
                    let merged = match base.remove(&key) {
                        Some(base_value) => Self::deep_merge(base_value, overlay_value),
                        None => overlay_value,
                    };
                    base.insert(key, merged);
                }
                Value::Object(base)
            }
            (Value::Array(mut base), Value::Array(overlay)) => {
                base.extend(overlay);
                Value::Array(base)
            }
            (_, overlay) => overlay,
        }
    }

    pub fn deep_merge_opt(
        base: Option<serde_json::Value>,
        overlay: Option<serde_json::Value>,
    ) -> Option<serde_json::Value> {
        match (base, overlay) {
            (Some(base), Some(overlay)) => Some(Self::deep_merge(base, overlay)),
            (base, None) => base,
            (None, overlay) => overlay,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
