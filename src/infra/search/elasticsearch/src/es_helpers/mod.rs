// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod es_aggregation_builder;
mod es_bound_coercion;
mod es_filter_transformer;
mod es_json_merge;
mod es_multi_match_policy_builder;

pub use es_aggregation_builder::*;
pub use es_bound_coercion::*;
pub use es_filter_transformer::*;
pub use es_json_merge::*;
pub use es_multi_match_policy_builder::*;
