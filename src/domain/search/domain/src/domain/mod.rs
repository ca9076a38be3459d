// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod facet_configuration;
mod facet_result;
mod query_config;
mod request_state;
mod search_filter;

pub use facet_configuration::*;
pub use facet_result::*;
pub use query_config::*;
pub use request_state::*;
pub use search_filter::*;
