// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use facet_search::RangeBound;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

const LOCAL_DATE_TIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"];
const DATE_FORMAT: &str = "%Y-%m-%d";

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Best-effort coercion of range bounds into values the engine understands.
///
/// Bounds that cannot be read as a number become `null`, the JSON rendition of
/// NaN. The engine rejects them when executing the query.
pub struct ElasticsearchBoundCoercion {}

impl ElasticsearchBoundCoercion {
    /// Bound of a `range` query: dates pass through verbatim, everything else
    /// is coerced to a number
    pub fn range_query_bound(field: &str, bound: &RangeBound) -> serde_json::Value {
        match bound {
            RangeBound::Text(text) if Self::is_valid_date_string(text) => {
                serde_json::Value::String(text.clone())
            }
            _ => Self::numeric_bound(field, bound),
        }
    }

    pub fn numeric_bound(field: &str, bound: &RangeBound) -> serde_json::Value {
        match bound {
            RangeBound::Number(number) => serde_json::Value::Number(number.clone()),
            RangeBound::Text(text) => match Self::parse_number(text) {
                Some(number) => serde_json::Value::Number(number),
                None => {
                    tracing::warn!(
                        field,
                        bound = %text,
                        "Range bound is neither a date nor a number, passing it as null",
                    );
                    serde_json::Value::Null
                }
            },
        }
    }

    pub fn is_valid_date_string(text: &str) -> bool {
        DateTime::parse_from_rfc3339(text).is_ok()
            || LOCAL_DATE_TIME_FORMATS
                .iter()
                .any(|format| NaiveDateTime::parse_from_str(text, format).is_ok())
            || NaiveDate::parse_from_str(text, DATE_FORMAT).is_ok()
    }

    fn parse_number(text: &str) -> Option<serde_json::Number> {
        let trimmed = text.trim();

        // Blank strings read as zero
        if trimmed.is_empty() {
            return Some(0.into());
        }

        if let Ok(integer) = trimmed.parse::<i64>() {
            return Some(integer.into());
        }

        // Non-finite values have no JSON representation
        trimmed
            .parse::<f64>()
            .ok()
            .and_then(serde_json::Number::from_f64)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
