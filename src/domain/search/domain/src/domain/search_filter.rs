// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde::{Deserialize, Serialize};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Logical relationship among the values of a single filter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Combinator {
    /// At least one of the values must match
    Any,

    /// All of the values must match
    #[default]
    All,

    /// None of the values may match
    None,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    pub field: String,

    #[serde(rename = "type", default)]
    pub combinator: Combinator,

    pub values: Vec<FilterValue>,
}

impl Filter {
    pub fn new(
        field: impl Into<String>,
        combinator: Combinator,
        values: impl IntoIterator<Item = FilterValue>,
    ) -> Self {
        Self {
            field: field.into(),
            combinator,
            values: values.into_iter().collect(),
        }
    }

    #[inline]
    pub fn any(field: impl Into<String>, values: impl IntoIterator<Item = FilterValue>) -> Self {
        Self::new(field, Combinator::Any, values)
    }

    #[inline]
    pub fn all(field: impl Into<String>, values: impl IntoIterator<Item = FilterValue>) -> Self {
        Self::new(field, Combinator::All, values)
    }

    #[inline]
    pub fn none(field: impl Into<String>, values: impl IntoIterator<Item = FilterValue>) -> Self {
        Self::new(field, Combinator::None, values)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// A single selected value of a filter: either a scalar or a named range.
///
/// Numbers compare by their numeric value, so `1` and `1.0` are equal, while a
/// scalar never equals a range even when the scalar spells the range's name.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Range(FilterValueRange),
    Boolean(bool),
    Number(serde_json::Number),
    Text(String),
}

impl FilterValue {
    pub fn as_range(&self) -> Option<&FilterValueRange> {
        match self {
            FilterValue::Range(range) => Some(range),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FilterValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Whether this is the literal string `"true"`
    pub fn is_true_literal(&self) -> bool {
        matches!(self, FilterValue::Text(text) if text == "true")
    }

    /// Truthiness used to reconcile boolean facets that may surface as
    /// `1`/`0`/`true`/`false` with string-serialized filter values
    pub fn to_filter_boolean(&self) -> bool {
        match self {
            FilterValue::Text(text) => text == "true",
            FilterValue::Boolean(value) => *value,
            FilterValue::Number(number) => number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
            FilterValue::Range(_) => true,
        }
    }

    /// Scalar representation suitable for a `term` clause
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            FilterValue::Range(range) => range.to_json(),
            FilterValue::Boolean(value) => serde_json::Value::Bool(*value),
            FilterValue::Number(number) => serde_json::Value::Number(number.clone()),
            FilterValue::Text(text) => serde_json::Value::String(text.clone()),
        }
    }
}

impl PartialEq for FilterValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (FilterValue::Range(a), FilterValue::Range(b)) => a == b,
            (FilterValue::Boolean(a), FilterValue::Boolean(b)) => a == b,
            (FilterValue::Number(a), FilterValue::Number(b)) => numbers_eq(a, b),
            (FilterValue::Text(a), FilterValue::Text(b)) => a == b,
            _ => false,
        }
    }
}

impl std::fmt::Display for FilterValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FilterValue::Range(range) => write!(f, "{}", range.name),
            FilterValue::Boolean(value) => write!(f, "{value}"),
            FilterValue::Number(number) => write!(f, "{number}"),
            FilterValue::Text(text) => write!(f, "{text}"),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::Text(value)
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        FilterValue::Boolean(value)
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        FilterValue::Number(value.into())
    }
}

impl From<FilterValueRange> for FilterValue {
    fn from(value: FilterValueRange) -> Self {
        FilterValue::Range(value)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// A range option identified by a stable name.
///
/// Bounds are optional on either side. The same struct describes both a
/// selected range value and a configured facet range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterValueRange {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<RangeBound>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<RangeBound>,
}

impl FilterValueRange {
    pub fn new(
        name: impl Into<String>,
        from: Option<RangeBound>,
        to: Option<RangeBound>,
    ) -> Self {
        Self {
            name: name.into(),
            from,
            to,
        }
    }

    /// A range that only carries its name and relies on facet configuration
    /// for the actual bounds
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(name, None, None)
    }

    pub fn has_bounds(&self) -> bool {
        self.from.is_some() || self.to.is_some()
    }

    pub fn to_json(&self) -> serde_json::Value {
        let mut range_json = serde_json::Map::new();
        range_json.insert("name".to_string(), serde_json::json!(self.name));
        if let Some(from) = &self.from {
            range_json.insert("from".to_string(), from.to_json());
        }
        if let Some(to) = &self.to {
            range_json.insert("to".to_string(), to.to_json());
        }
        serde_json::Value::Object(range_json)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Bound of a range: a number, or a string holding either a date or a
/// number-like value
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RangeBound {
    Number(serde_json::Number),
    Text(String),
}

impl RangeBound {
    /// Zero and empty strings do not count as a set bound
    pub fn is_truthy(&self) -> bool {
        match self {
            RangeBound::Number(number) => number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
            RangeBound::Text(text) => !text.is_empty(),
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            RangeBound::Number(number) => serde_json::Value::Number(number.clone()),
            RangeBound::Text(text) => serde_json::Value::String(text.clone()),
        }
    }
}

impl PartialEq for RangeBound {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (RangeBound::Number(a), RangeBound::Number(b)) => numbers_eq(a, b),
            (RangeBound::Text(a), RangeBound::Text(b)) => a == b,
            _ => false,
        }
    }
}

impl std::fmt::Display for RangeBound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RangeBound::Number(number) => write!(f, "{number}"),
            RangeBound::Text(text) => write!(f, "{text}"),
        }
    }
}

impl From<i64> for RangeBound {
    fn from(value: i64) -> Self {
        RangeBound::Number(value.into())
    }
}

impl From<&str> for RangeBound {
    fn from(value: &str) -> Self {
        RangeBound::Text(value.to_string())
    }
}

impl From<String> for RangeBound {
    fn from(value: String) -> Self {
        RangeBound::Text(value)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

fn numbers_eq(a: &serde_json::Number, b: &serde_json::Number) -> bool {
    match (a.as_i64(), b.as_i64()) {
        (Some(a), Some(b)) => a == b,
        _ => a.as_f64() == b.as_f64(),
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
