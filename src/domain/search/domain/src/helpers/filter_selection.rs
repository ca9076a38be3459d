// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use crate::{Combinator, FacetResult, Filter, FilterValue};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Values of the first applied filter on `field` with the given combinator
pub fn find_filter_values<'a>(
    filters: &'a [Filter],
    field: &str,
    combinator: Combinator,
) -> &'a [FilterValue] {
    filters
        .iter()
        .find(|f| f.field == field && f.combinator == combinator)
        .map(|f| f.values.as_slice())
        .unwrap_or_default()
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Removes `value` from the filters on `field`. When `combinator` is `None`
/// filters of any combinator on that field are affected.
///
/// A filter left without values is dropped. Everything else is passed through
/// in its original order.
pub fn remove_single_filter_value(
    filters: &[Filter],
    field: &str,
    value: &FilterValue,
    combinator: Option<Combinator>,
) -> Vec<Filter> {
    filters
        .iter()
        .filter_map(|filter| {
            let is_target = filter.field == field
                && combinator.is_none_or(|combinator| filter.combinator == combinator);

            if !is_target {
                return Some(filter.clone());
            }

            let values: Vec<_> = filter
                .values
                .iter()
                .filter(|v| !do_filter_values_match(v, value))
                .cloned()
                .collect();

            if values.is_empty() {
                None
            } else {
                Some(Filter {
                    values,
                    ..filter.clone()
                })
            }
        })
        .collect()
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Marks facet options that are currently applied as filters on `field`
pub fn mark_selected_facet_values_from_filters(
    mut facet: FacetResult,
    filters: &[Filter],
    field: &str,
    combinator: Combinator,
) -> FacetResult {
    let applied = find_filter_values(filters, field, combinator);

    for facet_value in &mut facet.data {
        facet_value.selected = applied
            .iter()
            .any(|filter_value| do_filter_values_match(filter_value, &facet_value.value));
    }

    facet
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Equivalence of filter values, in priority order:
///
/// 1. If either side is the string `"true"`, both sides are compared by their
///    boolean interpretation. Boolean facets may surface as `1`/`0`/`true`
///    while the applied filter holds a serialized string.
/// 2. Two ranges with the same name match regardless of their bounds. A
///    relative range such as "last 10 minutes" yields different bounds
///    depending on when it was selected.
/// 3. Otherwise values must be structurally equal.
pub fn do_filter_values_match(a: &FilterValue, b: &FilterValue) -> bool {
    if a.is_true_literal() || b.is_true_literal() {
        return a.to_filter_boolean() == b.to_filter_boolean();
    }

    if let (Some(a), Some(b)) = (a.as_range(), b.as_range())
        && !a.name.is_empty()
        && a.name == b.name
    {
        return true;
    }

    a == b
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Appends filters from `incoming` whose `(field, combinator)` pair is not
/// yet present. Existing filters are never overwritten.
pub fn merge_filters(base: &[Filter], incoming: &[Filter]) -> Vec<Filter> {
    let mut merged = base.to_vec();

    for next in incoming {
        let exists = merged
            .iter()
            .any(|f| f.field == next.field && f.combinator == next.combinator);

        if !exists {
            merged.push(next.clone());
        }
    }

    merged
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Comma-separated key of filter values, ranges are represented by name.
/// Meant for caching and display, not for transport.
pub fn serialise_filter(values: &[FilterValue]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
