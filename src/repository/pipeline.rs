//! In-memory search pipeline.
//!
//! Reusable filter → sort → paginate steps over any ordered slice. The
//! order is fixed: sort is defined over the filtered subset and pagination
//! indexes into the sorted subset. Each concrete backend supplies the
//! filter predicate and comparators.

use std::cmp::Ordering;

use crate::repository::search::SortDirection;

/// Apply a filter predicate, preserving relative order.
///
/// An absent filter is a strict no-op: the items are cloned as-is and the
/// predicate is never invoked, which keeps the branch cheap and observable
/// in tests.
pub fn apply_filter<E, P>(items: &[E], filter: Option<&str>, predicate: P) -> Vec<E>
where
    E: Clone,
    P: Fn(&E, &str) -> bool,
{
    match filter {
        None => items.to_vec(),
        Some(term) => items
            .iter()
            .filter(|item| predicate(item, term))
            .cloned()
            .collect(),
    }
}

/// Sort the filtered subset.
///
/// A named field outside `sortable` (or no field at all) falls back to
/// `default_compare`, the backend's default ordering. Explicit sorts use a
/// stable comparison on the named field, reversed for [`SortDirection::Desc`].
pub fn apply_sort<E, C, D>(
    mut items: Vec<E>,
    sort: Option<&str>,
    sort_dir: Option<SortDirection>,
    sortable: &[&str],
    compare: C,
    default_compare: D,
) -> Vec<E>
where
    C: Fn(&E, &E, &str) -> Ordering,
    D: Fn(&E, &E) -> Ordering,
{
    match sort {
        Some(field) if sortable.contains(&field) => {
            let desc = sort_dir.is_some_and(|dir| dir.is_desc());
            items.sort_by(|a, b| {
                let ordering = compare(a, b, field);
                if desc {
                    ordering.reverse()
                } else {
                    ordering
                }
            });
        }
        _ => items.sort_by(|a, b| default_compare(a, b)),
    }
    items
}

/// Slice out the requested page: `[(page-1)*per_page, start+per_page)`.
///
/// Pages beyond the end yield an empty vector, never an error.
pub fn apply_paginate<E>(items: Vec<E>, page: u64, per_page: u64) -> Vec<E> {
    let start = (page.saturating_sub(1)).saturating_mul(per_page);
    if start >= items.len() as u64 {
        return Vec::new();
    }

    items
        .into_iter()
        .skip(start as usize)
        .take(per_page as usize)
        .collect()
}
