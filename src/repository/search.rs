//! Search parameters and results.
//!
//! [`SearchParams`] normalizes loosely-typed pagination/sort/filter input
//! into a canonical, internally consistent form. Malformed input never
//! raises an error here: every bad value is silently coerced to a safe
//! default, leaving stricter rejection to whatever boundary wraps the core.
//!
//! [`SearchResult`] is the canonical output shape; `last_page` is always
//! derived from `total` and `per_page`, never stored.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Default page size applied when `per_page` is absent or malformed.
pub const DEFAULT_PER_PAGE: u64 = 15;

/// Sort direction for an explicit sort field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    pub fn is_desc(&self) -> bool {
        matches!(self, SortDirection::Desc)
    }
}

/// Raw, untrusted search request.
///
/// Fields arrive as arbitrary JSON values; [`SearchParams::new`] applies
/// the coercion rules. This is the shape a transport layer deserializes
/// into before reaching the core.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchInput {
    pub page: Option<JsonValue>,
    pub per_page: Option<JsonValue>,
    pub sort: Option<JsonValue>,
    pub sort_dir: Option<JsonValue>,
    pub filter: Option<JsonValue>,
}

/// Normalized pagination/sort/filter request (immutable after construction)
///
/// # Examples
///
/// ```
/// use catalog_core::{SearchInput, SearchParams};
/// use serde_json::json;
///
/// let params = SearchParams::new(SearchInput {
///     page: Some(json!("2")),
///     per_page: Some(json!(-10)),
///     sort: Some(json!("name")),
///     sort_dir: Some(json!("DESC")),
///     filter: Some(json!("")),
/// });
///
/// assert_eq!(params.page(), 2);
/// assert_eq!(params.per_page(), 15);
/// assert_eq!(params.sort(), Some("name"));
/// assert_eq!(params.filter(), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SearchParams {
    page: u64,
    per_page: u64,
    sort: Option<String>,
    sort_dir: Option<SortDirection>,
    filter: Option<String>,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self::new(SearchInput::default())
    }
}

impl SearchParams {
    /// Normalize a raw input into canonical parameters.
    ///
    /// Coercion rules:
    /// - `page`: numeric coercion; NaN, non-positive, or fractional → `1`.
    /// - `per_page`: the boolean `true` keeps the current value; otherwise
    ///   NaN, non-positive, or fractional → the default `15`.
    /// - `sort`/`filter`: null or empty string → absent; other values are
    ///   stringified.
    /// - `sort_dir`: forced absent when `sort` is absent; otherwise
    ///   lower-cased and anything but `asc`/`desc` falls back to `asc`.
    pub fn new(input: SearchInput) -> Self {
        let sort = normalize_text(input.sort);
        let sort_dir = normalize_sort_dir(sort.is_some(), input.sort_dir);

        Self {
            page: normalize_page(input.page),
            per_page: normalize_per_page(input.per_page),
            sort,
            sort_dir,
            filter: normalize_text(input.filter),
        }
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn per_page(&self) -> u64 {
        self.per_page
    }

    pub fn sort(&self) -> Option<&str> {
        self.sort.as_deref()
    }

    pub fn sort_dir(&self) -> Option<SortDirection> {
        self.sort_dir
    }

    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }
}

/// Page of entities plus pagination metadata
///
/// Echoes the normalized request fields for observability. The derived
/// [`SearchResult::last_page`] stays consistent with `total`/`per_page`
/// no matter how often the value is re-read.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult<E> {
    items: Vec<E>,
    total: u64,
    current_page: u64,
    per_page: u64,
    sort: Option<String>,
    sort_dir: Option<SortDirection>,
    filter: Option<String>,
}

impl<E> SearchResult<E> {
    /// Assemble a result page, echoing the request it answers.
    pub fn new(items: Vec<E>, total: u64, params: &SearchParams) -> Self {
        Self {
            items,
            total,
            current_page: params.page(),
            per_page: params.per_page(),
            sort: params.sort().map(str::to_string),
            sort_dir: params.sort_dir(),
            filter: params.filter().map(str::to_string),
        }
    }

    pub fn items(&self) -> &[E] {
        &self.items
    }

    pub fn into_items(self) -> Vec<E> {
        self.items
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn current_page(&self) -> u64 {
        self.current_page
    }

    pub fn per_page(&self) -> u64 {
        self.per_page
    }

    /// Number of the last page: `ceil(total / per_page)`, recomputed on
    /// every call.
    pub fn last_page(&self) -> u64 {
        self.total.div_ceil(self.per_page)
    }

    pub fn sort(&self) -> Option<&str> {
        self.sort.as_deref()
    }

    pub fn sort_dir(&self) -> Option<SortDirection> {
        self.sort_dir
    }

    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }
}

/// JS-style numeric coercion: `None` is NaN, booleans become 0/1, blank
/// strings become 0, unparseable strings and compound values are NaN.
fn coerce_number(value: &JsonValue) -> Option<f64> {
    match value {
        JsonValue::Null => Some(0.0),
        JsonValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Some(0.0)
            } else {
                trimmed.parse::<f64>().ok()
            }
        }
        _ => None,
    }
}

fn as_positive_integer(value: &JsonValue) -> Option<u64> {
    let n = coerce_number(value)?;
    if n.is_nan() || n <= 0.0 || n.fract() != 0.0 || n > u64::MAX as f64 {
        None
    } else {
        Some(n as u64)
    }
}

fn normalize_page(input: Option<JsonValue>) -> u64 {
    input.as_ref().and_then(as_positive_integer).unwrap_or(1)
}

fn normalize_per_page(input: Option<JsonValue>) -> u64 {
    match input {
        // the boolean true keeps the current value rather than coercing to 1
        Some(JsonValue::Bool(true)) => DEFAULT_PER_PAGE,
        Some(value) => as_positive_integer(&value).unwrap_or(DEFAULT_PER_PAGE),
        None => DEFAULT_PER_PAGE,
    }
}

/// Empty-to-absent normalization shared by `sort` and `filter`.
fn normalize_text(input: Option<JsonValue>) -> Option<String> {
    match input {
        None | Some(JsonValue::Null) => None,
        Some(JsonValue::String(s)) if s.is_empty() => None,
        Some(JsonValue::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    }
}

fn normalize_sort_dir(has_sort: bool, input: Option<JsonValue>) -> Option<SortDirection> {
    if !has_sort {
        return None;
    }

    let dir = match input {
        None | Some(JsonValue::Null) => String::new(),
        Some(JsonValue::String(s)) => s.to_lowercase(),
        Some(other) => other.to_string().to_lowercase(),
    };

    match dir.as_str() {
        "desc" => Some(SortDirection::Desc),
        _ => Some(SortDirection::Asc),
    }
}
