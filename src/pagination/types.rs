//! Pagination types
//!
//! Envelope detection and page-count computation.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::ops::RangeInclusive;

/// How many pages follow page 1, given `total` and `per_page`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageCountPolicy {
    /// `count = total / per_page` (integer division); when `count > 1`,
    /// pages `2..=count + 1` are fetched. Over-fetches one empty page on
    /// exact multiples and fetches nothing when `total < 2 * per_page`.
    #[default]
    Floor,
    /// `count = ceil(total / per_page)`; pages `2..=count` are fetched.
    Ceil,
}

impl PageCountPolicy {
    /// Page numbers to request after page 1, in ascending order
    ///
    /// The range is empty when no extra fetch is needed. A `per_page` of
    /// zero never yields pages.
    pub fn extra_pages(self, total: u64, per_page: u64) -> RangeInclusive<u64> {
        if per_page == 0 {
            return empty_range();
        }
        match self {
            PageCountPolicy::Floor => {
                let count = total / per_page;
                if count > 1 {
                    2..=count + 1
                } else {
                    empty_range()
                }
            }
            PageCountPolicy::Ceil => {
                let count = total.div_ceil(per_page);
                if count > 1 {
                    2..=count
                } else {
                    empty_range()
                }
            }
        }
    }
}

#[allow(clippy::reversed_empty_ranges)]
fn empty_range() -> RangeInclusive<u64> {
    2..=1
}

/// Number of extra page fetches for an envelope
pub fn page_count(total: u64, per_page: u64, policy: PageCountPolicy) -> u64 {
    let pages = policy.extra_pages(total, per_page);
    if pages.is_empty() {
        0
    } else {
        pages.end() - pages.start() + 1
    }
}

/// Decoded first page of a listing
#[derive(Debug, Clone, PartialEq)]
pub struct PageEnvelope {
    /// Total number of items across all pages
    pub total: u64,
    /// Page size reported by the server, if usable
    pub per_page: Option<u64>,
    /// Items of this page
    pub data: Vec<Value>,
}

impl PageEnvelope {
    /// Whether `value` is an object carrying `total`, `per_page` and `data`
    pub fn detect(value: &Value) -> bool {
        value.as_object().is_some_and(Self::detect_map)
    }

    fn detect_map(map: &Map<String, Value>) -> bool {
        ["total", "per_page", "data"]
            .iter()
            .all(|key| map.contains_key(*key))
    }

    /// Split a paged response into its envelope, or hand the value back
    /// untouched when it is not paged
    ///
    /// A `data` that is not an array counts as an empty page.
    pub fn from_value(value: Value) -> std::result::Result<Self, Value> {
        let mut map = match value {
            Value::Object(map) if Self::detect_map(&map) => map,
            other => return Err(other),
        };

        let total = map.get("total").and_then(as_count).unwrap_or(0);
        let per_page = map.get("per_page").and_then(as_count);
        let data = match map.remove("data") {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        };

        Ok(Self {
            total,
            per_page,
            data,
        })
    }
}

/// Items carried by a later page; anything without a `data` array
/// contributes nothing
pub fn page_items(value: Value) -> Vec<Value> {
    match value {
        Value::Object(mut map) => match map.remove("data") {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

/// Non-negative integer from a JSON number or numeric string
fn as_count(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f.trunc() as u64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
