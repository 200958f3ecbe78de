//! Tests for pagination module

use super::*;
use crate::endpoint::Endpoint;
use crate::error::{Error, Result};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use test_case::test_case;

// ============================================================================
// Fake fetcher
// ============================================================================

/// Serves `data: [page * 100 + i]` style pages with optional per-page
/// delays and failures, and records every page requested.
#[derive(Default)]
struct FakeFetcher {
    per_page: usize,
    delays: HashMap<u64, Duration>,
    failures: HashMap<u64, u16>,
    bodies: HashMap<u64, Value>,
    requested: Mutex<Vec<u64>>,
}

impl FakeFetcher {
    fn new(per_page: usize) -> Self {
        Self {
            per_page,
            ..Self::default()
        }
    }

    fn delay(mut self, page: u64, ms: u64) -> Self {
        self.delays.insert(page, Duration::from_millis(ms));
        self
    }

    fn fail(mut self, page: u64, status: u16) -> Self {
        self.failures.insert(page, status);
        self
    }

    fn body(mut self, page: u64, body: Value) -> Self {
        self.bodies.insert(page, body);
        self
    }

    fn requested(&self) -> Vec<u64> {
        let mut pages = self.requested.lock().unwrap().clone();
        pages.sort_unstable();
        pages
    }
}

fn page_data(page: u64, len: usize) -> Vec<Value> {
    (0..len as u64).map(|i| json!(page * 100 + i)).collect()
}

#[async_trait]
impl PageFetcher for FakeFetcher {
    async fn fetch_page(&self, _endpoint: &Endpoint, page: u64) -> Result<Value> {
        self.requested.lock().unwrap().push(page);
        if let Some(delay) = self.delays.get(&page) {
            tokio::time::sleep(*delay).await;
        }
        if let Some(status) = self.failures.get(&page) {
            return Err(Error::api(*status, format!("page {page} failed")));
        }
        if let Some(body) = self.bodies.get(&page) {
            return Ok(body.clone());
        }
        Ok(json!({
            "page": page,
            "data": page_data(page, self.per_page),
        }))
    }
}

fn envelope(total: u64, per_page: u64, len: usize) -> Value {
    json!({
        "total": total,
        "per_page": per_page,
        "page": 1,
        "data": page_data(1, len),
    })
}

fn endpoint() -> Endpoint {
    Endpoint::get("/me/videos").fields(["uri", "name"])
}

// ============================================================================
// Page count
// ============================================================================

#[test_case(130, 25, PageCountPolicy::Floor => vec![2, 3, 4, 5, 6] ; "floor 130 over 25")]
#[test_case(100, 25, PageCountPolicy::Floor => vec![2, 3, 4, 5] ; "floor exact multiple")]
#[test_case(30, 25, PageCountPolicy::Floor => Vec::<u64>::new() ; "floor single quotient")]
#[test_case(25, 25, PageCountPolicy::Floor => Vec::<u64>::new() ; "floor one page")]
#[test_case(0, 25, PageCountPolicy::Floor => Vec::<u64>::new() ; "floor empty listing")]
#[test_case(130, 25, PageCountPolicy::Ceil => vec![2, 3, 4, 5, 6] ; "ceil 130 over 25")]
#[test_case(100, 25, PageCountPolicy::Ceil => vec![2, 3, 4] ; "ceil exact multiple")]
#[test_case(30, 25, PageCountPolicy::Ceil => vec![2] ; "ceil partial second page")]
#[test_case(10, 0, PageCountPolicy::Ceil => Vec::<u64>::new() ; "zero page size")]
fn test_extra_pages(total: u64, per_page: u64, policy: PageCountPolicy) -> Vec<u64> {
    policy.extra_pages(total, per_page).collect()
}

#[test]
fn test_page_count() {
    assert_eq!(page_count(130, 25, PageCountPolicy::Floor), 5);
    assert_eq!(page_count(100, 25, PageCountPolicy::Floor), 4);
    assert_eq!(page_count(100, 25, PageCountPolicy::Ceil), 3);
    assert_eq!(page_count(20, 25, PageCountPolicy::Ceil), 0);
}

#[test]
fn test_policy_serde() {
    let policy: PageCountPolicy = serde_json::from_value(json!("ceil")).unwrap();
    assert_eq!(policy, PageCountPolicy::Ceil);
    assert_eq!(PageCountPolicy::default(), PageCountPolicy::Floor);
}

// ============================================================================
// Envelope detection
// ============================================================================

#[test_case(json!({"total": 1, "per_page": 25, "data": []}) => true ; "full envelope")]
#[test_case(json!({"total": 1, "data": []}) => false ; "missing per_page")]
#[test_case(json!({"per_page": 25, "data": []}) => false ; "missing total")]
#[test_case(json!({"total": 1, "per_page": 25}) => false ; "missing data")]
#[test_case(json!({"total": 1, "per_page": 25, "data": {}}) => true ; "data not an array")]
#[test_case(json!([1, 2, 3]) => false ; "array")]
#[test_case(json!(true) => false ; "boolean")]
#[test_case(json!("text") => false ; "string")]
fn test_detect(value: Value) -> bool {
    PageEnvelope::detect(&value)
}

#[test]
fn test_envelope_lenient_numbers() {
    let envelope = PageEnvelope::from_value(json!({
        "total": "130",
        "per_page": null,
        "data": [1]
    }))
    .unwrap();
    assert_eq!(envelope.total, 130);
    assert_eq!(envelope.per_page, None);
    assert_eq!(envelope.data, vec![json!(1)]);
}

#[test]
fn test_envelope_with_non_array_data_is_empty_page() {
    let envelope = PageEnvelope::from_value(json!({
        "total": 0,
        "per_page": 25,
        "data": null
    }))
    .unwrap();
    assert_eq!(envelope.data, Vec::<Value>::new());
}

#[test]
fn test_page_items_without_data() {
    assert_eq!(page_items(json!({"page": 4})), Vec::<Value>::new());
    assert_eq!(page_items(json!(null)), Vec::<Value>::new());
    assert_eq!(page_items(json!({"data": [1, 2]})), vec![json!(1), json!(2)]);
}

// ============================================================================
// Aggregation
// ============================================================================

#[tokio::test]
async fn test_non_envelope_is_identity() {
    let fetcher = FakeFetcher::new(25);
    let aggregator = Aggregator::new();

    for value in [
        json!({"name": "me", "uri": "/users/1"}),
        json!({"total": 5, "data": [1]}),
        json!(true),
        json!(null),
    ] {
        let result = aggregator
            .aggregate(value.clone(), &endpoint(), &fetcher)
            .await
            .unwrap();
        assert_eq!(result, value);
    }
    assert!(fetcher.requested().is_empty());
}

#[tokio::test]
async fn test_first_page_with_non_array_data_still_fans_out() {
    let fetcher = FakeFetcher::new(25);
    let first = json!({"total": 75, "per_page": 25, "data": {"unexpected": true}});

    let result = Aggregator::new()
        .aggregate(first, &endpoint(), &fetcher)
        .await
        .unwrap();

    assert_eq!(fetcher.requested(), vec![2, 3, 4]);
    let expected: Vec<Value> = (2..=4).flat_map(|page| page_data(page, 25)).collect();
    assert_eq!(result, Value::Array(expected));
}

#[tokio::test]
async fn test_single_page_returns_data_without_fetching() {
    let fetcher = FakeFetcher::new(25);
    let result = Aggregator::new()
        .aggregate(envelope(20, 25, 20), &endpoint(), &fetcher)
        .await
        .unwrap();

    assert_eq!(result, Value::Array(page_data(1, 20)));
    assert!(fetcher.requested().is_empty());
}

#[tokio::test]
async fn test_merges_in_page_order_despite_arrival_order() {
    // Later pages answer first
    let fetcher = FakeFetcher::new(25)
        .delay(2, 120)
        .delay(3, 90)
        .delay(4, 60)
        .delay(5, 30);

    let result = Aggregator::new()
        .aggregate(envelope(130, 25, 25), &endpoint(), &fetcher)
        .await
        .unwrap();

    assert_eq!(fetcher.requested(), vec![2, 3, 4, 5, 6]);

    let expected: Vec<Value> = (1..=6).flat_map(|page| page_data(page, 25)).collect();
    assert_eq!(result, Value::Array(expected));
}

#[tokio::test]
async fn test_floor_fetches_extra_page_on_exact_multiple() {
    let fetcher = FakeFetcher::new(25).body(5, json!({"data": [], "page": 5}));

    let result = Aggregator::new()
        .aggregate(envelope(100, 25, 25), &endpoint(), &fetcher)
        .await
        .unwrap();

    assert_eq!(fetcher.requested(), vec![2, 3, 4, 5]);
    assert_eq!(result.as_array().map(Vec::len), Some(100));
}

#[tokio::test]
async fn test_ceil_policy() {
    let fetcher = FakeFetcher::new(25);

    let result = Aggregator::new()
        .with_policy(PageCountPolicy::Ceil)
        .aggregate(envelope(100, 25, 25), &endpoint(), &fetcher)
        .await
        .unwrap();

    assert_eq!(fetcher.requested(), vec![2, 3, 4]);
    assert_eq!(result.as_array().map(Vec::len), Some(100));
}

#[tokio::test]
async fn test_default_per_page_when_envelope_has_none() {
    let fetcher = FakeFetcher::new(10);
    let first = json!({
        "total": 30,
        "per_page": null,
        "data": page_data(1, 10),
    });

    let result = Aggregator::new()
        .with_default_per_page(10)
        .aggregate(first, &endpoint(), &fetcher)
        .await
        .unwrap();

    assert_eq!(fetcher.requested(), vec![2, 3, 4]);
    assert_eq!(result.as_array().map(Vec::len), Some(40));
}

#[tokio::test]
async fn test_page_failure_fails_whole_aggregate() {
    let fetcher = FakeFetcher::new(25).fail(3, 500);

    let err = Aggregator::new()
        .aggregate(envelope(130, 25, 25), &endpoint(), &fetcher)
        .await
        .unwrap_err();

    // Every page was still requested; nothing was returned early
    assert_eq!(fetcher.requested(), vec![2, 3, 4, 5, 6]);
    assert!(matches!(err, Error::Aggregation { page: 3, .. }));
    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn test_lowest_failing_page_is_reported() {
    // Page 5 fails first in time, page 2 fails later
    let fetcher = FakeFetcher::new(25)
        .fail(2, 404)
        .delay(2, 80)
        .fail(5, 503);

    let err = Aggregator::new()
        .aggregate(envelope(130, 25, 25), &endpoint(), &fetcher)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Aggregation { page: 2, .. }));
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn test_page_timeout() {
    let fetcher = FakeFetcher::new(25).delay(4, 500);

    let err = Aggregator::new()
        .with_page_timeout(Duration::from_millis(50))
        .aggregate(envelope(130, 25, 25), &endpoint(), &fetcher)
        .await
        .unwrap_err();

    match err {
        Error::Aggregation { page, source } => {
            assert_eq!(page, 4);
            assert!(matches!(*source, Error::Timeout { timeout_ms: 50 }));
        }
        other => panic!("expected aggregation error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_concurrency_of_one_still_merges_everything() {
    let fetcher = FakeFetcher::new(25);

    let result = Aggregator::new()
        .with_max_concurrency(1)
        .aggregate(envelope(130, 25, 25), &endpoint(), &fetcher)
        .await
        .unwrap();

    assert_eq!(result.as_array().map(Vec::len), Some(150));
}

#[tokio::test]
async fn test_pages_without_data_contribute_nothing() {
    let fetcher = FakeFetcher::new(25).body(3, json!({"error": "gone"}));

    let result = Aggregator::new()
        .aggregate(envelope(80, 25, 25), &endpoint(), &fetcher)
        .await
        .unwrap();

    let expected: Vec<Value> = [1, 2, 4].into_iter().flat_map(|p| page_data(p, 25)).collect();
    assert_eq!(result, Value::Array(expected));
}

#[tokio::test]
async fn test_from_config() {
    let config = crate::config::VimeoConfig {
        per_page: 50,
        page_count_policy: PageCountPolicy::Ceil,
        ..Default::default()
    };
    let fetcher = FakeFetcher::new(50);
    let first = json!({
        "total": 120,
        "per_page": null,
        "data": page_data(1, 50),
    });

    let result = Aggregator::from_config(&config)
        .aggregate(first, &endpoint(), &fetcher)
        .await
        .unwrap();

    // ceil(120 / 50) = 3 pages in total
    assert_eq!(fetcher.requested(), vec![2, 3]);
    assert_eq!(result.as_array().map(Vec::len), Some(150));
}
