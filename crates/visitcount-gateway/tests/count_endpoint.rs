//! `/count` HTTP contract, driven in-process through the router.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use chrono::NaiveDate;
use tower::ServiceExt;

use visitcount_core::clock::FixedClock;
use visitcount_core::error::{CountError, Result};
use visitcount_core::store::{KvStore, MemoryStore, PutOptions};
use visitcount_gateway::{app_state::AppState, config::CounterConfig, router::build_router};

struct Harness {
    app: Router,
    clock: Arc<FixedClock>,
    store: Arc<MemoryStore>,
}

fn harness(allowed_origins: &str) -> Harness {
    let mut cfg = CounterConfig::default();
    cfg.counter.allowed_origins = allowed_origins.into();
    let store = Arc::new(MemoryStore::new());
    let clock = Arc::new(FixedClock::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()));
    let state = AppState::new(cfg, store.clone(), clock.clone());
    Harness { app: build_router(state), clock, store }
}

async fn send(app: &Router, method: Method, uri: &str, headers: &[(&str, &str)]) -> Response {
    let mut req = Request::builder().method(method).uri(uri);
    for (k, v) in headers {
        req = req.header(*k, *v);
    }
    app.clone().oneshot(req.body(Body::empty()).unwrap()).await.unwrap()
}

async fn total_of(resp: Response) -> u64 {
    assert_eq!(resp.status(), StatusCode::OK);
    let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let v: serde_json::Value = serde_json::from_slice(&body).unwrap();
    v["total"].as_u64().expect("total must be an integer")
}

fn header_of<'a>(resp: &'a Response, name: header::HeaderName) -> Option<&'a str> {
    resp.headers().get(name).map(|v| v.to_str().unwrap())
}

#[tokio::test]
async fn daily_dedup_scenario() {
    let h = harness("");
    let ip = [("cf-connecting-ip", "1.2.3.4")];

    assert_eq!(total_of(send(&h.app, Method::GET, "/count", &ip).await).await, 9001);
    assert_eq!(total_of(send(&h.app, Method::GET, "/count", &ip).await).await, 9001);

    h.clock.advance_days(1);
    assert_eq!(total_of(send(&h.app, Method::GET, "/count", &ip).await).await, 9002);
}

#[tokio::test]
async fn success_headers() {
    let h = harness("https://a.com,https://b.com");
    let resp = send(&h.app, Method::GET, "/count", &[("origin", "https://a.com")]).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(header_of(&resp, header::CONTENT_TYPE), Some("application/json"));
    assert_eq!(header_of(&resp, header::CACHE_CONTROL), Some("no-store"));
    assert_eq!(header_of(&resp, header::ACCESS_CONTROL_ALLOW_ORIGIN), Some("https://a.com"));
    assert_eq!(header_of(&resp, header::ACCESS_CONTROL_ALLOW_METHODS), Some("GET,OPTIONS"));
    assert_eq!(header_of(&resp, header::ACCESS_CONTROL_ALLOW_HEADERS), Some("Content-Type"));
    assert_eq!(header_of(&resp, header::ACCESS_CONTROL_MAX_AGE), Some("86400"));
}

#[tokio::test]
async fn unlisted_origin_gets_first_configured() {
    let h = harness("https://a.com,https://b.com");
    let resp = send(&h.app, Method::GET, "/count", &[("origin", "https://evil.com")]).await;
    assert_eq!(header_of(&resp, header::ACCESS_CONTROL_ALLOW_ORIGIN), Some("https://a.com"));

    let resp = send(&h.app, Method::GET, "/count", &[("origin", "https://b.com")]).await;
    assert_eq!(header_of(&resp, header::ACCESS_CONTROL_ALLOW_ORIGIN), Some("https://b.com"));
}

#[tokio::test]
async fn preflight_on_any_path() {
    let h = harness("https://a.com");

    for path in ["/count", "/elsewhere"] {
        let resp = send(&h.app, Method::OPTIONS, path, &[("origin", "https://evil.com")]).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
        assert_eq!(
            header_of(&resp, header::ACCESS_CONTROL_ALLOW_ORIGIN),
            Some("https://evil.com")
        );
        assert_eq!(header_of(&resp, header::ACCESS_CONTROL_MAX_AGE), Some("86400"));
        let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        assert!(body.is_empty());
    }

    // Preflight never touches the store.
    assert!(h.store.is_empty());
}

#[tokio::test]
async fn preflight_without_origin_falls_back() {
    let h = harness("https://a.com");
    let resp = send(&h.app, Method::OPTIONS, "/count", &[]).await;
    assert_eq!(header_of(&resp, header::ACCESS_CONTROL_ALLOW_ORIGIN), Some("https://a.com"));

    let h = harness("");
    let resp = send(&h.app, Method::OPTIONS, "/count", &[]).await;
    assert_eq!(
        header_of(&resp, header::ACCESS_CONTROL_ALLOW_ORIGIN),
        Some("https://sc-sk.com")
    );
}

#[tokio::test]
async fn unknown_path_is_404_for_any_method() {
    let h = harness("https://a.com");

    for method in [Method::GET, Method::POST, Method::DELETE] {
        let resp = send(&h.app, method, "/counts", &[("origin", "https://a.com")]).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert!(resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
        let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"Not found");
    }
}

#[tokio::test]
async fn any_method_on_count_is_counted() {
    let h = harness("");
    let resp = send(&h.app, Method::POST, "/count", &[("x-forwarded-for", "5.6.7.8")]).await;
    assert_eq!(total_of(resp).await, 9001);
}

#[tokio::test]
async fn visitor_identity_precedence() {
    let h = harness("");

    let both = [("cf-connecting-ip", "1.1.1.1"), ("x-forwarded-for", "2.2.2.2")];
    assert_eq!(total_of(send(&h.app, Method::GET, "/count", &both).await).await, 9001);
    assert!(h.store.get("v:2024-01-01:1.1.1.1").await.unwrap().is_some());
    assert!(h.store.get("v:2024-01-01:2.2.2.2").await.unwrap().is_none());

    // No headers at all: everyone is 0.0.0.0.
    assert_eq!(total_of(send(&h.app, Method::GET, "/count", &[]).await).await, 9002);
    assert_eq!(total_of(send(&h.app, Method::GET, "/count", &[]).await).await, 9002);
    assert!(h.store.get("v:2024-01-01:0.0.0.0").await.unwrap().is_some());
}

#[tokio::test]
async fn malformed_stored_total_recovers() {
    let h = harness("");
    h.store
        .put("total", "garbage".into(), PutOptions::default())
        .await
        .unwrap();

    let resp = send(&h.app, Method::GET, "/count", &[("cf-connecting-ip", "1.2.3.4")]).await;
    assert_eq!(total_of(resp).await, 9001);
}

#[tokio::test]
async fn repeated_forwarded_for_lines_form_one_identity() {
    let h = harness("");
    let xff = [("x-forwarded-for", "1.1.1.1"), ("x-forwarded-for", "2.2.2.2")];

    assert_eq!(total_of(send(&h.app, Method::GET, "/count", &xff).await).await, 9001);
    assert!(h.store.get("v:2024-01-01:1.1.1.1, 2.2.2.2").await.unwrap().is_some());
    assert!(h.store.get("v:2024-01-01:1.1.1.1").await.unwrap().is_none());

    // A single line carrying the same list is the same visitor.
    let single = [("x-forwarded-for", "1.1.1.1, 2.2.2.2")];
    assert_eq!(total_of(send(&h.app, Method::GET, "/count", &single).await).await, 9001);
}

struct UnavailableStore;

#[async_trait]
impl KvStore for UnavailableStore {
    async fn get(&self, _key: &str) -> Result<Option<String>> {
        Err(CountError::Store("backend unavailable".into()))
    }
    async fn put(&self, _key: &str, _value: String, _opts: PutOptions) -> Result<()> {
        Err(CountError::Store("backend unavailable".into()))
    }
}

#[tokio::test]
async fn store_fault_is_a_bare_500() {
    let clock = Arc::new(FixedClock::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()));
    let state = AppState::new(CounterConfig::default(), Arc::new(UnavailableStore), clock);
    let app = build_router(state);

    let resp = send(&app, Method::GET, "/count", &[("cf-connecting-ip", "1.2.3.4")]).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_ne!(header_of(&resp, header::CONTENT_TYPE), Some("application/json"));
    assert!(resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
    let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&body[..], b"Internal Server Error");
}
