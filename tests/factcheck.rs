//! End-to-end tests for the factcheck bridge against a mock classification service.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde_json::{json, Value};

use defake_gateway::Shutdown;

mod common;

/// Mock service that fails `failures` times with 503, then answers `body`.
async fn flaky_backend(failures: u32, body: Value) -> (std::net::SocketAddr, Arc<AtomicU32>) {
    let calls = Arc::new(AtomicU32::new(0));
    let cc = calls.clone();
    let body = body.to_string();
    let addr = common::start_programmable_backend(move || {
        let cc = cc.clone();
        let body = body.clone();
        async move {
            let count = cc.fetch_add(1, Ordering::SeqCst);
            if count < failures {
                (503, r#"{"error":"waking up"}"#.to_string())
            } else {
                (200, body)
            }
        }
    })
    .await;
    (addr, calls)
}

#[tokio::test]
async fn test_succeeds_after_service_wakes_up() {
    let (backend, calls) = flaky_backend(2, json!({ "label": "real", "confidence": 85 })).await;
    let shutdown = Shutdown::new();
    let base = common::start_gateway(common::gateway_config(backend, 3, 100), shutdown.clone()).await;

    let start = Instant::now();
    let res = common::http_client()
        .post(format!("{}/factcheck", base))
        .json(&json!({ "text": "New AI model improves healthcare diagnosis" }))
        .send()
        .await
        .expect("gateway unreachable");

    assert_eq!(res.status(), 200);
    assert!(start.elapsed() >= Duration::from_millis(200));
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({ "label": "real", "confidence": 85 }));
    assert_eq!(calls.load(Ordering::SeqCst), 3);

    shutdown.trigger();
}

#[tokio::test]
async fn test_exhaustion_returns_500_with_details() {
    let (backend, calls) = flaky_backend(u32::MAX, json!({})).await;
    let shutdown = Shutdown::new();
    let base = common::start_gateway(common::gateway_config(backend, 2, 50), shutdown.clone()).await;

    let start = Instant::now();
    let res = common::http_client()
        .post(format!("{}/factcheck", base))
        .json(&json!({ "text": "Aliens landed in Paris" }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 500);
    assert!(start.elapsed() >= Duration::from_millis(50));
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "Classification service unavailable");
    let details = body["details"].as_str().unwrap();
    assert!(details.contains("after 2 attempts"), "details: {}", details);
    assert!(details.contains("503"), "details: {}", details);
    assert_eq!(calls.load(Ordering::SeqCst), 2);

    shutdown.trigger();
}

#[tokio::test]
async fn test_missing_text_never_reaches_service() {
    let (backend, calls) = flaky_backend(0, json!({ "prediction": "Real News" })).await;
    let shutdown = Shutdown::new();
    let base = common::start_gateway(common::gateway_config(backend, 3, 10), shutdown.clone()).await;
    let client = common::http_client();

    for payload in [json!({ "text": "" }), json!({ "text": "   " }), json!({})] {
        let res = client
            .post(format!("{}/factcheck", base))
            .json(&payload)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), 400);
        let body: Value = res.json().await.unwrap();
        assert_eq!(body["error"], "No text provided");
    }
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    shutdown.trigger();
}

#[tokio::test]
async fn test_legacy_field_name_accepted() {
    let (backend, calls) = flaky_backend(0, json!({ "prediction": "Fake News" })).await;
    let shutdown = Shutdown::new();
    let base = common::start_gateway(common::gateway_config(backend, 3, 10), shutdown.clone()).await;

    let res = common::http_client()
        .post(format!("{}/factcheck", base))
        .json(&json!({ "newsInput": "Chocolate causes immortality" }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["prediction"], "Fake News");
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    shutdown.trigger();
}

#[tokio::test]
async fn test_success_status_with_error_body_is_passed_through() {
    let (backend, calls) = flaky_backend(0, json!({ "error": "Analysis failed" })).await;
    let shutdown = Shutdown::new();
    let base = common::start_gateway(common::gateway_config(backend, 3, 10), shutdown.clone()).await;

    let res = common::http_client()
        .post(format!("{}/factcheck", base))
        .json(&json!({ "text": "UN discusses global peace resolution" }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({ "error": "Analysis failed" }));
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    shutdown.trigger();
}

#[tokio::test]
async fn test_malformed_body_is_retried() {
    let calls = Arc::new(AtomicU32::new(0));
    let cc = calls.clone();
    let backend = common::start_programmable_backend(move || {
        let cc = cc.clone();
        async move {
            if cc.fetch_add(1, Ordering::SeqCst) == 0 {
                (200, "<html>starting</html>".to_string())
            } else {
                (200, r#"{"prediction":"Real News","confidence":77.5}"#.to_string())
            }
        }
    })
    .await;
    let shutdown = Shutdown::new();
    let base = common::start_gateway(common::gateway_config(backend, 3, 10), shutdown.clone()).await;

    let res = common::http_client()
        .post(format!("{}/factcheck", base))
        .json(&json!({ "text": "India launches new satellite successfully" }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 200);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["confidence"], 77.5);
    assert_eq!(calls.load(Ordering::SeqCst), 2);

    shutdown.trigger();
}

#[tokio::test]
async fn test_unreachable_service_exhausts() {
    let backend = common::closed_addr().await;
    let shutdown = Shutdown::new();
    let base = common::start_gateway(common::gateway_config(backend, 2, 20), shutdown.clone()).await;

    let res = common::http_client()
        .post(format!("{}/factcheck", base))
        .json(&json!({ "text": "Global warming affects ocean levels" }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 500);
    let body: Value = res.json().await.unwrap();
    assert!(body["details"].as_str().unwrap().contains("transport error"));

    shutdown.trigger();
}

#[tokio::test]
async fn test_shutdown_cancels_in_flight_retries() {
    let (backend, calls) = flaky_backend(u32::MAX, json!({})).await;
    let shutdown = Shutdown::new();
    let base = common::start_gateway(
        common::gateway_config(backend, 8, 10_000),
        shutdown.clone(),
    )
    .await;

    let trigger = shutdown.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(300)).await;
        trigger.trigger();
    });

    let start = Instant::now();
    let res = common::http_client()
        .post(format!("{}/factcheck", base))
        .json(&json!({ "text": "Panic in Pakistan as India Vows to Cut Off Water Supply Over Kashmir" }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 503);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "Request cancelled");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(start.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn test_check_news_endpoint() {
    let backend = common::closed_addr().await;
    let shutdown = Shutdown::new();
    let base = common::start_gateway(common::gateway_config(backend, 1, 0), shutdown.clone()).await;
    let client = common::http_client();

    let res = client
        .post(format!("{}/check-news", base))
        .json(&json!({ "newsInput": "global warming affects ocean levels" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["score"], 85);
    assert_eq!(body["message"], "This news appears to be REAL.");

    let res = client
        .post(format!("{}/check-news", base))
        .json(&json!({ "newsInput": "" }))
        .send()
        .await
        .unwrap();
    let body: Value = res.json().await.unwrap();
    assert!(body["score"].is_null());

    shutdown.trigger();
}

#[tokio::test]
async fn test_client_disconnect_stops_retries() {
    let (backend, calls) = flaky_backend(u32::MAX, json!({})).await;
    let shutdown = Shutdown::new();
    let base = common::start_gateway(common::gateway_config(backend, 50, 200), shutdown.clone()).await;

    let request = tokio::spawn(async move {
        common::http_client()
            .post(format!("{}/factcheck", base))
            .json(&json!({ "text": "Aliens landed in Paris" }))
            .send()
            .await
    });

    tokio::time::sleep(Duration::from_millis(450)).await;
    request.abort();
    let _ = request.await;

    // Let the server notice the closed connection, then make sure no more calls go out.
    tokio::time::sleep(Duration::from_millis(300)).await;
    let after_disconnect = calls.load(Ordering::SeqCst);
    assert!(after_disconnect >= 1 && after_disconnect < 50);

    tokio::time::sleep(Duration::from_millis(800)).await;
    assert_eq!(calls.load(Ordering::SeqCst), after_disconnect);

    shutdown.trigger();
}

#[tokio::test]
async fn test_request_timeout_stops_retries() {
    let (backend, calls) = flaky_backend(u32::MAX, json!({})).await;
    let mut config = common::gateway_config(backend, 8, 700);
    config.timeouts.request_secs = 1;
    let shutdown = Shutdown::new();
    let base = common::start_gateway(config, shutdown.clone()).await;

    let res = common::http_client()
        .post(format!("{}/factcheck", base))
        .json(&json!({ "text": "Cure for cancer found in potato" }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 408);
    let at_timeout = calls.load(Ordering::SeqCst);
    assert_eq!(at_timeout, 2);

    tokio::time::sleep(Duration::from_millis(1500)).await;
    assert_eq!(calls.load(Ordering::SeqCst), at_timeout);

    shutdown.trigger();
}
