// tests/api_http.rs
//
// HTTP-level tests for the public API Router without opening sockets.
// We exercise the router directly via tower::ServiceExt::oneshot.
//
// Covered:
// - GET /health
// - POST /analyze
// - POST /analyze/batch  (happy path, [] and null, cleanup + cap)
// - POST /analyze/top

use axum::{
    body::{self, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::json;
use serde_json::Value as Json;
use tower::ServiceExt as _; // for `oneshot`

use comment_sentiment_analyzer::{api, AnalyzerConfig};

const BODY_LIMIT: usize = 1024 * 1024; // 1MB, safe for tests

/// Build the same Router the binary uses (minus env-resolved config).
fn test_router() -> Router {
    api::create_router(AnalyzerConfig::default())
}

async fn post_json(uri: &str, payload: String) -> (StatusCode, Json) {
    post_json_to(test_router(), uri, payload).await
}

async fn post_json_to(router: Router, uri: &str, payload: String) -> (StatusCode, Json) {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(payload))
        .expect("build POST");

    let resp = router.oneshot(req).await.expect("oneshot");
    let status = resp.status();
    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read body")
        .to_vec();
    let v: Json = serde_json::from_slice(&bytes).expect("parse json");
    (status, v)
}

#[tokio::test]
async fn api_health_returns_200_and_ok_body() {
    let req = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .expect("build GET /health");

    let resp = test_router().oneshot(req).await.expect("oneshot /health");
    assert_eq!(resp.status(), StatusCode::OK, "health should be 200");

    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read body")
        .to_vec();
    assert_eq!(String::from_utf8(bytes).expect("utf8").trim(), "OK");
}

#[tokio::test]
async fn api_analyze_returns_sentiment_fields() {
    let payload = json!({ "text": "This video is absolutely amazing, I love it!" });
    let (status, v) = post_json("/analyze", payload.to_string()).await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(v["category"], "positive");
    assert!(v["score"].as_f64().unwrap() > 0.05);
    assert!(v["confidence"].as_f64().unwrap() > 0.1);
    assert!(v["reasoning"].as_array().unwrap().len() <= 3);
    assert_eq!(v["details"]["positive_words"], 2);
}

#[tokio::test]
async fn api_batch_returns_buckets_summary_and_details() {
    let items = json!([
        { "text": "Great job, keep it up!", "author": "ann", "likes": 12 },
        { "text": "bad", "author": "bob", "likes": "1.2K" },
        { "text": "meh, whatever", "author": "cid" },
        { "text": "  <br> " }
    ]);
    let (status, v) = post_json("/analyze/batch", items.to_string()).await;
    assert_eq!(status, StatusCode::OK, "body: {v}");

    // the blank comment is dropped before scoring
    assert_eq!(v["total"], 3);
    for key in ["positive", "negative", "neutral", "other"] {
        assert!(v[key].is_array(), "missing bucket '{key}'");
    }
    assert_eq!(v["summary"]["positive"], 1);
    assert_eq!(v["summary"]["negative"], 1);
    assert_eq!(v["summary"]["other"], 1);
    assert_eq!(v["summary"]["positive_percent"], 33);
    assert_eq!(v["negative"][0]["likes"], 1200);
    assert!(v["analysis_details"]["processing_time_ms"].is_u64());

    // flattened comment + attached sentiment
    let first = &v["positive"][0];
    assert_eq!(first["author"], "ann");
    assert_eq!(first["likes"], 12);
    assert_eq!(first["sentiment"]["category"], "positive");
}

#[tokio::test]
async fn api_batch_rejects_empty_and_null() {
    for body in ["[]", "null", r#"[{"text":"   "}]"#] {
        let (status, v) = post_json("/analyze/batch", body.to_string()).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "body {body}");
        assert_eq!(v["error"], "no comments provided for analysis");
    }
}

#[tokio::test]
async fn api_top_filters_by_category() {
    let items = json!([
        { "text": "really good video, well done", "author": "ann", "likes": 3 },
        { "text": "really good video, well done", "author": "bob", "likes": 9000 },
        { "text": "what a waste of time, terrible", "likes": 50000 }
    ]);
    let (status, v) = post_json("/analyze/top?category=positive&count=1", items.to_string()).await;
    assert_eq!(status, StatusCode::OK, "body: {v}");
    let arr = v.as_array().unwrap();
    assert_eq!(arr.len(), 1);
    assert_eq!(arr[0]["index"], 1);

    let (status, v) = post_json("/analyze/top?category=mixed", items.to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(v["error"].as_str().unwrap().contains("mixed"));
}

#[tokio::test]
async fn api_batch_caps_and_dedups_posted_comments() {
    let cfg = AnalyzerConfig {
        max_comments: 50,
        ..AnalyzerConfig::default()
    };
    let mut items: Vec<Json> = (0..60)
        .map(|i| json!({ "text": format!("comment number {i}"), "author": "ann" }))
        .collect();
    // duplicate of the first one, same text and author
    items.insert(1, json!({ "text": "comment number 0", "author": "ann", "likes": 7 }));

    let (status, v) = post_json_to(
        api::create_router(cfg),
        "/analyze/batch",
        Json::Array(items).to_string(),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "body: {v}");
    assert_eq!(v["total"], 50);
    let duplicates = ["positive", "negative", "neutral", "other"]
        .iter()
        .flat_map(|k| v[*k].as_array().unwrap().iter())
        .filter(|c| c["likes"] == 7)
        .count();
    assert_eq!(duplicates, 0, "first copy wins");
}
