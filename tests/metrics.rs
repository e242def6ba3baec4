// tests/metrics.rs
//
// /metrics exposition after a batch run. Own test binary, so installing the
// global Prometheus recorder here does not leak into other suites.

use axum::body::{self, Body};
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use comment_sentiment_analyzer::metrics::Metrics;
use comment_sentiment_analyzer::{AnalyzerConfig, Comment, SentimentAnalyzer};

#[tokio::test]
async fn counters_show_up_after_analysis() {
    let cfg = AnalyzerConfig::default();
    let m = Metrics::global(&cfg).expect("recorder installs in a fresh process");

    let comments = vec![
        Comment::new("great video", "a", 1),
        Comment::new("bad", "b", 0),
    ];
    SentimentAnalyzer::with_config(cfg)
        .analyze_comments(comments)
        .await
        .unwrap();

    let req = Request::builder()
        .uri("/metrics")
        .body(Body::empty())
        .unwrap();
    let resp = m.router().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let bytes = body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.contains("comments_analyzed_total"), "exposition: {text}");
    assert!(text.contains("category=\"positive\""), "exposition: {text}");
    assert!(text.contains("analyzer_batch_size"), "exposition: {text}");
}
