//! # Integration Tests for gapscan-api
//!
//! Tests the full router with `tower::ServiceExt::oneshot`: diagnostics,
//! OpenAPI and metrics endpoints, the multipart analyze flow (scoring
//! values, recommendation concatenation, lossy decode, error path), and the
//! listing endpoint in score-only mode.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use gapscan_api::state::AppState;

const BOUNDARY: &str = "gapscan-test-boundary";

/// Helper: build the test app with no database configured.
fn test_app() -> axum::Router {
    gapscan_api::app(AppState::new())
}

/// Helper: read response body as bytes.
async fn body_bytes(response: axum::http::Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

/// Helper: read response body as JSON.
async fn body_json(response: axum::http::Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

/// Helper: multipart body with a `file` part (and optionally `doc_title`).
fn multipart_body(file_bytes: &[u8], filename: &str, title: Option<&str>) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; \
             filename=\"{filename}\"\r\nContent-Type: text/plain\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(file_bytes);
    body.extend_from_slice(b"\r\n");
    if let Some(title) = title {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"doc_title\"\r\n\r\n{title}\r\n"
            )
            .as_bytes(),
        );
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// Helper: POST /api/analyze with a multipart body.
async fn post_analyze(app: axum::Router, body: Vec<u8>) -> axum::http::Response<Body> {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri("/api/analyze")
            .header(
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap(),
    )
    .await
    .unwrap()
}

// -- Diagnostics --------------------------------------------------------------

#[tokio::test]
async fn test_root_greeting() {
    let response = test_app()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Hello from the Gapscan backend!");
}

#[tokio::test]
async fn test_hello_greeting() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/api/hello")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Hello from the backend API!");
}

#[tokio::test]
async fn test_database_diagnostic_without_db() {
    let response = test_app()
        .oneshot(Request::builder().uri("/test").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["backend"], "running");
    assert_eq!(json["database"], "not configured");
    assert_eq!(json["connection_status"], "not connected");
    assert_eq!(json["tables"], serde_json::json!([]));
}

// -- OpenAPI & Metrics --------------------------------------------------------

#[tokio::test]
async fn test_openapi_spec_served() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/openapi.json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["paths"]["/api/analyze"].is_object());
    assert!(json["paths"]["/api/analyses"].is_object());
    assert!(json["paths"]["/test"].is_object());
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let app = test_app();

    // One recorded request so the counters have samples.
    let _ = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/hello")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/metrics")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let text = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(text.contains("gapscan_documents_analyzed_total"));
    assert!(text.contains("gapscan_http_requests_total"));
}

// -- Analyze ------------------------------------------------------------------

#[tokio::test]
async fn test_analyze_security_only_document() {
    let content = b"We use encryption and apply every patch.";
    let body = multipart_body(content, "policy.txt", None);
    let response = post_analyze(test_app(), body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["id"], serde_json::Value::Null);
    assert_eq!(json["filename"], "policy.txt");
    assert_eq!(json["size"], content.len());
    assert_eq!(json["mime_type"], "text/plain");
    assert!(json["uploaded_at"].as_str().unwrap().ends_with('Z'));

    assert_eq!(json["keyword_coverage"]["security"], 0.33);
    assert_eq!(json["keyword_coverage"]["privacy"], 0.0);
    assert_eq!(json["coverage_score"], 0.06);
    assert!(json["summary"]
        .as_str()
        .unwrap()
        .contains("a work-in-progress"));
    assert!(json["summary"]
        .as_str()
        .unwrap()
        .ends_with("Highlights: security"));

    let gaps = json["gaps"].as_array().unwrap();
    assert_eq!(gaps.len(), 5);
    assert!(!gaps.iter().any(|g| g.as_str().unwrap().contains("security")));
}

#[tokio::test]
async fn test_analyze_recommendation_concatenation() {
    // Security below 0.5, everything else absent: six advisories, five gaps,
    // two encouragements, in that order, duplication preserved.
    let body = multipart_body(b"encryption patch", "doc.txt", None);
    let response = post_analyze(test_app(), body).await;
    let json = body_json(response).await;

    let recommendations: Vec<&str> = json["recommendations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert_eq!(recommendations.len(), 13);

    // Advisories first, in fixed cluster order.
    assert!(recommendations[0].starts_with("Add a clear privacy section"));
    assert!(recommendations[5].starts_with("Explain third-party risk"));
    // Then the raw gap strings.
    assert_eq!(
        recommendations[6],
        "Missing any mention of privacy controls"
    );
    // Then the two encouragements.
    assert_eq!(
        recommendations[11],
        "Celebrate the wins: compliance keeps users safe and builds trust."
    );
    assert_eq!(
        recommendations[12],
        "We smooth the annoying bits with templates, checklists and automation."
    );

    // Gap strings appear in both lists.
    let gaps = json["gaps"].as_array().unwrap();
    for gap in gaps {
        assert!(recommendations.contains(&gap.as_str().unwrap()));
    }
}

#[tokio::test]
async fn test_analyze_full_coverage_document() {
    let mut content = String::new();
    for line in [
        "privacy personal data pii consent gdpr ccpa",
        "encryption access control key management vulnerability patch incident",
        "risk policy procedure audit control evidence",
        "retention archive delete erase data minimization",
        "training awareness onboarding annual phishing",
        "third party vendor processor subprocessor assessment",
    ] {
        content.push_str(line);
        content.push('\n');
    }
    let body = multipart_body(content.as_bytes(), "complete.txt", Some("Full program"));
    let response = post_analyze(test_app(), body).await;
    let json = body_json(response).await;

    assert_eq!(json["coverage_score"], 1.0);
    assert_eq!(json["gaps"], serde_json::json!([]));
    assert!(json["summary"].as_str().unwrap().contains("rock-solid"));
    // No advisories, no gaps: only the two encouragements remain.
    assert_eq!(json["recommendations"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_analyze_drops_invalid_utf8() {
    // Invalid bytes split a privacy marker; dropping them re-joins it.
    let body = multipart_body(b"priv\xFF\xFEacy", "garbled.bin", None);
    let response = post_analyze(test_app(), body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["keyword_coverage"]["privacy"], 0.17);
}

#[tokio::test]
async fn test_analyze_missing_file_part_is_fixed_400() {
    let body = format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"doc_title\"\r\n\r\nNo file\r\n--{BOUNDARY}--\r\n"
    )
    .into_bytes();
    let response = post_analyze(test_app(), body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"]["message"], "Unable to read uploaded file");
}

#[tokio::test]
async fn test_analyze_rejects_non_multipart() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/analyze")
                .header("content-type", "application/json")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"]["message"], "Unable to read uploaded file");
}

#[tokio::test]
async fn test_analyze_empty_file_scores_zero() {
    let body = multipart_body(b"", "empty.txt", None);
    let response = post_analyze(test_app(), body).await;
    let json = body_json(response).await;
    assert_eq!(json["coverage_score"], 0.0);
    assert_eq!(json["gaps"].as_array().unwrap().len(), 6);
    assert!(json["summary"]
        .as_str()
        .unwrap()
        .ends_with("Highlights: none yet"));
}

// -- Analyses listing ---------------------------------------------------------

#[tokio::test]
async fn test_list_analyses_without_db_is_empty() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/api/analyses?limit=5")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["items"], serde_json::json!([]));
}

#[tokio::test]
async fn test_list_analyses_default_limit() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/api/analyses")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
