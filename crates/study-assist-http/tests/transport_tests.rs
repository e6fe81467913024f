use serde_json::json;
use study_assist::{Transport, TransportError};
use study_assist_http::HttpTransport;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn post_sends_json_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/explain"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({ "concept": "Closures", "level": "beginner" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "success": true, "explanation": "A closure..." })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let transport = HttpTransport::new(server.uri());
    let reply = transport
        .post(
            "/api/explain",
            &json!({ "concept": "Closures", "level": "beginner" }),
        )
        .await
        .unwrap();

    assert_eq!(reply["explanation"], "A closure...");
}

#[tokio::test]
async fn server_failure_envelope_on_500_is_returned() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/quiz"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(json!({ "success": false, "error": "API key not valid" })),
        )
        .mount(&server)
        .await;

    let transport = HttpTransport::new(server.uri());
    let reply = transport.post("/api/quiz", &json!({ "topic": "Rust" })).await.unwrap();

    assert_eq!(reply, json!({ "success": false, "error": "API key not valid" }));
}

#[tokio::test]
async fn non_envelope_error_status_is_status_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/quiz"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let transport = HttpTransport::new(server.uri());
    let result = transport.post("/api/quiz", &json!({ "topic": "Rust" })).await;

    match result {
        Err(TransportError::Status { status, body }) => {
            assert_eq!(status, 502);
            assert_eq!(body, "Bad Gateway");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn non_json_body_is_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/resources"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let transport = HttpTransport::new(server.uri());
    let result = transport
        .post("/api/resources", &json!({ "topic": "Rust" }))
        .await;

    assert!(matches!(result, Err(TransportError::Decode(_))));
}

#[tokio::test]
async fn unreachable_server_is_network_error() {
    let transport = HttpTransport::new("http://127.0.0.1:1");
    let result = transport.post("/api/chat", &json!({ "message": "hi" })).await;

    assert!(matches!(result, Err(TransportError::Network(_))));
}

#[tokio::test]
async fn health_reports_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "healthy",
            "timestamp": "2026-10-17T12:00:00",
            "version": "1.0.0",
        })))
        .mount(&server)
        .await;

    let transport = HttpTransport::new(server.uri());
    let health = transport.health().await.unwrap();

    assert!(health.is_healthy());
    assert_eq!(health.version.as_deref(), Some("1.0.0"));
}

#[tokio::test]
async fn health_error_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let transport = HttpTransport::new(server.uri());
    let result = transport.health().await;

    assert!(matches!(
        result,
        Err(TransportError::Status { status: 503, .. })
    ));
}
