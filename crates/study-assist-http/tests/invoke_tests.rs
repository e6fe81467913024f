use std::sync::Arc;

use serde_json::json;
use study_assist::operation::{self, CHAT, CODE_REVIEW, QUIZ, RESOURCES, STUDY_PLAN};
use study_assist::test_support::{InMemoryRegion, inputs};
use study_assist::{ActionInvoker, InvokeError, PlainRenderer, TransportError};
use study_assist_http::HttpTransport;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn invoker_for(server: &MockServer) -> ActionInvoker<HttpTransport> {
    ActionInvoker::new(HttpTransport::new(server.uri()))
}

#[tokio::test]
async fn study_plan_round_trip() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/study-plan"))
        .and(body_json(json!({
            "topic": "Algebra",
            "duration": 14,
            "daily_hours": 1.5,
            "current_level": "beginner",
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "success": true, "study_plan": "Day 1\nReview basics" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let invoker = invoker_for(&server);
    let region = InMemoryRegion::new(STUDY_PLAN.region);

    invoker
        .invoke(
            &STUDY_PLAN,
            &inputs(&[
                ("studyTopic", "Algebra"),
                ("studyDuration", "14"),
                ("studyHours", "1.5"),
                ("currentLevel", "beginner"),
            ]),
            &region,
        )
        .await
        .unwrap();

    assert!(region.content().contains("Day 1<br>Review basics"));
    assert!(!invoker.busy().is_visible());
}

#[tokio::test]
async fn empty_required_inputs_send_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let invoker = invoker_for(&server);

    for spec in operation::catalog() {
        let region = InMemoryRegion::new(spec.region);
        let result = invoker.invoke(spec, &inputs(&[]), &region).await;

        assert!(matches!(result, Err(InvokeError::Validation(_))));
        assert!(region.content().contains(spec.missing_message));
    }
}

#[tokio::test]
async fn backend_500_failure_shows_server_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/code-review"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(json!({ "success": false, "error": "Quota exceeded" })),
        )
        .mount(&server)
        .await;

    let invoker = invoker_for(&server);
    let region = InMemoryRegion::new(CODE_REVIEW.region);

    let result = invoker
        .invoke(
            &CODE_REVIEW,
            &inputs(&[("codeInput", "fn main() {}"), ("codeLanguage", "rust")]),
            &region,
        )
        .await;

    assert_eq!(result, Err(InvokeError::Server("Quota exceeded".into())));
    assert!(region.content().contains("<p>Quota exceeded</p>"));
}

#[tokio::test]
async fn gateway_error_is_transport_fault() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/resources"))
        .respond_with(ResponseTemplate::new(502).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let invoker = invoker_for(&server).with_renderer(PlainRenderer);
    let region = InMemoryRegion::new(RESOURCES.region);

    let result = invoker
        .invoke(&RESOURCES, &inputs(&[("resourceTopic", "Rust")]), &region)
        .await;

    assert!(matches!(
        result,
        Err(InvokeError::Transport(TransportError::Status { status: 502, .. }))
    ));
    assert_eq!(region.content(), "Error: HTTP 502: upstream down\n");
}

#[tokio::test]
async fn resources_title_names_topic() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/resources"))
        .and(body_json(json!({ "topic": "Ownership", "resource_type": "books" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "success": true, "resources": "The Book" })),
        )
        .mount(&server)
        .await;

    let invoker = invoker_for(&server);
    let region = InMemoryRegion::new(RESOURCES.region);

    invoker
        .invoke(
            &RESOURCES,
            &inputs(&[("resourceTopic", "Ownership"), ("resourceType", "books")]),
            &region,
        )
        .await
        .unwrap();

    assert!(region.content().contains("Learning Resources for Ownership"));
    assert!(region.content().contains("resources-content"));
}

#[tokio::test]
async fn chat_transcript_grows_across_turns() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(body_json(json!({ "message": "Hello" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "response": "Hi",
                "timestamp": "2026-10-17T12:00:00",
            })),
        )
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(body_json(json!({ "message": "Thanks" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "success": true, "response": "Any time" })),
        )
        .mount(&server)
        .await;

    let invoker = invoker_for(&server).with_renderer(PlainRenderer);
    let region = InMemoryRegion::new(CHAT.region);

    invoker
        .invoke(&CHAT, &inputs(&[("chatInput", "Hello")]), &region)
        .await
        .unwrap();
    invoker
        .invoke(&CHAT, &inputs(&[("chatInput", "Thanks")]), &region)
        .await
        .unwrap();

    assert_eq!(
        region.entries(),
        vec![
            "You: Hello\n",
            "Assistant: Hi\n",
            "You: Thanks\n",
            "Assistant: Any time\n",
        ]
    );
}

#[tokio::test]
async fn overlapping_requests_keep_indicator_until_last_finishes() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/quiz"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "success": true, "quiz": "Q1" }))
                .set_delay(std::time::Duration::from_millis(50)),
        )
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/explain"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "success": true, "explanation": "E" }))
                .set_delay(std::time::Duration::from_millis(300)),
        )
        .mount(&server)
        .await;

    let invoker = Arc::new(invoker_for(&server));
    let busy = invoker.busy().clone();
    let mut watch = busy.subscribe();

    let slow = {
        let invoker = Arc::clone(&invoker);
        tokio::spawn(async move {
            let region = InMemoryRegion::new("explainResult");
            invoker
                .invoke(
                    &operation::EXPLAIN,
                    &inputs(&[("explainConcept", "Traits")]),
                    &region,
                )
                .await
        })
    };

    let quiz_region = InMemoryRegion::new(QUIZ.region);
    // Wait until the slow request holds the indicator before starting the fast one.
    watch.wait_for(|count| *count >= 1).await.unwrap();
    invoker
        .invoke(&QUIZ, &inputs(&[("quizTopic", "Rust")]), &quiz_region)
        .await
        .unwrap();

    assert!(busy.is_visible(), "slow request still in flight");

    slow.await.unwrap().unwrap();
    assert!(!busy.is_visible());
}
