//! End-to-end pipeline test: fetch a definition over HTTP, run an
//! attempt through the session host, and verify the submission lands
//! back on the portal.

use std::sync::Arc;

use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use mockexam_client::{AttemptSession, PortalClient, SessionCommand};
use mockexam_core::traits::TestSource;

fn definition_body() -> serde_json::Value {
    serde_json::json!({
        "id": "e2e-test",
        "title": "End to End",
        "durationSeconds": 600,
        "passingMarks": 2,
        "questions": [
            {"text": "Q1", "options": ["a", "b"], "correctOptionIndex": 0},
            {"text": "Q2", "options": ["a", "b", "c"], "correctOptionIndex": 2, "marks": 2},
            {"text": "Q3", "options": ["a", "b"], "correctOptionIndex": 1}
        ]
    })
}

#[tokio::test]
async fn fetch_attempt_submit_roundtrip() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/mock-tests/e2e-test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(definition_body()))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/mock-tests/e2e-test/attempts"))
        .and(body_partial_json(serde_json::json!({
            "testId": "e2e-test",
            "obtainedMarks": 3,
            "percentage": 75,
            "passed": true,
            "answers": {"0": 0, "1": 2}
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let client = Arc::new(PortalClient::new(&server.uri(), None));
    let definition = client.fetch_test("e2e-test").await.unwrap();

    let session = AttemptSession::start(definition, Some(client)).unwrap();
    session
        .send(SessionCommand::Answer {
            question: 0,
            option: 0,
        })
        .await;
    session
        .send(SessionCommand::Answer {
            question: 1,
            option: 2,
        })
        .await;
    session.send(SessionCommand::Submit).await;

    let result = session.finish().await.unwrap();
    assert_eq!(result.correct_count, 2);
    assert_eq!(result.unanswered_count, 1);
    assert_eq!(result.obtained_marks, 3);
    assert_eq!(result.percentage, 75);
    assert!(result.passed);

    server.verify().await;
}

#[tokio::test]
async fn failed_delivery_does_not_fail_the_attempt() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/mock-tests/e2e-test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(definition_body()))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/mock-tests/e2e-test/attempts"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = Arc::new(PortalClient::new(&server.uri(), None));
    let definition = client.fetch_test("e2e-test").await.unwrap();

    let session = AttemptSession::start(definition, Some(client)).unwrap();
    session.send(SessionCommand::Submit).await;

    // The engine never retries or propagates delivery errors.
    let result = session.finish().await.unwrap();
    assert_eq!(result.unanswered_count, 3);
    assert!(!result.passed);
}
