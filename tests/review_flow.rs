//! End-to-end review flow against a mocked chat-completion backend.

use std::time::Duration;

use anyhow::Result;
use serde_json::{json, Value};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use review_triage::filter::{ExclusionMatcher, FileFilter};
use review_triage::review::{ReviewClient, ReviewOutcome, Reviewer, FALLBACK_VERDICT};

fn reviewer(base_url: &str) -> Result<Reviewer> {
    let client = ReviewClient::new(
        "sk-test".to_string(),
        Some(base_url.to_string()),
        Duration::from_secs(5),
    )?;
    let filter = FileFilter::new(ExclusionMatcher::builtin()?);
    Ok(Reviewer::new(client, filter))
}

async fn single_request(server: &MockServer) -> Request {
    let mut requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1, "expected exactly one backend call");
    requests.remove(0)
}

#[tokio::test]
async fn review_resolves_with_first_choice_content() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("Authorization", "Bearer sk-test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [
                { "message": { "role": "assistant", "content": "No issues found." } },
                { "message": { "role": "assistant", "content": "ignored second choice" } }
            ]
        })))
        .mount(&server)
        .await;

    let context = json!({ "diff": { "files": [
        { "path": "go.sum", "diff": "x y" },
        { "path": "main.go", "diff": "a b c" }
    ]}});

    let outcome = reviewer(&server.uri())?
        .review(&context, "any risky changes?")
        .await;

    match outcome {
        ReviewOutcome::Completed(verdict) => assert_eq!(verdict, "No issues found."),
        other => panic!("expected Completed, got {other:?}"),
    }

    // The outbound payload was fully determined by normalization: the lock
    // file never reached the wire.
    let request = single_request(&server).await;
    let body: Value = serde_json::from_slice(&request.body)?;

    assert_eq!(body["model"], "gpt-4o-2024-08-06");
    assert_eq!(body["max_tokens"], 4096);

    let messages = body["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 4);
    assert_eq!(messages[0]["role"], "system");
    assert_eq!(messages[0]["content"], "You are a code reviewer.");
    assert_eq!(messages[1]["role"], "system");
    assert_eq!(messages[2]["role"], "assistant");
    assert_eq!(messages[3]["role"], "user");
    assert_eq!(messages[3]["content"], "any risky changes?");

    let serialized_context = messages[1]["content"].as_str().unwrap();
    assert!(serialized_context.contains("main.go"));
    assert!(!serialized_context.contains("go.sum"));

    Ok(())
}

#[tokio::test]
async fn empty_choices_degrade_to_fallback_verdict() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&server)
        .await;

    let outcome = reviewer(&server.uri())?
        .review(&json!([]), "summarize")
        .await;

    assert!(matches!(outcome, ReviewOutcome::Degraded(_)));
    assert_eq!(outcome.into_verdict(), FALLBACK_VERDICT);

    Ok(())
}

#[tokio::test]
async fn callback_adapter_never_reports_an_error() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("backend exploded"))
        .mount(&server)
        .await;

    let mut delivered = None;
    reviewer(&server.uri())?
        .review_with_callback(&json!("opaque"), "review this", |error, verdict| {
            delivered = Some((error.is_none(), verdict));
        })
        .await;

    let (error_was_none, verdict) = delivered.unwrap();
    assert!(error_was_none, "callback must receive a null error");
    assert_eq!(verdict, FALLBACK_VERDICT);

    Ok(())
}

#[tokio::test]
async fn strict_api_surfaces_transport_failure_as_error() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let result = reviewer(&server.uri())?
        .review_strict(&json!("opaque"), "review this")
        .await;

    assert!(result.is_err());

    Ok(())
}

#[tokio::test]
async fn opaque_context_is_forwarded_unchanged() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "role": "assistant", "content": "ok" } }]
        })))
        .mount(&server)
        .await;

    let context = json!("please look at the release notes");
    let outcome = reviewer(&server.uri())?.review(&context, "thoughts?").await;
    assert!(matches!(outcome, ReviewOutcome::Completed(_)));

    let request = single_request(&server).await;
    let body: Value = serde_json::from_slice(&request.body)?;
    assert_eq!(
        body["messages"][1]["content"],
        "\"please look at the release notes\""
    );

    Ok(())
}

#[tokio::test]
async fn entry_list_primitives_survive_into_payload() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "role": "assistant", "content": "ok" } }]
        })))
        .mount(&server)
        .await;

    let context = json!([
        "release note",
        { "path": "pnpm-lock.yaml", "diff": "a b" },
        { "path": "src/index.ts", "diff": "c d" }
    ]);

    reviewer(&server.uri())?.review(&context, "review").await;

    let request = single_request(&server).await;
    let body: Value = serde_json::from_slice(&request.body)?;
    let payload: Value =
        serde_json::from_str(body["messages"][1]["content"].as_str().unwrap())?;

    assert_eq!(
        payload,
        json!(["release note", { "path": "src/index.ts", "diff": "c d" }])
    );

    Ok(())
}
