//! End-to-end tests for the proxy endpoint and the static file server,
//! run against an in-process server bound to an ephemeral port.

use std::path::Path;
use std::sync::Arc;

use serde_json::{json, Value};

use supportchat::{
    create_router, AppState, ChatSession, CompletionClient, MockForwarder, ProxyCompletionClient,
    Sender, TurnOutcome, UpstreamForwarder, FALLBACK_REPLY,
};

/// Bind an ephemeral port, serve the router in the background, and return
/// the base URL.
async fn spawn_server(forwarder: Arc<dyn UpstreamForwarder>, static_root: &Path) -> String {
    let state = AppState::new(forwarder, static_root);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind ephemeral port");
    let addr = listener.local_addr().expect("Failed to get local address");

    tokio::spawn(async move {
        axum::serve(listener, create_router(state))
            .await
            .expect("Server failed");
    });

    format!("http://{addr}")
}

fn widget_payload(text: &str) -> Value {
    json!({
        "contents": [{"parts": [{"text": text}]}],
        "generationConfig": {
            "temperature": 0.7, "topK": 40, "topP": 0.95, "maxOutputTokens": 1024
        }
    })
}

#[tokio::test]
async fn proxy_relays_upstream_body_with_200() {
    let forwarder = Arc::new(MockForwarder::new("Happy to help!"));
    let static_root = tempfile::tempdir().expect("Failed to create temp dir");
    let base = spawn_server(forwarder.clone(), static_root.path()).await;

    let response = reqwest::Client::new()
        .post(format!("{base}/api/chat"))
        .json(&widget_payload("hello"))
        .send()
        .await
        .expect("Request failed");

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("Body is not JSON");
    assert_eq!(
        body["candidates"][0]["content"]["parts"][0]["text"],
        "Happy to help!"
    );
    assert_eq!(forwarder.call_count(), 1);
}

#[tokio::test]
async fn proxy_failure_yields_500_error_envelope() {
    let forwarder = Arc::new(MockForwarder::failing());
    let static_root = tempfile::tempdir().expect("Failed to create temp dir");
    let base = spawn_server(forwarder, static_root.path()).await;

    let response = reqwest::Client::new()
        .post(format!("{base}/api/chat"))
        .json(&widget_payload("hello"))
        .send()
        .await
        .expect("Request failed");

    assert_eq!(response.status(), 500);
    let body: Value = response.json().await.expect("Body is not JSON");
    assert_eq!(body["error"], "Failed to get response from AI service");
}

#[tokio::test]
async fn root_serves_index_html() {
    let static_root = tempfile::tempdir().expect("Failed to create temp dir");
    std::fs::write(
        static_root.path().join("index.html"),
        "<html><body>widget</body></html>",
    )
    .expect("Failed to write index.html");

    let base = spawn_server(Arc::new(MockForwarder::new("x")), static_root.path()).await;

    let response = reqwest::get(&base).await.expect("Request failed");
    assert_eq!(response.status(), 200);
    assert_eq!(
        response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok()),
        Some("text/html")
    );
    let body = response.text().await.expect("Failed to read body");
    assert!(body.contains("widget"));
}

#[tokio::test]
async fn unknown_extension_is_served_as_octet_stream() {
    let static_root = tempfile::tempdir().expect("Failed to create temp dir");
    std::fs::write(static_root.path().join("blob.bin"), [0u8, 1, 2])
        .expect("Failed to write blob");

    let base = spawn_server(Arc::new(MockForwarder::new("x")), static_root.path()).await;

    let response = reqwest::get(format!("{base}/blob.bin"))
        .await
        .expect("Request failed");
    assert_eq!(response.status(), 200);
    assert_eq!(
        response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok()),
        Some("application/octet-stream")
    );
}

#[tokio::test]
async fn missing_file_is_plain_text_404() {
    let static_root = tempfile::tempdir().expect("Failed to create temp dir");
    let base = spawn_server(Arc::new(MockForwarder::new("x")), static_root.path()).await;

    let response = reqwest::get(format!("{base}/nope.html"))
        .await
        .expect("Request failed");
    assert_eq!(response.status(), 404);
    assert_eq!(response.text().await.expect("Failed to read body"), "File not found");
}

#[tokio::test]
async fn chat_turn_round_trips_through_the_proxy() {
    let static_root = tempfile::tempdir().expect("Failed to create temp dir");
    let base = spawn_server(
        Arc::new(MockForwarder::new("  Your refund is on its way.  ")),
        static_root.path(),
    )
    .await;

    let client = Arc::new(ProxyCompletionClient::new(base));
    let mut session = ChatSession::new(client);

    let reply = session.submit("where is my refund?").await;
    assert_eq!(reply.map(|m| m.text()), Some("Your refund is on its way."));

    let messages = session.transcript().messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].sender(), Sender::User);
    assert_eq!(messages[1].sender(), Sender::Bot);
    assert_eq!(session.last_outcome(), Some(TurnOutcome::Replied));
}

#[tokio::test]
async fn unreachable_proxy_surfaces_as_fallback_reply() {
    // Port 9 (discard) is never serving HTTP locally.
    let client = Arc::new(ProxyCompletionClient::new("http://127.0.0.1:9"));
    let mut session = ChatSession::new(client);

    let reply = session.submit("anyone there?").await;
    assert_eq!(reply.map(|m| m.text()), Some(FALLBACK_REPLY));
    assert_eq!(session.last_outcome(), Some(TurnOutcome::Failed));
}

#[tokio::test]
async fn shape_mismatch_from_client_trait() {
    // A forwarder that relays JSON lacking the candidates path: the proxy
    // happily returns 200, and the extraction on the client side rejects it.
    struct EmptyForwarder;

    #[async_trait::async_trait]
    impl UpstreamForwarder for EmptyForwarder {
        async fn forward(&self, _payload: &Value) -> Result<Value, supportchat::ChatError> {
            Ok(json!({ "promptFeedback": {} }))
        }
    }

    let static_root = tempfile::tempdir().expect("Failed to create temp dir");
    let base = spawn_server(Arc::new(EmptyForwarder), static_root.path()).await;

    let client = ProxyCompletionClient::new(base);
    let err = client
        .complete("hi", &supportchat::GenerationConfig::default())
        .await
        .unwrap_err();
    assert!(err.is_unexpected_shape());
}
