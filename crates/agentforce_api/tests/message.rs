use agentforce_api::{
    ActiveSession, AgentforceApiClient, AgentforceApiConfig, AgentforceApiError, ClientState,
};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> AgentforceApiClient {
    let config =
        AgentforceApiConfig::new(server.uri(), "agent-1", "consumer-key", "consumer-secret")
            .with_agent_base_url(server.uri());
    AgentforceApiClient::new(config).expect("client should build")
}

fn active_session(session_id: &str) -> ActiveSession {
    ActiveSession {
        session_id: session_id.to_string(),
        external_session_key: "11111111-2222-4333-8444-555555555555".to_string(),
        stream_url: None,
        end_session_url: None,
        sequence_id: 0,
    }
}

fn reply_body(text: &str) -> serde_json::Value {
    json!({ "messages": [ { "message": text } ] })
}

#[tokio::test]
async fn send_message_uses_strictly_increasing_sequence_ids() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/sessions/s1/messages"))
        .and(body_partial_json(json!({ "message": { "sequenceId": 1 } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(reply_body("first")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/sessions/s1/messages"))
        .and(body_partial_json(json!({ "message": { "sequenceId": 2 } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(reply_body("second")))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut state = ClientState::new();
    state.access_token = Some("tok".to_string());
    state.session = Some(active_session("s1"));

    let first = client
        .send_message(&mut state, "one")
        .await
        .expect("first send should succeed");
    let second = client
        .send_message(&mut state, "two")
        .await
        .expect("second send should succeed");

    assert_eq!(first.as_deref(), Some("first"));
    assert_eq!(second.as_deref(), Some("second"));
    let session = state.session.as_ref().expect("session should remain");
    assert_eq!(session.sequence_id, 2);
}

#[tokio::test]
async fn send_message_opens_a_session_first_when_none_is_active() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/services/oauth2/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "access_token": "tok" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/agents/agent-1/sessions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "sessionId": "s-new" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/sessions/s-new/messages"))
        .and(body_partial_json(json!({
            "message": { "sequenceId": 1, "type": "Text", "text": "hello" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(reply_body("hi there")))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut state = ClientState::new();
    let reply = client
        .send_message(&mut state, "hello")
        .await
        .expect("send should lazily open a session");

    assert_eq!(reply.as_deref(), Some("hi there"));
    assert!(state.has_session());
}

#[tokio::test]
async fn send_message_reuses_the_active_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/agents/agent-1/sessions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "sessionId": "x" })))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/sessions/s1/messages"))
        .and(header("authorization", "Bearer tok"))
        .and(header("accept", "application/json"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(reply_body("ok")))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut state = ClientState::new();
    state.access_token = Some("tok".to_string());
    state.session = Some(active_session("s1"));

    let reply = client
        .send_message(&mut state, "ping")
        .await
        .expect("send should succeed");

    assert_eq!(reply.as_deref(), Some("ok"));
}

#[tokio::test]
async fn send_message_returns_none_when_the_reply_has_no_messages() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/sessions/s1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "messages": [] })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut state = ClientState::new();
    state.access_token = Some("tok".to_string());
    state.session = Some(active_session("s1"));

    let reply = client
        .send_message(&mut state, "ping")
        .await
        .expect("send should succeed");

    assert_eq!(reply, None);
}

#[tokio::test]
async fn send_message_returns_none_on_an_unexpected_reply_shape() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/sessions/s1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut state = ClientState::new();
    state.access_token = Some("tok".to_string());
    state.session = Some(active_session("s1"));

    let reply = client
        .send_message(&mut state, "ping")
        .await
        .expect("send should succeed");

    assert_eq!(reply, None);
}

#[tokio::test]
async fn send_message_maps_an_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/sessions/s1/messages"))
        .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut state = ClientState::new();
    state.access_token = Some("tok".to_string());
    state.session = Some(active_session("s1"));

    let error = client
        .send_message(&mut state, "ping")
        .await
        .err()
        .expect("a 429 must fail");

    assert!(matches!(
        error,
        AgentforceApiError::MessageSend { status, .. } if status.as_u16() == 429
    ));
    let message = error.to_string();
    assert!(message.contains("429"));
    assert!(message.contains("rate limited"));
}

#[tokio::test]
async fn failed_send_consumes_its_sequence_number() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/sessions/s1/messages"))
        .and(body_partial_json(json!({ "message": { "sequenceId": 1 } })))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/sessions/s1/messages"))
        .and(body_partial_json(json!({ "message": { "sequenceId": 2 } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(reply_body("recovered")))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut state = ClientState::new();
    state.access_token = Some("tok".to_string());
    state.session = Some(active_session("s1"));

    let error = client.send_message(&mut state, "one").await;
    assert!(error.is_err());

    let reply = client
        .send_message(&mut state, "two")
        .await
        .expect("second send should succeed");

    assert_eq!(reply.as_deref(), Some("recovered"));
    let session = state.session.as_ref().expect("session should remain");
    assert_eq!(session.sequence_id, 2);
}

#[tokio::test]
async fn send_message_fails_on_a_malformed_success_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/sessions/s1/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut state = ClientState::new();
    state.access_token = Some("tok".to_string());
    state.session = Some(active_session("s1"));

    let error = client
        .send_message(&mut state, "ping")
        .await
        .err()
        .expect("a malformed body must fail");

    assert!(matches!(error, AgentforceApiError::Serde(_)));
}

#[tokio::test]
async fn sequence_counter_restarts_in_a_new_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/sessions/s-a/messages"))
        .and(body_partial_json(json!({ "message": { "sequenceId": 1 } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(reply_body("a")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/agents/agent-1/sessions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "sessionId": "s-b" })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/sessions/s-b/messages"))
        .and(body_partial_json(json!({ "message": { "sequenceId": 1 } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(reply_body("b")))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut state = ClientState::new();
    state.access_token = Some("tok".to_string());
    state.session = Some(active_session("s-a"));

    client
        .send_message(&mut state, "first turn")
        .await
        .expect("send on the first session should succeed");
    client
        .open_session(&mut state)
        .await
        .expect("reopening should succeed");
    client
        .send_message(&mut state, "fresh turn")
        .await
        .expect("send on the new session should succeed");

    let session = state.session.as_ref().expect("session should remain");
    assert_eq!(session.session_id, "s-b");
    assert_eq!(session.sequence_id, 1);
}
