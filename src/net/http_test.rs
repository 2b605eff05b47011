use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::{Value, json};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;
use crate::session::{MemoryTokenStorage, TokenStorage};

/// Memory storage that counts removals, to pin the exactly-once clearing rule.
#[derive(Default)]
struct CountingStorage {
    inner: MemoryTokenStorage,
    removes: AtomicUsize,
}

impl TokenStorage for CountingStorage {
    fn load(&self) -> std::io::Result<Option<String>> {
        self.inner.load()
    }
    fn store(&self, token: &str) -> std::io::Result<()> {
        self.inner.store(token)
    }
    fn remove(&self) -> std::io::Result<()> {
        self.removes.fetch_add(1, Ordering::SeqCst);
        self.inner.remove()
    }
}

fn client_for(server: &MockServer, session: Arc<SessionStore>) -> HttpClient {
    let config = ClientConfig::new(&server.uri()).unwrap();
    HttpClient::new(&config, session).unwrap()
}

fn authed_session(token: &str) -> Arc<SessionStore> {
    Arc::new(SessionStore::load(Arc::new(MemoryTokenStorage::with_token(token))))
}

// =============================================================================
// endpoint
// =============================================================================

#[test]
fn endpoint_joins_relative_path_under_base() {
    let config = ClientConfig::new("https://api.example.test/v1").unwrap();
    let client = HttpClient::new(&config, Arc::new(SessionStore::in_memory())).unwrap();
    assert_eq!(client.endpoint("auth/login").unwrap().as_str(), "https://api.example.test/v1/auth/login");
    assert_eq!(client.endpoint("/auth/profile").unwrap().as_str(), "https://api.example.test/v1/auth/profile");
}

// =============================================================================
// bearer injection
// =============================================================================

#[tokio::test]
async fn attaches_bearer_token_when_present() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/profile"))
        .and(header("authorization", "Bearer tok123"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, authed_session("tok123"));
    let body: Value = client.get_json("auth/profile").await.unwrap();
    assert_eq!(body, json!({ "ok": true }));
}

#[tokio::test]
async fn omits_authorization_without_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let client = client_for(&server, Arc::new(SessionStore::in_memory()));
    let _: Value = client.post_json("auth/login", &json!({ "email": "a@b.com" })).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn reads_token_at_send_time() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/profile"))
        .and(header("authorization", "Bearer fresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let session = Arc::new(SessionStore::in_memory());
    let client = client_for(&server, session.clone());
    session.set_token("fresh");

    let _: Value = client.get_json("auth/profile").await.unwrap();
}

#[tokio::test]
async fn sends_json_body_on_patch() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/auth/profile"))
        .and(body_json(json!({ "firstName": "Ada" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "firstName": "Ada" })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, authed_session("t"));
    let body: Value = client.patch_json("auth/profile", &json!({ "firstName": "Ada" })).await.unwrap();
    assert_eq!(body["firstName"], "Ada");
}

// =============================================================================
// authorization failures
// =============================================================================

#[tokio::test]
async fn unauthorized_clears_token_once_and_propagates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/profile"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "Token expired",
            "code": "TOKEN_EXPIRED",
            "status": 401
        })))
        .expect(1)
        .mount(&server)
        .await;

    let storage = Arc::new(CountingStorage::default());
    storage.store("stale").unwrap();
    let session = Arc::new(SessionStore::load(storage.clone()));
    let client = client_for(&server, session.clone());

    let err = client.get_json::<Value>("auth/profile").await.unwrap_err();
    assert!(matches!(&err, ApiError::Unauthorized { message } if message == "Token expired"));
    assert!(!session.is_authenticated());
    assert_eq!(storage.load().unwrap(), None);
    assert_eq!(storage.removes.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn unauthorized_on_post_empty_also_clears() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/logout"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let session = authed_session("tok");
    let client = client_for(&server, session.clone());

    let err = client.post_empty("auth/logout").await.unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized { ref message } if message == "Unauthorized"));
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn forbidden_does_not_clear_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/profile"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({ "message": "Forbidden", "code": "NO_ACCESS" })))
        .mount(&server)
        .await;

    let session = authed_session("tok");
    let client = client_for(&server, session.clone());

    let err = client.get_json::<Value>("auth/profile").await.unwrap_err();
    match err {
        ApiError::Status { status, message, code } => {
            assert_eq!(status, 403);
            assert_eq!(message, "Forbidden");
            assert_eq!(code.as_deref(), Some("NO_ACCESS"));
        }
        other => panic!("expected status error, got {other:?}"),
    }
    assert_eq!(session.token(), "tok");
}

// =============================================================================
// other failures
// =============================================================================

#[tokio::test]
async fn server_error_with_text_body_uses_text_as_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/profile"))
        .respond_with(ResponseTemplate::new(502).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let client = client_for(&server, authed_session("tok"));
    let err = client.get_json::<Value>("auth/profile").await.unwrap_err();
    assert!(matches!(&err, ApiError::Status { status: 502, message, .. } if message == "upstream down"));
    assert!(err.retryable());
}

#[tokio::test]
async fn malformed_success_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/profile"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = client_for(&server, authed_session("tok"));
    let err = client.get_json::<Value>("auth/profile").await.unwrap_err();
    assert_eq!(err.error_code(), "E_DECODE");
}

#[tokio::test]
async fn unreachable_server_is_transport_error() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let uri = format!("http://127.0.0.1:{port}");

    let config = ClientConfig::new(&uri).unwrap();
    let session = authed_session("tok");
    let client = HttpClient::new(&config, session.clone()).unwrap();

    let err = client.get_json::<Value>("auth/profile").await.unwrap_err();
    assert_eq!(err.error_code(), "E_TRANSPORT");
    assert_eq!(session.token(), "tok");
}
