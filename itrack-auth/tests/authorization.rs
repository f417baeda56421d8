use chrono::{TimeZone, Utc};
use itrack_auth::{AuthError, Credential, TokenManager, TokenState};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn manager(server: &MockServer) -> TokenManager<itrack_api::Client> {
    let client = itrack_api::Client::with_base_url(&format!("{}/api", server.uri()));
    TokenManager::new(Credential::new("fleet", "secret"), client)
}

#[tokio::test]
async fn obtains_token_with_vendor_signature() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/authorization"))
        .and(query_param("time", "1700000000"))
        .and(query_param("account", "fleet"))
        .and(query_param("signature", "9daa2f47bfef02e5ea27ddbe47714ca8"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 0,
            "record": {"access_token": "tok-1", "expires_in": 7200}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let manager = manager(&server);
    let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();

    let token = manager.token_at(now).await.expect("token");
    assert_eq!(token.expose(), "tok-1");

    // Reused from cache: the mock only allows one call
    let again = manager.token_at(now).await.expect("cached token");
    assert_eq!(again.expose(), "tok-1");
}

#[tokio::test]
async fn vendor_rejection_is_an_authentication_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/authorization"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 10003,
            "message": "signature error"
        })))
        .mount(&server)
        .await;

    let manager = manager(&server);
    let now = Utc::now();
    let err = manager.token_at(now).await.unwrap_err();

    assert_eq!(
        err,
        AuthError::Authentication("Failed to get access token: signature error".to_string())
    );
    assert_eq!(manager.state_at(now).await, TokenState::NoToken);
}

#[tokio::test]
async fn rejection_without_message_uses_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/authorization"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": 1})))
        .mount(&server)
        .await;

    let err = manager(&server).token().await.unwrap_err();

    assert_eq!(
        err,
        AuthError::Authentication("Failed to get access token: Unknown error".to_string())
    );
}

#[tokio::test]
async fn http_failure_is_a_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/authorization"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let err = manager(&server).token().await.unwrap_err();

    assert!(matches!(err, AuthError::Transport(_)), "got {:?}", err);
}

#[tokio::test]
async fn rejection_with_string_record_is_an_authentication_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/authorization"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 10002,
            "message": "account or password error",
            "record": ""
        })))
        .mount(&server)
        .await;

    let err = manager(&server).token().await.unwrap_err();

    assert_eq!(
        err,
        AuthError::Authentication("Failed to get access token: account or password error".into())
    );
}

#[tokio::test]
async fn out_of_range_lifetime_is_an_authentication_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/authorization"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 0,
            "record": {"access_token": "tok-1", "expires_in": i64::MAX}
        })))
        .mount(&server)
        .await;

    let manager = manager(&server);
    let err = manager.token().await.unwrap_err();

    assert!(
        matches!(&err, AuthError::Authentication(msg) if msg.contains("invalid expires_in")),
        "got {:?}",
        err
    );
    assert_eq!(manager.state_at(Utc::now()).await, TokenState::NoToken);
}
