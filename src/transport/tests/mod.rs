//! Tests for the HTTP authentication transport
//!
//! These run against mockito servers so the full request path through
//! reqwest is exercised.

use mockito::Matcher;
use serde_json::json;

use crate::error::ErrorCode;
use crate::transport::{AuthTransport, HttpAuthTransport};
use crate::SecurityConfig;

fn config_for(server: &mockito::ServerGuard) -> SecurityConfig {
    SecurityConfig {
        authentication_url: format!("{}/login", server.url()),
        logout_url: format!("{}/logout", server.url()),
        ..SecurityConfig::default()
    }
}

#[tokio::test]
async fn authenticate_posts_credentials_and_parses_the_user() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/login")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({
            "username": "alice",
            "password": "secret"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"username":"alice","token":"T","roles":["ROLE_USER"]}"#)
        .create_async()
        .await;

    let transport = HttpAuthTransport::new(&config_for(&server));
    let user = transport.authenticate("alice", "secret").await.unwrap();

    assert_eq!(user.username, "alice");
    assert_eq!(user.token, "T");
    assert_eq!(user.roles, ["ROLE_USER"]);
    mock.assert_async().await;
}

#[tokio::test]
async fn authenticate_propagates_the_rejection_status() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/login")
        .with_status(403)
        .create_async()
        .await;

    let transport = HttpAuthTransport::new(&config_for(&server));
    let err = transport.authenticate("alice", "wrong").await.unwrap_err();

    assert_eq!(err.code, ErrorCode::AuthenticationFailed);
    assert_eq!(err.status(), Some(403));
    mock.assert_async().await;
}

#[tokio::test]
async fn authenticate_rejects_an_undecodable_success_body() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/login")
        .with_status(200)
        .with_body("<html>definitely not json</html>")
        .create_async()
        .await;

    let transport = HttpAuthTransport::new(&config_for(&server));
    let err = transport.authenticate("alice", "secret").await.unwrap_err();

    assert_eq!(err.code, ErrorCode::TransportFailed);
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn logout_succeeds_on_any_2xx() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/logout")
        .with_status(204)
        .create_async()
        .await;

    let transport = HttpAuthTransport::new(&config_for(&server));
    transport.logout().await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn logout_propagates_the_rejection_status() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/logout")
        .with_status(500)
        .create_async()
        .await;

    let transport = HttpAuthTransport::new(&config_for(&server));
    let err = transport.logout().await.unwrap_err();

    assert_eq!(err.code, ErrorCode::LogoutFailed);
    assert_eq!(err.status(), Some(500));
}
