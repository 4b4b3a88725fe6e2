mod common;

use common::{client_with_store, logged_in_client, user_json};
use ironlog_cli::api::ApiError;
use ironlog_cli::storage::{MemoryTokenStore, TokenStore};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_login_stores_tokens() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/user/login/"))
        .and(body_json(json!({"username": "lifter", "password": "hunter2"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"access": "a1", "refresh": "r1"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemoryTokenStore::new());
    let client = client_with_store(&server, store.clone());

    client.login("lifter", "hunter2").await.unwrap();

    assert_eq!(store.access_token().unwrap().as_deref(), Some("a1"));
    assert_eq!(store.refresh_token().unwrap().as_deref(), Some("r1"));
}

#[tokio::test]
async fn test_login_rejects_invalid_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/user/login/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(
            json!({"detail": "No active account found with the given credentials"}),
        ))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryTokenStore::new());
    let client = client_with_store(&server, store.clone());

    let err = client.login("lifter", "wrong").await.unwrap_err();
    match err {
        ApiError::Unauthorized(message) => {
            assert_eq!(message, "No active account found with the given credentials")
        }
        other => panic!("expected Unauthorized, got {:?}", other),
    }
    assert!(!store.is_authenticated().unwrap());
}

#[tokio::test]
async fn test_whoami_requires_authentication() {
    let server = MockServer::start().await;
    let client = client_with_store(&server, Arc::new(MemoryTokenStore::new()));

    let result = client.whoami().await;

    assert!(matches!(result, Err(ApiError::NotLoggedIn)));
    assert_eq!(result.unwrap_err().to_string(), "Not logged in");
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_expired_access_token_is_refreshed_and_replayed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/user/me/"))
        .and(header("authorization", "Bearer access"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/user/token/refresh/"))
        .and(body_json(json!({"refresh": "refresh"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access": "fresh"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/user/me/"))
        .and(header("authorization", "Bearer fresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json(false)))
        .expect(1)
        .mount(&server)
        .await;

    let (client, store) = logged_in_client(&server);

    let user = client.whoami().await.unwrap();

    assert_eq!(user.username, "lifter");
    assert_eq!(store.access_token().unwrap().as_deref(), Some("fresh"));
    // Not rotated by the server, so the old refresh token stays
    assert_eq!(store.refresh_token().unwrap().as_deref(), Some("refresh"));
}

#[tokio::test]
async fn test_rotated_refresh_token_is_stored() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/achievements/"))
        .and(header("authorization", "Bearer access"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/user/token/refresh/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"access": "fresh", "refresh": "rotated"})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/achievements/"))
        .and(header("authorization", "Bearer fresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let (client, store) = logged_in_client(&server);

    let achievements = client.list_achievements().await.unwrap();

    assert!(achievements.is_empty());
    assert_eq!(store.refresh_token().unwrap().as_deref(), Some("rotated"));
}

#[tokio::test]
async fn test_second_401_is_not_refreshed_again() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/user/me/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "Forbidden"})))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/user/token/refresh/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access": "fresh"})))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _store) = logged_in_client(&server);

    let result = client.whoami().await;

    assert!(matches!(result, Err(ApiError::Unauthorized(_))));
}

#[tokio::test]
async fn test_rejected_refresh_clears_session() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/workout/"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/user/token/refresh/"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({"detail": "Token is invalid or expired"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (client, store) = logged_in_client(&server);
    store.cache_pro_flag(true).unwrap();

    let result = client.list_workouts(None).await;

    assert!(matches!(result, Err(ApiError::SessionExpired)));
    assert!(!store.is_authenticated().unwrap());
    assert_eq!(store.refresh_token().unwrap(), None);
    assert!(!store.cached_pro_flag().unwrap());
}

#[tokio::test]
async fn test_refresh_rejected_as_bad_request_clears_session() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/user/me/"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/user/token/refresh/"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"refresh": ["This field is invalid."]})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (client, store) = logged_in_client(&server);

    let result = client.whoami().await;

    assert!(matches!(result, Err(ApiError::SessionExpired)));
    assert!(!store.is_authenticated().unwrap());
    assert_eq!(store.refresh_token().unwrap(), None);
}

#[tokio::test]
async fn test_concurrent_401s_share_one_refresh() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(header("authorization", "Bearer access"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/user/token/refresh/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"access": "fresh"}))
                .set_delay(Duration::from_millis(50)),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/user/me/"))
        .and(header("authorization", "Bearer fresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json(false)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/achievements/"))
        .and(header("authorization", "Bearer fresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let (client, store) = logged_in_client(&server);

    let (user, achievements) = tokio::join!(client.whoami(), client.list_achievements());

    assert_eq!(user.unwrap().username, "lifter");
    assert!(achievements.unwrap().is_empty());
    assert_eq!(store.access_token().unwrap().as_deref(), Some("fresh"));
}

#[tokio::test]
async fn test_missing_refresh_token_expires_session() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/user/me/"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryTokenStore::new());
    store.set_tokens("access", None).unwrap();
    let client = client_with_store(&server, store.clone());

    let result = client.whoami().await;

    assert!(matches!(result, Err(ApiError::SessionExpired)));
    assert!(!store.is_authenticated().unwrap());
}

#[tokio::test]
async fn test_logout_clears_tokens_even_when_server_fails() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/user/logout/"))
        .and(body_json(json!({"refresh": "refresh"})))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let (client, store) = logged_in_client(&server);

    client.logout().await.unwrap();

    assert!(!store.is_authenticated().unwrap());
    assert_eq!(store.refresh_token().unwrap(), None);
}

#[test]
fn test_api_error_from_status() {
    use reqwest::StatusCode;

    let error = ApiError::from_status(StatusCode::UNAUTHORIZED, "Unauthorized".to_string());
    assert!(matches!(error, ApiError::Unauthorized(_)));

    let error = ApiError::from_status(StatusCode::NOT_FOUND, "Not Found".to_string());
    assert!(matches!(error, ApiError::NotFound(_)));

    let error = ApiError::from_status(StatusCode::BAD_REQUEST, "Bad Request".to_string());
    assert!(matches!(error, ApiError::BadRequest(_)));

    let error = ApiError::from_status(
        StatusCode::INTERNAL_SERVER_ERROR,
        "Server Error".to_string(),
    );
    assert!(matches!(error, ApiError::ServerError(_)));
}
