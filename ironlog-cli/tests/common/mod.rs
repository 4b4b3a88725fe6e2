#![allow(dead_code)]

use ironlog_cli::api::{ApiClient, RetryConfig};
use ironlog_cli::config::Config;
use ironlog_cli::storage::{MemoryTokenStore, TokenStore};
use serde_json::{json, Value};
use std::sync::Arc;
use wiremock::MockServer;

/// Retry policy with millisecond delays so tests stay fast
pub fn fast_retry() -> RetryConfig {
    RetryConfig {
        initial_delay_ms: 1,
        max_delay_ms: 5,
        ..Default::default()
    }
}

pub fn config_for(server: &MockServer) -> Config {
    let mut config = Config::default();
    config.api.base_url = server.uri();
    config.api.timeout_seconds = 5;
    config
}

/// Client against the mock server with the given token store
pub fn client_with_store(server: &MockServer, store: Arc<MemoryTokenStore>) -> ApiClient {
    let tokens: Arc<dyn TokenStore> = store;
    ApiClient::with_retry_config(&config_for(server), tokens, fast_retry())
        .expect("client should build")
}

/// Logged-in client with access token `access` and refresh token `refresh`
pub fn logged_in_client(server: &MockServer) -> (ApiClient, Arc<MemoryTokenStore>) {
    let store = Arc::new(MemoryTokenStore::with_tokens("access", "refresh"));
    (client_with_store(server, store.clone()), store)
}

pub fn user_json(is_pro: bool) -> Value {
    json!({
        "id": 42,
        "username": "lifter",
        "email": "lifter@example.com",
        "first_name": "Sam",
        "last_name": "Reyes",
        "is_pro": is_pro,
        "date_joined": "2023-01-15T09:30:00Z"
    })
}

pub fn workout_json(id: i64, started_at: &str) -> Value {
    json!({
        "id": id,
        "name": format!("Workout {}", id),
        "started_at": started_at,
        "finished_at": null,
        "exercises": []
    })
}
