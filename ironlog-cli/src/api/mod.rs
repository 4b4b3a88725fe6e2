use anyhow::{Context, Result};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::models::UserAccount;
use crate::storage::TokenStore;

mod account;
mod achievements;
mod error;
mod exercises;
mod measurements;
mod retry;
mod workouts;

pub use error::ApiError;
pub use retry::RetryConfig;

/// Query-string pairs appended to a request
pub type Query<'a> = &'a [(&'a str, String)];

/// Login request payload
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Registration payload
#[derive(Debug, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Token pair issued at login
#[derive(Debug, Deserialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// Token refresh request
#[derive(Debug, Serialize)]
pub struct RefreshRequest {
    pub refresh: String,
}

/// Token refresh response. The refresh token is only present when the
/// server rotates it.
#[derive(Debug, Deserialize)]
pub struct RefreshResponse {
    pub access: String,
    #[serde(default)]
    pub refresh: Option<String>,
}

/// List endpoints answer either with a bare array or a paginated envelope
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ListResponse<T> {
    Paginated { results: Vec<T> },
    Plain(Vec<T>),
}

impl<T> ListResponse<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            ListResponse::Paginated { results } => results,
            ListResponse::Plain(items) => items,
        }
    }
}

/// API client for communicating with the IronLog backend
pub struct ApiClient {
    client: Client,
    base_url: String,
    tokens: Arc<dyn TokenStore>,
    retry_config: RetryConfig,
    refresh_lock: tokio::sync::Mutex<()>,
}

impl ApiClient {
    /// Create a new API client using the retry policy from the config
    pub fn new(config: &Config, tokens: Arc<dyn TokenStore>) -> Result<Self> {
        Self::with_retry_config(config, tokens, config.api.retry.clone())
    }

    /// Create a new API client with custom retry configuration
    pub fn with_retry_config(
        config: &Config,
        tokens: Arc<dyn TokenStore>,
        retry_config: RetryConfig,
    ) -> Result<Self> {
        let timeout = Duration::from_secs(config.api.timeout_seconds);

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("ironlog/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url().to_string(),
            tokens,
            retry_config,
            refresh_lock: tokio::sync::Mutex::new(()),
        })
    }

    pub fn tokens(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Log in and store the issued tokens
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenPair, ApiError> {
        tracing::debug!("Logging in as {}", username);

        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };

        let response = self
            .client
            .post(self.url("/user/login/"))
            .json(&request)
            .send()
            .await?;

        let tokens: TokenPair = Self::parse(response).await?;
        self.tokens
            .set_tokens(&tokens.access, Some(tokens.refresh.as_str()))?;

        tracing::info!("Successfully logged in as {}", username);
        Ok(tokens)
    }

    /// Create an account. Does not log in.
    pub async fn register(&self, request: &RegisterRequest) -> Result<UserAccount, ApiError> {
        tracing::debug!("Registering {}", request.username);

        let response = self
            .client
            .post(self.url("/user/register/"))
            .json(request)
            .send()
            .await?;

        Self::parse(response).await
    }

    /// Revoke the refresh token server side and forget local tokens.
    ///
    /// The server call is best effort; local tokens are always cleared.
    pub async fn logout(&self) -> Result<(), ApiError> {
        if let Some(refresh) = self.tokens.refresh_token()? {
            let result = self
                .client
                .post(self.url("/user/logout/"))
                .json(&RefreshRequest { refresh })
                .send()
                .await;

            match result {
                Ok(response) if !response.status().is_success() => {
                    tracing::warn!("Server rejected logout with {}", response.status());
                }
                Err(e) => tracing::warn!("Logout request failed: {}", e),
                Ok(_) => {}
            }
        }

        self.tokens.clear_tokens()?;
        tracing::info!("Cleared stored tokens");
        Ok(())
    }

    /// Exchange a refresh token for a new access token
    pub async fn refresh_token(&self, refresh_token: &str) -> Result<RefreshResponse, ApiError> {
        tracing::debug!("Refreshing access token");

        let response = self
            .client
            .post(self.url("/user/token/refresh/"))
            .json(&RefreshRequest {
                refresh: refresh_token.to_string(),
            })
            .send()
            .await?;

        let refreshed = Self::parse(response).await?;
        tracing::info!("Successfully refreshed access token");
        Ok(refreshed)
    }

    /// Refresh the access token and persist it.
    ///
    /// `stale` is the token that was rejected. If another request already
    /// replaced it, the current token is returned without a second refresh.
    async fn try_refresh_token(&self, stale: &str) -> Result<String, ApiError> {
        let _guard = self.refresh_lock.lock().await;

        if let Some(current) = self.tokens.access_token()? {
            if current != stale {
                return Ok(current);
            }
        }

        let Some(refresh_token) = self.tokens.refresh_token()? else {
            tracing::warn!("No refresh token available");
            self.tokens.clear_tokens()?;
            return Err(ApiError::SessionExpired);
        };

        match self.refresh_token(&refresh_token).await {
            Ok(refreshed) => {
                self.tokens
                    .set_tokens(&refreshed.access, refreshed.refresh.as_deref())?;
                Ok(refreshed.access)
            }
            Err(ApiError::Unauthorized(_)) | Err(ApiError::BadRequest(_)) => {
                tracing::warn!("Refresh token rejected, clearing session");
                self.tokens.clear_tokens()?;
                Err(ApiError::SessionExpired)
            }
            Err(e) => Err(e),
        }
    }

    fn build<B: Serialize + ?Sized>(
        &self,
        method: &Method,
        url: &str,
        token: &str,
        query: Query<'_>,
        body: Option<&B>,
    ) -> RequestBuilder {
        let mut request = self.client.request(method.clone(), url).bearer_auth(token);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        request
    }

    /// Send an authenticated request, refreshing the token and replaying
    /// once on 401.
    async fn send_authorized<B: Serialize + ?Sized>(
        &self,
        method: &Method,
        path: &str,
        query: Query<'_>,
        body: Option<&B>,
    ) -> Result<Response, ApiError> {
        let url = self.url(path);
        let token = self.tokens.access_token()?.ok_or(ApiError::NotLoggedIn)?;

        let response = self
            .build(method, &url, &token, query, body)
            .send()
            .await?;

        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        tracing::debug!("Received 401 for {} {}, attempting token refresh", method, path);

        let new_token = self.try_refresh_token(&token).await?;

        let response = self
            .build(method, &url, &new_token, query, body)
            .send()
            .await?;

        Ok(response)
    }

    async fn parse<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let status = response.status();

        if status.is_success() {
            response
                .json::<T>()
                .await
                .map_err(|e| ApiError::Decode(e.to_string()))
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, error_text))
        }
    }

    async fn expect_success(response: Response) -> Result<(), ApiError> {
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, error_text))
        }
    }

    /// Authenticated request returning a JSON body. GET and PUT are
    /// idempotent and go through the retry policy; other methods are sent
    /// once.
    async fn request<B, T>(
        &self,
        method: Method,
        path: &str,
        query: Query<'_>,
        body: Option<&B>,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let method = &method;
        let attempt = || async move {
            let response = self.send_authorized(method, path, query, body).await?;
            Self::parse::<T>(response).await
        };

        if *method == Method::GET || *method == Method::PUT {
            self.retry_config.execute(attempt).await
        } else {
            attempt().await
        }
    }

    /// Make an authenticated GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request::<(), T>(Method::GET, path, &[], None).await
    }

    /// Make an authenticated GET request with query parameters
    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Query<'_>,
    ) -> Result<T, ApiError> {
        self.request::<(), T>(Method::GET, path, query, None).await
    }

    /// GET a collection, accepting both plain and paginated responses
    pub async fn get_list<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Query<'_>,
    ) -> Result<Vec<T>, ApiError> {
        let list: ListResponse<T> = self.get_with_query(path, query).await?;
        Ok(list.into_vec())
    }

    /// Make an authenticated POST request
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(Method::POST, path, &[], Some(body)).await
    }

    /// Make an authenticated PUT request
    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(Method::PUT, path, &[], Some(body)).await
    }

    /// Make an authenticated DELETE request, expecting no body back
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let response = self
            .send_authorized::<()>(&Method::DELETE, path, &[], None)
            .await?;
        Self::expect_success(response).await
    }
}
