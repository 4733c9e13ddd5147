//! HTTP implementation of [`AccountsApi`].

use crate::api::AccountsApi;
use crate::error::ApiError;
use async_trait::async_trait;
use lodestar_core::{AccountPatch, AccountRecord, SendingDomain};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

/// Location of the account service and its endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountsApiConfig {
    /// Base URL of the service (e.g., "https://api.example.com").
    pub base_url: String,
    /// Path of the account resource.
    #[serde(default = "default_account_path")]
    pub account_path: String,
    /// Path returning the Slack install link.
    #[serde(default = "default_install_path")]
    pub install_path: String,
    /// Path listing sending domains for a Mailgun key.
    #[serde(default = "default_domains_path")]
    pub domains_path: String,
    /// Per-request timeout, in seconds.
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_account_path() -> String {
    "/accounts".to_string()
}

fn default_install_path() -> String {
    "/slack/install/url".to_string()
}

fn default_domains_path() -> String {
    "/settings/domains".to_string()
}

fn default_timeout_seconds() -> u64 {
    10
}

impl AccountsApiConfig {
    /// Creates a configuration with default paths and timeout.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            account_path: default_account_path(),
            install_path: default_install_path(),
            domains_path: default_domains_path(),
            timeout_seconds: default_timeout_seconds(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

/// reqwest-backed account service client.
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct HttpAccountsApi {
    client: Client,
    config: Arc<AccountsApiConfig>,
    bearer: Option<String>,
}

impl HttpAccountsApi {
    /// Builds a client for the configured service.
    pub fn new(config: AccountsApiConfig) -> lodestar_core::Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| ApiError::InvalidConfig {
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            config: Arc::new(config),
            bearer: None,
        })
    }

    /// Returns a client that authenticates as the holder of `token`.
    #[must_use]
    pub fn with_bearer(&self, token: impl Into<String>) -> Self {
        Self {
            bearer: Some(token.into()),
            ..self.clone()
        }
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let request = self.client.request(method, url);
        match &self.bearer {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder, endpoint: &str) -> Result<Response, ApiError> {
        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                ApiError::Timeout {
                    endpoint: endpoint.to_string(),
                }
            } else {
                ApiError::ConnectionFailed {
                    endpoint: endpoint.to_string(),
                    reason: e.to_string(),
                }
            }
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|value| value.get("message")?.as_str().map(str::to_string));

        tracing::debug!(
            endpoint = %endpoint,
            status = %status,
            has_message = message.is_some(),
            "Account service rejected request"
        );

        Err(ApiError::Rejected {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
            message,
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        endpoint: &str,
    ) -> Result<T, ApiError> {
        self.send(request, endpoint)
            .await?
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse {
                endpoint: endpoint.to_string(),
                reason: e.to_string(),
            })
    }
}

#[async_trait]
impl AccountsApi for HttpAccountsApi {
    async fn slack_install_url(&self) -> Result<String, ApiError> {
        let endpoint = &self.config.install_path;
        let url = self.config.url(endpoint);
        let body = self
            .send(self.request(Method::GET, &url), endpoint)
            .await?
            .text()
            .await
            .map_err(|e| ApiError::InvalidResponse {
                endpoint: endpoint.clone(),
                reason: e.to_string(),
            })?;

        // The link arrives either as a JSON string or as plain text.
        Ok(serde_json::from_str::<String>(&body).unwrap_or_else(|_| body.trim().to_string()))
    }

    async fn fetch_account(&self) -> Result<AccountRecord, ApiError> {
        let endpoint = &self.config.account_path;
        let url = self.config.url(endpoint);
        self.get_json(self.request(Method::GET, &url), endpoint)
            .await
    }

    async fn update_account(&self, patch: &AccountPatch) -> Result<(), ApiError> {
        let endpoint = &self.config.account_path;
        let url = self.config.url(endpoint);
        self.send(self.request(Method::PATCH, &url).json(patch), endpoint)
            .await?;
        Ok(())
    }

    async fn list_domains(&self, api_key: &str) -> Result<Vec<SendingDomain>, ApiError> {
        let endpoint = &self.config.domains_path;
        let url = self.config.url(endpoint);
        let request = self.request(Method::GET, &url).query(&[("key", api_key)]);
        self.get_json(request, endpoint).await
    }
}
