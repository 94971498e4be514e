//! HTTP client for the DeepL REST API.
//!
//! Only two endpoints are used: `/translate` and `/languages`. Authentication
//! is a header carrying the API key. Free-tier keys (suffix `:fx`) talk to a
//! different host than paid keys.

use std::fmt;

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::de::DeserializeOwned;

use super::types::{Language, Languages, TranslateParams, TranslateResponse};

pub const DEFAULT_FREE_BASE_URL: &str = "https://api-free.deepl.com/v2";
pub const DEFAULT_PRO_BASE_URL: &str = "https://api.deepl.com/v2";

/// Errors that can occur while talking to the translation service.
#[derive(Debug)]
pub enum ApiError {
    /// Client misconfigured (empty API key). Not retryable.
    Config(String),
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// API returned a non-success status.
    Api { status: u16, message: String },
    /// Failed to parse the response body.
    Parse(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Config(msg) => write!(f, "config error: {msg}"),
            ApiError::Network(msg) => write!(f, "network error: {msg}"),
            ApiError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            ApiError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// The seam between the event loop and the remote service.
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    /// Translate `params.text` into `params.target_lang`.
    async fn translate(&self, params: &TranslateParams) -> Result<TranslateResponse, ApiError>;

    /// Fetch the supported source and target languages.
    async fn languages(&self) -> Result<Languages, ApiError>;
}

/// Picks the API host for a key: free-tier keys end in `:fx`.
pub fn base_url_for_key(api_key: &str) -> &'static str {
    if api_key.ends_with(":fx") {
        DEFAULT_FREE_BASE_URL
    } else {
        DEFAULT_PRO_BASE_URL
    }
}

pub struct DeeplClient {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl DeeplClient {
    /// A `base_url` override wins over the tier derived from the key.
    pub fn new(api_key: String, base_url: Option<String>) -> Self {
        let base_url = base_url
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| base_url_for_key(&api_key).to_string());

        Self {
            api_key,
            base_url,
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn auth_header(&self) -> Result<String, ApiError> {
        if self.api_key.trim().is_empty() {
            return Err(ApiError::Config("API key is empty".to_string()));
        }
        Ok(format!("DeepL-Auth-Key {}", self.api_key))
    }

    /// Send a prepared request and decode a JSON body, mapping failures onto `ApiError`.
    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        endpoint: &str,
    ) -> Result<T, ApiError> {
        let response = request
            .header("Authorization", self.auth_header()?)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        debug!("DeepL {} response status: {}", endpoint, response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("DeepL API error on {}: {} - {}", endpoint, status, err_body);
            return Err(ApiError::Api {
                status,
                message: err_body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        serde_json::from_str(&body).map_err(|e| ApiError::Parse(e.to_string()))
    }

    async fn fetch_language_list(&self, kind: &str) -> Result<Vec<Language>, ApiError> {
        let request = self
            .client
            .get(format!("{}/languages", self.base_url))
            .query(&[("type", kind)]);
        self.send(request, "/languages").await
    }
}

#[async_trait]
impl TranslationProvider for DeeplClient {
    async fn translate(&self, params: &TranslateParams) -> Result<TranslateResponse, ApiError> {
        info!(
            "DeepL translate request: source={:?}, target={}, formality={:?}, chars={}",
            params.source_lang,
            params.target_lang,
            params.formality,
            params.text.iter().map(|t| t.len()).sum::<usize>()
        );

        let request = self
            .client
            .post(format!("{}/translate", self.base_url))
            .json(params);
        self.send(request, "/translate").await
    }

    async fn languages(&self) -> Result<Languages, ApiError> {
        info!("DeepL languages request");
        let source = self.fetch_language_list("source").await?;
        let target = self.fetch_language_list("target").await?;
        debug!(
            "Received {} source and {} target languages",
            source.len(),
            target.len()
        );
        Ok(Languages { source, target })
    }
}
