//! Google Gemini transport speaking the native `generateContent` REST API.
//!
//! The OpenAI-compatible Gemini surface cannot carry inline image parts in responses or a
//! response schema, so this client posts the native request shape directly.
//!
//! # Example
//!
//! ```rust,no_run
//! use thumbforge::backend::{GenerateContentRequest, GenerativeBackend, Part};
//! use thumbforge::clients::gemini::GeminiClient;
//! use thumbforge::ThumbForgeConfig;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//!     let client = GeminiClient::from_config(&ThumbForgeConfig::from_env())?;
//!     let response = client
//!         .generate_content(
//!             "gemini-2.5-flash",
//!             GenerateContentRequest::user(vec![Part::text("Say hi")]),
//!         )
//!         .await?;
//!     println!("{:?}", response.text());
//!     Ok(())
//! }
//! ```

use crate::thumbforge::backend::{
    BackendError, GenerateContentRequest, GenerateContentResponse, GenerativeBackend,
};
use crate::thumbforge::clients::http_pool::get_http_client;
use crate::thumbforge::config::{ThumbForgeConfig, DEFAULT_BASE_URL};
use async_trait::async_trait;
use log::{debug, error};
use std::error::Error;
use std::time::Duration;

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "x-goog-api-key";

pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    timeout: Duration,
}

impl GeminiClient {
    /// Client for the public Gemini endpoint with a 300 second request timeout.
    pub fn new(api_key: &str) -> Result<Self, reqwest::Error> {
        Self::new_with_base_url(api_key, DEFAULT_BASE_URL, Duration::from_secs(300))
    }

    /// Client for a custom endpoint, e.g. a proxy or a local fake.
    pub fn new_with_base_url(
        api_key: &str,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let base_url = base_url.trim_end_matches('/').to_string();
        Ok(GeminiClient {
            http: get_http_client(&base_url)?,
            api_key: api_key.trim().to_string(),
            base_url,
            timeout,
        })
    }

    pub fn from_config(config: &ThumbForgeConfig) -> Result<Self, reqwest::Error> {
        Self::new_with_base_url(&config.api_key, &config.base_url, config.request_timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model)
    }
}

#[async_trait]
impl GenerativeBackend for GeminiClient {
    async fn generate_content(
        &self,
        model: &str,
        request: GenerateContentRequest,
    ) -> Result<GenerateContentResponse, Box<dyn Error + Send + Sync>> {
        if self.api_key.is_empty() {
            return Err(Box::new(BackendError::MissingApiKey));
        }

        let url = self.endpoint(model);
        debug!("POST {}", url);

        let response = self
            .http
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .timeout(self.timeout)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            if log::log_enabled!(log::Level::Error) {
                error!("GeminiClient::generate_content HTTP {} from {}", status, url);
            }
            return Err(Box::new(BackendError::Status {
                status: status.as_u16(),
                body,
            }));
        }

        let parsed: GenerateContentResponse = response.json().await?;
        debug!(
            "GeminiClient::generate_content received {} candidate(s)",
            parsed.candidates.len()
        );
        Ok(parsed)
    }

    fn backend_name(&self) -> &str {
        "gemini"
    }
}
