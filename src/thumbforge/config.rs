//! Configuration for thumbforge.
//!
//! [`ThumbForgeConfig`] is a plain struct. Build it by hand, start from
//! [`ThumbForgeConfig::default`], or call [`ThumbForgeConfig::from_env`] to pick the API key
//! up from the process environment once at startup.
//!
//! # Example
//!
//! ```rust
//! use thumbforge::ThumbForgeConfig;
//!
//! let config = ThumbForgeConfig {
//!     api_key: "my-key".to_string(),
//!     ..ThumbForgeConfig::default()
//! };
//! assert_eq!(config.title_count, 20);
//! ```

use std::env;
use std::time::Duration;

/// Environment variable holding the AI service credential.
pub const API_KEY_VAR: &str = "API_KEY";

/// Checked when [`API_KEY_VAR`] is unset.
pub const FALLBACK_API_KEY_VAR: &str = "GEMINI_API_KEY";

/// Default REST root of the Gemini API.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Settings for the AI gateway and its transport.
#[derive(Clone, Debug)]
pub struct ThumbForgeConfig {
    /// Credential sent with every request. Empty means "not configured"; requests then fail
    /// with an authentication error through the normal generation error path.
    pub api_key: String,
    /// REST root, without trailing slash.
    pub base_url: String,
    /// Model used for title suggestions.
    pub title_model: String,
    /// Model used for thumbnail synthesis.
    pub image_model: String,
    /// How many titles the prompt asks for.
    pub title_count: usize,
    /// Language and tone the titles should be written in.
    pub title_language: String,
    /// Whole-request timeout applied by the HTTP client.
    pub request_timeout: Duration,
}

impl Default for ThumbForgeConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            title_model: "gemini-2.5-flash".to_string(),
            image_model: "gemini-2.5-flash-image".to_string(),
            title_count: 20,
            title_language: "casual, trendy Indonesian (Bahasa Indonesia gaul)".to_string(),
            request_timeout: Duration::from_secs(300),
        }
    }
}

impl ThumbForgeConfig {
    /// Defaults plus the API key read from `API_KEY`, falling back to `GEMINI_API_KEY`.
    ///
    /// A missing key is not an error here; it is logged and left empty.
    pub fn from_env() -> Self {
        let api_key = env::var(API_KEY_VAR)
            .or_else(|_| env::var(FALLBACK_API_KEY_VAR))
            .unwrap_or_default();
        if api_key.trim().is_empty() {
            log::warn!(
                "{} is not set; every AI request will fail to authenticate",
                API_KEY_VAR
            );
        }
        Self {
            api_key: api_key.trim().to_string(),
            ..Self::default()
        }
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }
}
