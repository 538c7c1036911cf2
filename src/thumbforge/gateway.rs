//! The AI gateway: every call to the generative service goes through here.
//!
//! The flows only see two narrow capabilities, [`TitleGenerator`] and
//! [`ThumbnailGenerator`]. [`AiGateway`] implements both on top of any
//! [`GenerativeBackend`], owning prompt construction, response parsing and the mapping of
//! transport failures onto fixed user-facing errors.
//!
//! ```rust,no_run
//! use thumbforge::gateway::{AiGateway, TitleGenerator};
//! use thumbforge::ThumbForgeConfig;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let gateway = AiGateway::from_config(&ThumbForgeConfig::from_env())?;
//!     for title in gateway.generate_titles("nasi goreng").await? {
//!         println!("{}", title);
//!     }
//!     Ok(())
//! }
//! ```

use crate::thumbforge::backend::{
    GenerateContentRequest, GenerationConfig, GenerativeBackend, ImageConfig, Part,
};
use crate::thumbforge::clients::gemini::GeminiClient;
use crate::thumbforge::config::ThumbForgeConfig;
use crate::thumbforge::error::{
    ThumbForgeError, ValidationError, THUMBNAIL_GENERATION_FAILED, TITLE_GENERATION_FAILED,
};
use crate::thumbforge::image_data::{strip_data_uri_prefix, EncodedImage};
use crate::thumbforge::prompts::{thumbnail_prompt, title_prompt};
use crate::thumbforge::types::{AspectRatio, StyleTag};
use async_trait::async_trait;
use log::{error, info, warn};
use serde_json::json;
use std::sync::Arc;

/// One suggested title.
pub type TitleCandidate = String;

/// A generated PNG, always `image/png`.
pub type GeneratedThumbnail = EncodedImage;

/// Everything the image model needs for one thumbnail.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ThumbnailRequest {
    pub title: String,
    pub source_image: EncodedImage,
    pub aspect_ratio: AspectRatio,
    pub style: StyleTag,
}

/// Suggests video titles for a topic.
#[async_trait]
pub trait TitleGenerator: Send + Sync {
    /// Ranked candidates, possibly empty. Fails with
    /// [`ThumbForgeError::TitleGeneration`] on transport or model failure.
    async fn generate_titles(&self, topic: &str) -> Result<Vec<TitleCandidate>, ThumbForgeError>;
}

/// Composites a thumbnail from a title and a photo.
#[async_trait]
pub trait ThumbnailGenerator: Send + Sync {
    /// `Ok(None)` means the model answered without an image.
    async fn generate_thumbnail(
        &self,
        request: &ThumbnailRequest,
    ) -> Result<Option<GeneratedThumbnail>, ThumbForgeError>;
}

/// Gateway over a [`GenerativeBackend`].
pub struct AiGateway {
    backend: Arc<dyn GenerativeBackend>,
    title_model: String,
    image_model: String,
    title_count: usize,
    title_language: String,
}

impl AiGateway {
    pub fn new(backend: Arc<dyn GenerativeBackend>, config: &ThumbForgeConfig) -> Self {
        Self {
            backend,
            title_model: config.title_model.clone(),
            image_model: config.image_model.clone(),
            title_count: config.title_count,
            title_language: config.title_language.clone(),
        }
    }

    /// Gateway backed by a [`GeminiClient`] built from `config`.
    pub fn from_config(config: &ThumbForgeConfig) -> Result<Self, reqwest::Error> {
        let client = GeminiClient::from_config(config)?;
        Ok(Self::new(Arc::new(client), config))
    }

    /// The request sent for a (trimmed, non-empty) topic.
    pub fn title_request(&self, topic: &str) -> GenerateContentRequest {
        let prompt = title_prompt(topic, self.title_count, &self.title_language);
        GenerateContentRequest::user(vec![Part::text(prompt)]).with_generation_config(
            GenerationConfig {
                response_mime_type: Some("application/json".to_string()),
                response_schema: Some(json!({
                    "type": "ARRAY",
                    "items": { "type": "STRING" }
                })),
                ..GenerationConfig::default()
            },
        )
    }

    /// The multimodal request sent for a thumbnail: instruction text, then the photo.
    pub fn thumbnail_request(&self, request: &ThumbnailRequest) -> GenerateContentRequest {
        let prompt = thumbnail_prompt(&request.title, request.aspect_ratio, request.style);
        let image_bytes = strip_data_uri_prefix(request.source_image.payload());
        GenerateContentRequest::user(vec![
            Part::text(prompt),
            Part::inline(request.source_image.mime_type(), image_bytes),
        ])
        .with_generation_config(GenerationConfig {
            image_config: Some(ImageConfig {
                aspect_ratio: request.aspect_ratio.as_str().to_string(),
            }),
            ..GenerationConfig::default()
        })
    }
}

/// Parse the model's text as a JSON array of strings.
///
/// Lenient on purpose: a missing body or anything that is not an array of strings yields an
/// empty list instead of an error.
pub fn parse_title_list(text: Option<&str>) -> Vec<TitleCandidate> {
    let text = match text {
        Some(t) if !t.trim().is_empty() => t,
        _ => {
            warn!("title model returned no text");
            return Vec::new();
        }
    };
    match serde_json::from_str::<Vec<String>>(text.trim()) {
        Ok(titles) => titles,
        Err(err) => {
            warn!("title model output is not a JSON string array: {}", err);
            Vec::new()
        }
    }
}

#[async_trait]
impl TitleGenerator for AiGateway {
    async fn generate_titles(&self, topic: &str) -> Result<Vec<TitleCandidate>, ThumbForgeError> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(ValidationError::EmptyTopic.into());
        }

        let request = self.title_request(topic);
        match self.backend.generate_content(&self.title_model, request).await {
            Ok(response) => {
                let titles = parse_title_list(response.text().as_deref());
                info!("{} returned {} title(s)", self.title_model, titles.len());
                Ok(titles)
            }
            Err(err) => {
                error!(
                    "title generation via {} failed: {}",
                    self.backend.backend_name(),
                    err
                );
                Err(ThumbForgeError::TitleGeneration(
                    TITLE_GENERATION_FAILED.to_string(),
                ))
            }
        }
    }
}

#[async_trait]
impl ThumbnailGenerator for AiGateway {
    async fn generate_thumbnail(
        &self,
        request: &ThumbnailRequest,
    ) -> Result<Option<GeneratedThumbnail>, ThumbForgeError> {
        if request.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle.into());
        }
        if request.source_image.is_empty() {
            return Err(ValidationError::MissingImage.into());
        }

        let body = self.thumbnail_request(request);
        match self.backend.generate_content(&self.image_model, body).await {
            Ok(response) => match response.first_inline_data() {
                Some(inline) => {
                    info!(
                        "{} returned a {} thumbnail",
                        self.image_model, request.aspect_ratio
                    );
                    Ok(Some(EncodedImage::from_base64(
                        "image/png",
                        inline.data.clone(),
                    )))
                }
                None => {
                    warn!("{} answered without an image part", self.image_model);
                    Ok(None)
                }
            },
            Err(err) => {
                error!(
                    "thumbnail generation via {} failed: {}",
                    self.backend.backend_name(),
                    err
                );
                Err(ThumbForgeError::ThumbnailGeneration(
                    THUMBNAIL_GENERATION_FAILED.to_string(),
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_title_list_is_lenient() {
        assert_eq!(
            parse_title_list(Some(r#"["Judul A","Judul B"]"#)),
            vec!["Judul A".to_string(), "Judul B".to_string()]
        );
        assert!(parse_title_list(None).is_empty());
        assert!(parse_title_list(Some("   ")).is_empty());
        assert!(parse_title_list(Some("Here are your titles: 1. ...")).is_empty());
        assert!(parse_title_list(Some(r#"{"titles": ["a"]}"#)).is_empty());
    }

    #[test]
    fn duplicates_and_order_are_preserved() {
        assert_eq!(
            parse_title_list(Some(r#"["b","a","b"]"#)),
            vec!["b".to_string(), "a".to_string(), "b".to_string()]
        );
    }
}
