//! # thumbforge
//!
//! thumbforge is a two-step content-creation assistant for video makers. Give it a topic and
//! it asks a generative model for catchy video titles; pick one, hand it a photo, choose a
//! visual style and an aspect ratio, and it asks an image model to composite a thumbnail.
//!
//! The crate is layered as follows:
//!
//! * **Transport**: [`backend::GenerativeBackend`] is the seam to the AI service;
//!   [`clients::gemini::GeminiClient`] implements it over Gemini's `generateContent` API.
//! * **Gateway**: [`AiGateway`] builds prompts, parses responses and maps failures, exposing
//!   the two capabilities [`TitleGenerator`] and [`ThumbnailGenerator`].
//! * **Flows**: [`title_flow::TitleSelectionFlow`] and
//!   [`thumbnail_flow::ThumbnailCreationFlow`] hold per-step state, busy status and
//!   user-facing errors.
//! * **Controller**: [`StudioController`] is the two-step state machine carrying the
//!   selected title from one flow to the other.
//!
//! ## Getting Started
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use thumbforge::image_data::LocalFile;
//! use thumbforge::{AiGateway, AspectRatio, StudioController, StyleTag, ThumbForgeConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     thumbforge::init_logger();
//!
//!     let config = ThumbForgeConfig::from_env();
//!     let mut studio = StudioController::from_gateway(Arc::new(AiGateway::from_config(&config)?));
//!
//!     let titles = studio.titles_mut().generate("nasi goreng").await?.to_vec();
//!     studio.select(&titles[0])?;
//!
//!     let photo = LocalFile::open("me.jpg").await?;
//!     let flow = studio.thumbnails_mut();
//!     flow.upload(&photo).await?;
//!     flow.set_aspect_ratio(AspectRatio::Portrait);
//!     flow.set_style(StyleTag::Anime);
//!
//!     studio.generate_thumbnail().await?;
//!     let saved = studio.save_thumbnail(".").await?;
//!     println!("saved {}", saved.display());
//!     Ok(())
//! }
//! ```

use std::sync::Once;

static INIT_LOGGER: Once = Once::new();

/// Initialise the global [`env_logger`] subscriber exactly once.
///
/// Applications embedding thumbforge can opt in to `RUST_LOG` driven diagnostics without
/// choosing a logging backend upfront.
///
/// ```rust
/// thumbforge::init_logger();
/// log::info!("Logger is ready");
/// ```
pub fn init_logger() {
    INIT_LOGGER.call_once(|| {
        env_logger::init();
    });
}

pub mod thumbforge;

pub use thumbforge::backend;
pub use thumbforge::clients;
pub use thumbforge::config::ThumbForgeConfig;
pub use thumbforge::controller::{Step, StudioController};
pub use thumbforge::error;
pub use thumbforge::error::{ThumbForgeError, ValidationError};
pub use thumbforge::export;
pub use thumbforge::gateway;
pub use thumbforge::gateway::{
    AiGateway, GeneratedThumbnail, ThumbnailGenerator, ThumbnailRequest, TitleCandidate,
    TitleGenerator,
};
pub use thumbforge::image_data;
pub use thumbforge::image_data::{EncodedImage, ImageSource};
pub use thumbforge::prompts;
pub use thumbforge::thumbnail_flow;
pub use thumbforge::thumbnail_flow::ThumbnailOutcome;
pub use thumbforge::title_flow;
pub use thumbforge::types::{AspectRatio, FlowStatus, StyleTag};
