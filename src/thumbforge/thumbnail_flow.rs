//! Thumbnail creation: photo + style + ratio + selected title in, generated PNG out.
//!
//! The flow privately holds the ingested source photo and the latest generated thumbnail.
//! Uploading a new photo discards the old thumbnail; a failed upload leaves both untouched.

use crate::thumbforge::error::{ThumbForgeError, ValidationError, NO_IMAGE_RETURNED};
use crate::thumbforge::export::{download_name, save_thumbnail};
use crate::thumbforge::gateway::{GeneratedThumbnail, ThumbnailGenerator, ThumbnailRequest};
use crate::thumbforge::image_data::{ingest_file, EncodedImage, ImageSource};
use crate::thumbforge::types::{AspectRatio, BusyGuard, FlowStatus, StyleTag};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::watch;

/// What a call to [`ThumbnailCreationFlow::generate`] produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ThumbnailOutcome {
    /// No source photo yet; nothing was sent.
    Skipped,
    /// The model answered without an image; the flow's notice slot says so.
    NoImage,
    /// A new thumbnail, now also held by the flow.
    Generated(GeneratedThumbnail),
}

pub struct ThumbnailCreationFlow {
    generator: Arc<dyn ThumbnailGenerator>,
    source_image: Option<EncodedImage>,
    thumbnail: Option<GeneratedThumbnail>,
    aspect_ratio: AspectRatio,
    style: StyleTag,
    error: Option<String>,
    notice: Option<String>,
    status: watch::Sender<FlowStatus>,
}

impl ThumbnailCreationFlow {
    pub fn new(generator: Arc<dyn ThumbnailGenerator>) -> Self {
        let (status, _) = watch::channel(FlowStatus::Idle);
        Self {
            generator,
            source_image: None,
            thumbnail: None,
            aspect_ratio: AspectRatio::default(),
            style: StyleTag::default(),
            error: None,
            notice: None,
            status,
        }
    }

    /// Receiver that observes `Idle` / `Generating` transitions.
    pub fn subscribe(&self) -> watch::Receiver<FlowStatus> {
        self.status.subscribe()
    }

    pub fn status(&self) -> FlowStatus {
        *self.status.borrow()
    }

    pub fn is_generating(&self) -> bool {
        self.status() == FlowStatus::Generating
    }

    pub fn source_image(&self) -> Option<&EncodedImage> {
        self.source_image.as_ref()
    }

    pub fn thumbnail(&self) -> Option<&GeneratedThumbnail> {
        self.thumbnail.as_ref()
    }

    pub fn aspect_ratio(&self) -> AspectRatio {
        self.aspect_ratio
    }

    pub fn set_aspect_ratio(&mut self, ratio: AspectRatio) {
        self.aspect_ratio = ratio;
    }

    pub fn style(&self) -> StyleTag {
        self.style
    }

    pub fn set_style(&mut self, style: StyleTag) {
        self.style = style;
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Set when the model answered without an image.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Ingest a picked file as the new source photo.
    ///
    /// On success the previous thumbnail, error and notice are cleared. On failure the error
    /// is recorded and the previous photo and thumbnail stay as they were.
    pub async fn upload(&mut self, source: &dyn ImageSource) -> Result<(), ThumbForgeError> {
        match ingest_file(source).await {
            Ok(image) => {
                self.replace_source_image(image);
                Ok(())
            }
            Err(err) => {
                warn!("upload of '{}' rejected: {}", source.name(), err);
                self.error = Some(err.user_message());
                Err(err)
            }
        }
    }

    /// Use an already encoded photo as the source, with the same side effects as a
    /// successful [`upload`](Self::upload).
    pub fn replace_source_image(&mut self, image: EncodedImage) {
        debug!("source image replaced ({})", image.mime_type());
        self.source_image = Some(image);
        self.thumbnail = None;
        self.error = None;
        self.notice = None;
    }

    /// Generate a thumbnail for `title` from the current photo, ratio and style.
    pub async fn generate(&mut self, title: &str) -> Result<ThumbnailOutcome, ThumbForgeError> {
        let source_image = match &self.source_image {
            Some(image) => image.clone(),
            None => return Ok(ThumbnailOutcome::Skipped),
        };
        if title.trim().is_empty() {
            let err = ThumbForgeError::from(ValidationError::EmptyTitle);
            self.error = Some(err.user_message());
            return Err(err);
        }

        let request = ThumbnailRequest {
            title: title.to_string(),
            source_image,
            aspect_ratio: self.aspect_ratio,
            style: self.style,
        };

        self.error = None;
        self.notice = None;
        let busy = BusyGuard::new(&self.status, FlowStatus::Generating);
        let result = self.generator.generate_thumbnail(&request).await;
        drop(busy);

        match result {
            Ok(Some(thumbnail)) => {
                info!(
                    "thumbnail generated ({}, {})",
                    request.aspect_ratio, request.style
                );
                self.thumbnail = Some(thumbnail.clone());
                Ok(ThumbnailOutcome::Generated(thumbnail))
            }
            Ok(None) => {
                self.notice = Some(NO_IMAGE_RETURNED.to_string());
                Ok(ThumbnailOutcome::NoImage)
            }
            Err(err) => {
                self.error = Some(err.user_message());
                Err(err)
            }
        }
    }

    /// Drop the photo, the thumbnail, any error and notice. Ratio and style are kept.
    pub fn reset(&mut self) {
        self.source_image = None;
        self.thumbnail = None;
        self.error = None;
        self.notice = None;
    }

    /// Download name for the current thumbnail, if there is one.
    pub fn download_name(&self, title: &str) -> Option<String> {
        self.thumbnail
            .as_ref()
            .map(|_| download_name(self.aspect_ratio, title))
    }

    /// Write the current thumbnail into `dir`.
    pub async fn save(&self, dir: impl AsRef<Path>, title: &str) -> Result<PathBuf, ThumbForgeError> {
        let thumbnail = self
            .thumbnail
            .as_ref()
            .ok_or(ThumbForgeError::Validation(ValidationError::MissingImage))?;
        save_thumbnail(dir, thumbnail, self.aspect_ratio, title).await
    }
}
