//! The application step machine.
//!
//! [`StudioController`] moves between two steps. The selected title lives inside the
//! [`Step::CreatingThumbnail`] variant, so it exists exactly as long as that step does.
//!
//! ```text
//! SelectingTitle --select(title)--> CreatingThumbnail { title }
//! CreatingThumbnail --back()------> SelectingTitle
//! ```

use crate::thumbforge::error::{ThumbForgeError, ValidationError};
use crate::thumbforge::gateway::{AiGateway, ThumbnailGenerator, TitleGenerator};
use crate::thumbforge::thumbnail_flow::{ThumbnailCreationFlow, ThumbnailOutcome};
use crate::thumbforge::title_flow::TitleSelectionFlow;
use log::info;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
    SelectingTitle,
    CreatingThumbnail { title: String },
}

impl Step {
    pub fn name(&self) -> &'static str {
        match self {
            Step::SelectingTitle => "selecting a title",
            Step::CreatingThumbnail { .. } => "creating a thumbnail",
        }
    }
}

pub struct StudioController {
    step: Step,
    titles: TitleSelectionFlow,
    thumbnails: ThumbnailCreationFlow,
}

impl StudioController {
    pub fn new(
        title_generator: Arc<dyn TitleGenerator>,
        thumbnail_generator: Arc<dyn ThumbnailGenerator>,
    ) -> Self {
        Self {
            step: Step::SelectingTitle,
            titles: TitleSelectionFlow::new(title_generator),
            thumbnails: ThumbnailCreationFlow::new(thumbnail_generator),
        }
    }

    /// Both flows share one gateway.
    pub fn from_gateway(gateway: Arc<AiGateway>) -> Self {
        Self::new(gateway.clone(), gateway)
    }

    pub fn step(&self) -> &Step {
        &self.step
    }

    pub fn selected_title(&self) -> Option<&str> {
        match &self.step {
            Step::CreatingThumbnail { title } => Some(title.as_str()),
            Step::SelectingTitle => None,
        }
    }

    pub fn titles(&self) -> &TitleSelectionFlow {
        &self.titles
    }

    pub fn titles_mut(&mut self) -> &mut TitleSelectionFlow {
        &mut self.titles
    }

    pub fn thumbnails(&self) -> &ThumbnailCreationFlow {
        &self.thumbnails
    }

    pub fn thumbnails_mut(&mut self) -> &mut ThumbnailCreationFlow {
        &mut self.thumbnails
    }

    /// Pick `title` and move on to thumbnail creation.
    pub fn select(&mut self, title: &str) -> Result<(), ThumbForgeError> {
        if let Step::CreatingThumbnail { .. } = self.step {
            return Err(ThumbForgeError::InvalidTransition {
                state: self.step.name(),
                action: "select a title",
            });
        }
        if title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle.into());
        }
        info!("title selected: {}", title);
        self.step = Step::CreatingThumbnail {
            title: title.to_string(),
        };
        Ok(())
    }

    /// Return to title selection, dropping the title and everything both flows held.
    pub fn back(&mut self) {
        self.thumbnails.reset();
        self.titles.reset();
        self.step = Step::SelectingTitle;
    }

    /// Generate a thumbnail for the selected title.
    pub async fn generate_thumbnail(&mut self) -> Result<ThumbnailOutcome, ThumbForgeError> {
        match &self.step {
            Step::CreatingThumbnail { title } => self.thumbnails.generate(title).await,
            Step::SelectingTitle => Err(ThumbForgeError::InvalidTransition {
                state: self.step.name(),
                action: "generate a thumbnail",
            }),
        }
    }

    /// Download name for the current thumbnail.
    pub fn download_name(&self) -> Option<String> {
        self.selected_title()
            .and_then(|title| self.thumbnails.download_name(title))
    }

    /// Write the current thumbnail into `dir`.
    pub async fn save_thumbnail(&self, dir: impl AsRef<Path>) -> Result<PathBuf, ThumbForgeError> {
        match self.selected_title() {
            Some(title) => self.thumbnails.save(dir, title).await,
            None => Err(ThumbForgeError::InvalidTransition {
                state: self.step.name(),
                action: "save a thumbnail",
            }),
        }
    }
}
