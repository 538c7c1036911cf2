//! Error types shared by the gateway, ingestion and flows.
//!
//! Remote failures are collapsed into fixed, user-facing messages. The underlying cause is
//! written to the log by the component that observed it and never travels further.

use std::error::Error;
use std::fmt;

/// Message shown when title generation fails for any transport or model reason.
pub const TITLE_GENERATION_FAILED: &str =
    "Failed to generate titles. Make sure the API key is valid.";

/// Message shown when thumbnail generation fails for any transport or model reason.
pub const THUMBNAIL_GENERATION_FAILED: &str = "Failed to create the thumbnail. Please try again.";

/// Message shown when the image model answered without any image part.
pub const NO_IMAGE_RETURNED: &str = "The AI did not return any image data.";

/// Message shown when the title model answered with nothing usable.
pub const NO_TITLES_RETURNED: &str = "The AI did not return any titles. Try another topic.";

/// Input problems detected locally, before any network call is made.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// The topic is empty once surrounding whitespace is removed.
    EmptyTopic,
    /// The title to render or select is empty.
    EmptyTitle,
    /// No source photo has been ingested, or its payload is empty.
    MissingImage,
    /// The picked file exceeds the upload ceiling.
    FileTooLarge { size: u64, limit: u64 },
    /// A string that should have been a `data:<mime>;base64,<payload>` URI was not.
    InvalidDataUri,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyTopic => write!(f, "Please enter a video topic."),
            ValidationError::EmptyTitle => write!(f, "Please choose a title first."),
            ValidationError::MissingImage => write!(f, "Please upload a photo first."),
            ValidationError::FileTooLarge { limit, .. } => write!(
                f,
                "File is too large (max {}MB).",
                limit / (1024 * 1024)
            ),
            ValidationError::InvalidDataUri => write!(f, "Image data is not a valid data URI."),
        }
    }
}

impl Error for ValidationError {}

/// Every failure surfaced by this crate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ThumbForgeError {
    /// Rejected locally; no request was sent.
    Validation(ValidationError),
    /// The title model could not be reached or refused the request.
    TitleGeneration(String),
    /// The image model could not be reached or refused the request.
    ThumbnailGeneration(String),
    /// An action was attempted in a step that does not allow it.
    InvalidTransition {
        state: &'static str,
        action: &'static str,
    },
    /// Reading a local file or writing an export failed.
    Io(String),
}

impl ThumbForgeError {
    /// The text a UI should show for this error.
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ThumbForgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThumbForgeError::Validation(err) => write!(f, "{}", err),
            ThumbForgeError::TitleGeneration(msg) => write!(f, "{}", msg),
            ThumbForgeError::ThumbnailGeneration(msg) => write!(f, "{}", msg),
            ThumbForgeError::InvalidTransition { state, action } => {
                write!(f, "Cannot {} while {}.", action, state)
            }
            ThumbForgeError::Io(msg) => write!(f, "File error: {}", msg),
        }
    }
}

impl Error for ThumbForgeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ThumbForgeError::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for ThumbForgeError {
    fn from(err: ValidationError) -> Self {
        ThumbForgeError::Validation(err)
    }
}

impl From<std::io::Error> for ThumbForgeError {
    fn from(err: std::io::Error) -> Self {
        ThumbForgeError::Io(err.to_string())
    }
}
