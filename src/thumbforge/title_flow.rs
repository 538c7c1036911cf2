//! Title selection: topic in, ranked candidates out.
//!
//! The flow owns the last submitted topic, the current candidates, a user-facing error
//! slot and a separate notice slot for an empty batch. Its busy state is published on a
//! `watch` channel so a front end can disable the submit control while a request is
//! outstanding.

use crate::thumbforge::error::{ThumbForgeError, ValidationError, NO_TITLES_RETURNED};
use crate::thumbforge::gateway::{TitleCandidate, TitleGenerator};
use crate::thumbforge::types::{BusyGuard, FlowStatus};
use log::{debug, info};
use std::sync::Arc;
use tokio::sync::watch;

pub struct TitleSelectionFlow {
    generator: Arc<dyn TitleGenerator>,
    topic: String,
    candidates: Vec<TitleCandidate>,
    error: Option<String>,
    notice: Option<String>,
    status: watch::Sender<FlowStatus>,
}

impl TitleSelectionFlow {
    pub fn new(generator: Arc<dyn TitleGenerator>) -> Self {
        let (status, _) = watch::channel(FlowStatus::Idle);
        Self {
            generator,
            topic: String::new(),
            candidates: Vec::new(),
            error: None,
            notice: None,
            status,
        }
    }

    /// Receiver that observes `Idle` / `Loading` transitions.
    pub fn subscribe(&self) -> watch::Receiver<FlowStatus> {
        self.status.subscribe()
    }

    pub fn status(&self) -> FlowStatus {
        *self.status.borrow()
    }

    pub fn is_loading(&self) -> bool {
        self.status() == FlowStatus::Loading
    }

    /// Last topic submitted to [`generate`](Self::generate).
    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn candidates(&self) -> &[TitleCandidate] {
        &self.candidates
    }

    pub fn candidate(&self, index: usize) -> Option<&str> {
        self.candidates.get(index).map(String::as_str)
    }

    /// Message to show the user, if the last attempt failed.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Set when the last attempt succeeded but returned no titles.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Ask for titles about `topic`, replacing any previous candidates.
    ///
    /// Failures are recorded in [`error`](Self::error) and also returned. An empty batch is
    /// not a failure: it returns `Ok` with no candidates and sets [`notice`](Self::notice).
    pub async fn generate(&mut self, topic: &str) -> Result<&[TitleCandidate], ThumbForgeError> {
        let topic = topic.trim();
        if topic.is_empty() {
            let err = ThumbForgeError::from(ValidationError::EmptyTopic);
            self.error = Some(err.user_message());
            return Err(err);
        }

        self.topic = topic.to_string();
        self.candidates.clear();
        self.error = None;
        self.notice = None;
        debug!("requesting titles for '{}'", self.topic);

        let busy = BusyGuard::new(&self.status, FlowStatus::Loading);
        let result = self.generator.generate_titles(&self.topic).await;
        drop(busy);

        match result {
            Ok(titles) => {
                if titles.is_empty() {
                    self.notice = Some(NO_TITLES_RETURNED.to_string());
                }
                info!("{} title candidate(s) for '{}'", titles.len(), self.topic);
                self.candidates = titles;
                Ok(self.candidates.as_slice())
            }
            Err(err) => {
                self.error = Some(err.user_message());
                Err(err)
            }
        }
    }

    /// Forget the topic, candidates, error and notice.
    pub fn reset(&mut self) {
        self.topic.clear();
        self.candidates.clear();
        self.error = None;
        self.notice = None;
    }

    /// Repeat the last request with the same topic.
    pub async fn regenerate(&mut self) -> Result<&[TitleCandidate], ThumbForgeError> {
        let topic = self.topic.clone();
        self.generate(&topic).await
    }
}
