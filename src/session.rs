//! Capture screen state
//!
//! Tracks the busy/result/error state of one capture screen. A new capture
//! supersedes whatever the previous one produced: only the outcome of the most
//! recently started analysis is ever shown.

use crate::ai::FoodAnalysisService;
use crate::image::CapturedImage;
use crate::models::AnalysisResult;
use crate::{Error, Result};
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

/// What the photo picker handed back.
#[derive(Debug, Clone)]
pub enum PhotoSelection {
    Captured(CapturedImage),
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Analyzing,
    Analyzed(AnalysisResult),
    Failed(String),
}

/// What became of one [`CaptureSession::submit`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// The picker was cancelled; no request was made.
    Cancelled,
    /// A newer capture started before this one finished; its outcome was
    /// discarded and the screen state belongs to the newer capture.
    Superseded,
    /// This capture's outcome is now the screen state.
    Completed(SessionState),
}

/// Identifies one started analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureTicket {
    id: Uuid,
}

impl CaptureTicket {
    pub fn id(&self) -> Uuid {
        self.id
    }
}

struct SessionInner {
    state: SessionState,
    latest: Option<Uuid>,
}

pub struct CaptureSession {
    service: Arc<dyn FoodAnalysisService>,
    inner: Mutex<SessionInner>,
}

impl CaptureSession {
    pub fn new(service: Arc<dyn FoodAnalysisService>) -> Self {
        Self {
            service,
            inner: Mutex::new(SessionInner {
                state: SessionState::Idle,
                latest: None,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SessionInner> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn state(&self) -> SessionState {
        self.lock().state.clone()
    }

    /// Clears any previous result or error and marks a new analysis in flight.
    pub fn begin(&self) -> CaptureTicket {
        let ticket = CaptureTicket { id: Uuid::new_v4() };
        let mut inner = self.lock();
        if matches!(inner.state, SessionState::Analyzing) {
            tracing::debug!("Capture {} supersedes an analysis still in flight", ticket.id);
        }
        inner.latest = Some(ticket.id);
        inner.state = SessionState::Analyzing;
        ticket
    }

    /// Applies an outcome if `ticket` is still the latest capture.
    ///
    /// Returns `false` when the outcome was stale and discarded.
    pub fn finish(&self, ticket: &CaptureTicket, outcome: Result<AnalysisResult>) -> bool {
        let mut inner = self.lock();
        if inner.latest != Some(ticket.id) {
            tracing::debug!("Discarding stale outcome for capture {}", ticket.id);
            return false;
        }

        inner.state = match outcome {
            Ok(result) => SessionState::Analyzed(result),
            Err(e) => {
                tracing::error!("Analysis for capture {} failed: {}", ticket.id, e);
                SessionState::Failed(user_message(&e))
            }
        };
        true
    }

    /// Runs one analysis for the picker's result.
    ///
    /// A cancelled picker is not an error: no request is made and the state
    /// is left untouched.
    pub async fn submit(&self, selection: PhotoSelection) -> Submission {
        let image = match selection {
            PhotoSelection::Captured(image) => image,
            PhotoSelection::Cancelled => {
                tracing::debug!("Photo selection cancelled");
                return Submission::Cancelled;
            }
        };

        let ticket = self.begin();
        let outcome = self.service.analyze(&image).await;
        if self.finish(&ticket, outcome) {
            Submission::Completed(self.state())
        } else {
            Submission::Superseded
        }
    }
}

/// Human-readable text for a failed analysis.
pub fn user_message(error: &Error) -> String {
    match error {
        Error::Encoding(_) => "Could not read that photo. Try a different one.".to_string(),
        Error::Server { status, .. } => format!(
            "The analysis service returned an error (status {}). Please try again.",
            status
        ),
        Error::MalformedResponse { .. } => {
            "Could not understand the analysis result. Please try again.".to_string()
        }
        Error::Transport(_) => {
            "Could not reach the analysis service. Check your connection and try again."
                .to_string()
        }
        Error::Config(_) | Error::Io(_) => format!("Failed to analyze the image. {}", error),
    }
}
