//! # Composer
//!
//! Sender-side state: the text being typed, an optional client-supplied
//! message id, and the in-flight flag that blocks double submits.

use crate::api::{ApiError, PublishReceipt, PublishRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackKind {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub kind: FeedbackKind,
    pub text: String,
}

impl Feedback {
    fn new(kind: FeedbackKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ComposerState {
    pub text: String,
    pub message_id: String,
    pub busy: bool,
    pub feedback: Option<Feedback>,
}

impl ComposerState {
    /// Claims the in-flight slot and builds the request.
    ///
    /// Returns `None` (and sends nothing) for blank input or while a
    /// previous publish is still in flight.
    pub fn begin_submit(&mut self, source: &str) -> Option<PublishRequest> {
        if self.busy {
            return None;
        }
        if self.text.trim().is_empty() {
            self.feedback = Some(Feedback::new(FeedbackKind::Info, "Message cannot be empty."));
            return None;
        }

        self.busy = true;
        self.feedback = None;

        let message_id = self.message_id.trim();
        Some(PublishRequest {
            text: self.text.clone(),
            source: source.to_string(),
            message_id: (!message_id.is_empty()).then(|| message_id.to_string()),
        })
    }

    /// Releases the in-flight slot. Called exactly once per accepted submit.
    pub fn finish_submit(&mut self, result: &Result<PublishReceipt, ApiError>) {
        self.busy = false;
        match result {
            Ok(receipt) => {
                self.text.clear();
                self.message_id.clear();
                self.feedback = Some(Feedback::new(FeedbackKind::Success, success_text(receipt)));
            }
            Err(e) => {
                self.feedback = Some(Feedback::new(FeedbackKind::Error, e.publish_feedback()));
            }
        }
    }
}

fn success_text(receipt: &PublishReceipt) -> String {
    let mut text = String::from("Published");
    if let Some(id) = &receipt.message_id {
        text.push_str(&format!(" (id: {id})"));
    }
    if receipt.profanity_masked {
        text.push_str(" [masked]");
    }
    if receipt.flagged {
        text.push_str(" [flagged]");
    }
    text
}
