use std::fmt;

use async_trait::async_trait;

use super::query::ListQuery;
use super::types::{MessagePage, PublishReceipt, PublishRequest};

/// Errors that can occur while talking to the message backend.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Transport failure (DNS, connection refused, reset).
    Network(String),
    /// The publish deadline elapsed and the request was dropped.
    Timeout,
    /// Backend answered with a non-success status.
    Api { status: u16, message: String },
    /// Body could not be decoded into an accepted shape.
    Parse(String),
    /// The publish task ended without reporting back.
    Cancelled,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "network error: {msg}"),
            ApiError::Timeout => write!(f, "request timed out"),
            ApiError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            ApiError::Parse(msg) => write!(f, "parse error: {msg}"),
            ApiError::Cancelled => write!(f, "request cancelled"),
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    /// Feedback line shown under the composer when a publish fails.
    pub fn publish_feedback(&self) -> String {
        match self {
            ApiError::Timeout => "Publish timed out. Please try again.".to_string(),
            ApiError::Network(_) => "Network error while publishing.".to_string(),
            ApiError::Api { message, .. } => format!("Publish failed: {message}"),
            ApiError::Parse(msg) => format!("Publish failed: {msg}"),
            ApiError::Cancelled => "Publish was cancelled.".to_string(),
        }
    }
}

/// The backend's two operations, behind a trait so tests can swap in a fake.
#[async_trait]
pub trait MessageBackend: Send + Sync {
    /// Short label for logs and the title bar.
    fn name(&self) -> &str;

    /// Publish one message. Implementations enforce their own deadline.
    async fn publish(&self, request: &PublishRequest) -> Result<PublishReceipt, ApiError>;

    /// Fetch one page of messages, normalized.
    async fn list(&self, query: &ListQuery) -> Result<MessagePage, ApiError>;
}
