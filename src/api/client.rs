//! HTTP implementation of [`MessageBackend`] on top of reqwest.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::StatusCode;
use serde_json::Value;

use super::backend::{ApiError, MessageBackend};
use super::query::ListQuery;
use super::types::{ListResponse, MessagePage, PayloadStyle, PublishReceipt, PublishRequest};

/// Where the backend lives and how to talk to it. Injected, never global.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendConfig {
    pub base_url: String,
    pub publish_path: String,
    pub list_path: String,
    pub payload_style: PayloadStyle,
    pub publish_timeout: Duration,
}

pub struct HttpBackend {
    config: BackendConfig,
    client: reqwest::Client,
}

impl HttpBackend {
    pub fn new(mut config: BackendConfig) -> Self {
        config.base_url = config.base_url.trim_end_matches('/').to_string();
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    async fn send_publish(&self, request: &PublishRequest) -> Result<PublishReceipt, ApiError> {
        let body = request.body(self.config.payload_style);
        let response = self
            .client
            .post(self.url(&self.config.publish_path))
            .json(&body)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        debug!("Publish response status: {}", response.status());

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        // A success body that isn't JSON still counts as a successful publish.
        let text = response.text().await.unwrap_or_default();
        debug!("Publish response body: {}", text);
        Ok(PublishReceipt::from_body(&text))
    }
}

#[async_trait]
impl MessageBackend for HttpBackend {
    fn name(&self) -> &str {
        "http"
    }

    async fn publish(&self, request: &PublishRequest) -> Result<PublishReceipt, ApiError> {
        info!(
            "Publishing message: len={}, message_id={:?}, style={:?}",
            request.text.len(),
            request.message_id,
            self.config.payload_style
        );

        // Dropping the future on timeout aborts the in-flight request.
        match tokio::time::timeout(self.config.publish_timeout, self.send_publish(request)).await
        {
            Ok(result) => {
                if let Err(e) = &result {
                    warn!("Publish failed: {}", e);
                }
                result
            }
            Err(_) => {
                warn!(
                    "Publish timed out after {:?}",
                    self.config.publish_timeout
                );
                Err(ApiError::Timeout)
            }
        }
    }

    async fn list(&self, query: &ListQuery) -> Result<MessagePage, ApiError> {
        let pairs = query.pairs();
        info!("Listing messages: {:?}", pairs);

        let response = self
            .client
            .get(self.url(&self.config.list_path))
            .query(&pairs)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        debug!("List response status: {}", response.status());

        if !response.status().is_success() {
            let err = api_error(response).await;
            warn!("List failed: {}", err);
            return Err(err);
        }

        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let decoded: ListResponse = serde_json::from_str(&body).map_err(|e| {
            warn!("Unrecognized list response: {}", e);
            ApiError::Parse(format!("unrecognized list response shape: {e}"))
        })?;

        let page = decoded.normalize();
        debug!("Listed {} records (total={})", page.items.len(), page.total);
        Ok(page)
    }
}

/// Builds an `Api` error from a non-success response, preferring the
/// backend's structured detail over the raw status.
async fn api_error(response: reqwest::Response) -> ApiError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    ApiError::Api {
        status: status.as_u16(),
        message: error_detail(status, &body),
    }
}

fn error_detail(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => ["details", "error"]
            .iter()
            .find_map(|key| match map.get(*key) {
                Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
                Some(Value::Null) | None => None,
                Some(Value::String(_)) => None,
                Some(other) => Some(other.to_string()),
            })
            .unwrap_or_else(|| status_text(status)),
        _ if !body.trim().is_empty() => body.trim().to_string(),
        _ => status_text(status),
    }
}

fn status_text(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| status.as_u16().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_detail_prefers_details() {
        let status = StatusCode::BAD_REQUEST;
        assert_eq!(
            error_detail(status, r#"{"details":"bad attrs","error":"x"}"#),
            "bad attrs"
        );
        assert_eq!(
            error_detail(status, r#"{"error":"message is required"}"#),
            "message is required"
        );
        assert_eq!(error_detail(status, r#"{"other":1}"#), "Bad Request");
        assert_eq!(error_detail(status, ""), "Bad Request");
        assert_eq!(error_detail(status, "upstream broke"), "upstream broke");
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let backend = HttpBackend::new(BackendConfig {
            base_url: "http://localhost:5000/".into(),
            publish_path: "/publish".into(),
            list_path: "/api/messages".into(),
            payload_style: PayloadStyle::Envelope,
            publish_timeout: Duration::from_secs(15),
        });
        assert_eq!(backend.base_url(), "http://localhost:5000");
        assert_eq!(backend.url("/publish"), "http://localhost:5000/publish");
    }
}
