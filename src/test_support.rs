//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::json;

use crate::api::{
    ApiError, ListQuery, MessageBackend, MessagePage, MessageRecord, PublishReceipt,
    PublishRequest,
};

/// In-memory backend that serves a fixed page and counts calls.
pub struct ScriptedBackend {
    page: MessagePage,
    publish_result: Mutex<Result<PublishReceipt, ApiError>>,
    list_calls: AtomicUsize,
    publish_calls: AtomicUsize,
}

impl ScriptedBackend {
    pub fn with_records(n: usize) -> Self {
        let items: Vec<MessageRecord> = (0..n)
            .map(|i| {
                serde_json::from_value(json!({
                    "messageId": format!("m{i}"),
                    "data": format!("message {i}"),
                    "attributes": {"source": "ui"},
                    "publishTime": "2024-01-15T09:05:00Z",
                }))
                .unwrap()
            })
            .collect();
        Self {
            page: MessagePage {
                total: items.len() as u64,
                items,
            },
            publish_result: Mutex::new(Ok(PublishReceipt::default())),
            list_calls: AtomicUsize::new(0),
            publish_calls: AtomicUsize::new(0),
        }
    }

    pub fn fail_publish(self, err: ApiError) -> Self {
        *self.publish_result.lock().unwrap() = Err(err);
        self
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn publish_calls(&self) -> usize {
        self.publish_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MessageBackend for ScriptedBackend {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn publish(&self, _request: &PublishRequest) -> Result<PublishReceipt, ApiError> {
        self.publish_calls.fetch_add(1, Ordering::SeqCst);
        self.publish_result.lock().unwrap().clone()
    }

    async fn list(&self, _query: &ListQuery) -> Result<MessagePage, ApiError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.page.clone())
    }
}
