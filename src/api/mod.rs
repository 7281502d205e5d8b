//! # Message API
//!
//! Everything that knows the backend's HTTP contract: wire types, response
//! normalization, query building, and the reqwest client. The rest of the
//! crate only sees [`MessageBackend`].

pub mod backend;
pub mod client;
pub mod query;
pub mod types;

pub use backend::{ApiError, MessageBackend};
pub use client::{BackendConfig, HttpBackend};
pub use query::{DuplicateFilter, FilterState, ListQuery};
pub use types::{
    ListResponse, MessagePage, MessageRecord, PayloadStyle, PublishReceipt, PublishRequest,
    format_publish_time,
};
