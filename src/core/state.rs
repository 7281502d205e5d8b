//! # Application State
//!
//! Core business state for pubdash. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── view: View                     // Sender or Receiver
//! ├── composer: ComposerState        // text, message id, in-flight flag
//! ├── list: ListState                // records, filters, page, auto-refresh
//! ├── status_message: String         // title bar text
//! ├── source: String                 // attributes.source on publish
//! ├── after_publish: AfterPublish    // local echo or reload
//! └── backend_label: String          // shown in the title bar
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use serde::{Deserialize, Serialize};

use crate::core::composer::ComposerState;
use crate::core::config::ResolvedConfig;
use crate::core::listing::ListState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Sender,
    Receiver,
}

impl View {
    pub fn toggle(self) -> Self {
        match self {
            View::Sender => View::Receiver,
            View::Receiver => View::Sender,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            View::Sender => "Sender",
            View::Receiver => "Receiver",
        }
    }
}

/// What the list does after a successful publish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AfterPublish {
    /// Re-fetch the current page from the server.
    #[default]
    Reload,
    /// Prepend the returned record locally.
    Echo,
}

pub struct App {
    pub view: View,
    pub composer: ComposerState,
    pub list: ListState,
    pub status_message: String,
    pub source: String,
    pub after_publish: AfterPublish,
    pub backend_label: String,
}

impl App {
    pub fn new(page_size: u32, auto_refresh: bool) -> Self {
        Self {
            view: View::default(),
            composer: ComposerState::default(),
            list: ListState::new(page_size, auto_refresh),
            status_message: String::from("Welcome to pubdash!"),
            source: crate::core::config::DEFAULT_SOURCE.to_string(),
            after_publish: AfterPublish::default(),
            backend_label: String::new(),
        }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self {
            source: config.source.clone(),
            after_publish: config.after_publish,
            backend_label: config.backend.base_url.clone(),
            ..Self::new(config.page_size, config.auto_refresh)
        }
    }
}
