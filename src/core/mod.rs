//! # Core Application Logic
//!
//! This module contains pubdash's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │ Effects
//!                    ┌───────────▼─────────────┐
//!                    │        RUNTIME          │
//!                    │  (tokio tasks, timer)   │
//!                    └───────────┬─────────────┘
//!                                │
//!                         ┌──────▼─────┐
//!                         │    TUI     │
//!                         │  Adapter   │
//!                         │ (ratatui)  │
//!                         └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum and `update()` reducer
//! - [`composer`]: Sender-side state and submit rules
//! - [`listing`]: Receiver-side list, pagination and reload sequencing
//! - [`config`]: Layered configuration (file, env, CLI)

pub mod action;
pub mod composer;
pub mod config;
pub mod listing;
pub mod state;
