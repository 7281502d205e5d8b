//! # TUI Components
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: top status bar
//! - `TextField`: bordered single-line input
//! - `SenderPanel`: composer view
//! - `FilterBar`: receiver filter inputs
//! - `MessageTable`: record table and pager
//!
//! ### Event Handlers
//!
//! - `FieldEditor`: applies edits to one borrowed text buffer
//! - `FilterEditor`: routes edits to the focused filter
//!
//! The text being edited lives in core state; components borrow it for one
//! render or one event. Only presentation state (focus, cursors) is owned
//! by the TUI.
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── title_bar.rs
//! ├── text_field.rs
//! ├── sender.rs
//! ├── filter_bar.rs
//! └── message_table.rs
//! ```

pub mod filter_bar;
pub mod message_table;
pub mod sender;
pub mod text_field;
mod title_bar;

pub use filter_bar::{FilterBar, FilterEditor, FilterEvent, FilterFocus};
pub use message_table::MessageTable;
pub use sender::{SenderFocus, SenderPanel};
pub use text_field::FieldEditor;
pub use title_bar::TitleBar;
