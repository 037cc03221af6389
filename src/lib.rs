//! # Postboard - Terminal CRUD Board for a REST API
//!
//! Loads posts and users from a REST API (JSONPlaceholder by default),
//! renders them as an HTML page and lets the user create, edit and delete
//! posts. Local state only ever mirrors what the server confirmed.
//!
//! ## Architecture
//!
//! The board follows a small Model-View-ViewModel split:
//!
//! ```text
//! ┌─────────────┐   UiEvents   ┌──────────────┐   Gateway    ┌─────────────┐
//! │ EventSource │─────────────▶│AppController │─────────────▶│  REST API   │
//! └─────────────┘              │              │◀─────────────│             │
//!                              │ - AppState   │   Records    └─────────────┘
//! ┌─────────────┐   Pages      │ - Form       │
//! │  PageSink   │◀─────────────│ - Bindings   │
//! └─────────────┘              └──────────────┘
//!                                     │ alert / confirm
//!                                     ▼
//!                              ┌──────────────┐
//!                              │    Dialog    │
//!                              └──────────────┘
//! ```

pub mod board;
pub mod cmd_args;
pub mod config;

// Re-export main types for easy access
pub use board::*;
