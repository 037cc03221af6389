//! # Events Module
//!
//! UI events and the sources they are read from.

pub mod event_source;
pub mod terminal_event_source;
pub mod test_event_source;
pub mod ui_events;

// Re-export all types for easy access
pub use event_source::EventSource;
pub use terminal_event_source::TerminalEventSource;
pub use test_event_source::TestEventSource;
pub use ui_events::{UiEvent, COMMAND_USAGE};
