//! # Event Source Abstraction
//!
//! Where UI events come from. Production reads commands from the terminal;
//! tests inject a fixed queue of events so the controller can be driven
//! without a TTY.
//!
//! ```text
//! Production:   AppController ──▶ TerminalEventSource ──▶ stdin lines
//! Testing:      AppController ──▶ TestEventSource     ──▶ VecDeque<UiEvent>
//! ```

use super::ui_events::UiEvent;
use anyhow::Result;
use std::time::Duration;

/// Trait for abstracting UI event input
pub trait EventSource {
    /// Check if an event is available, waiting at most `timeout`
    fn poll(&mut self, timeout: Duration) -> Result<bool>;

    /// Read the next available event
    ///
    /// This should only be called after poll() returns true.
    fn read(&mut self) -> Result<UiEvent>;

    /// Check if the source is exhausted
    ///
    /// Returns true once no more events will ever arrive (end of input or
    /// an emptied test queue).
    fn is_exhausted(&self) -> bool {
        false
    }
}
