//! Test Event Source Implementation
//!
//! Serves a pre-programmed queue of UI events, allowing deterministic
//! controller runs without a terminal.

use super::event_source::EventSource;
use super::ui_events::UiEvent;
use anyhow::Result;
use std::collections::VecDeque;
use std::time::Duration;

/// Event source backed by a queue
#[derive(Debug, Clone, Default)]
pub struct TestEventSource {
    events: VecDeque<UiEvent>,
}

impl TestEventSource {
    /// Create a test event source with an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a test event source with pre-populated events
    pub fn with_events(events: Vec<UiEvent>) -> Self {
        Self {
            events: events.into(),
        }
    }

    /// Queue another event
    pub fn push_event(&mut self, event: UiEvent) {
        self.events.push_back(event);
    }

    /// Events not yet read
    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

impl EventSource for TestEventSource {
    fn poll(&mut self, _timeout: Duration) -> Result<bool> {
        Ok(!self.events.is_empty())
    }

    fn read(&mut self) -> Result<UiEvent> {
        self.events
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("No events available"))
    }

    fn is_exhausted(&self) -> bool {
        self.events.is_empty()
    }
}
