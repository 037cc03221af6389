//! Terminal Event Source Implementation
//!
//! Reads one command per stdin line and turns it into a `UiEvent`. Lines
//! that are not valid commands are reported on stderr and skipped.

use super::event_source::EventSource;
use super::ui_events::{UiEvent, COMMAND_USAGE};
use crate::board::io::{LineRead, StdinLines};
use anyhow::Result;
use std::time::Duration;

/// Production event source backed by stdin
#[derive(Debug)]
pub struct TerminalEventSource {
    lines: StdinLines,
    pending: Option<UiEvent>,
    exhausted: bool,
}

impl TerminalEventSource {
    pub fn new(lines: StdinLines) -> Self {
        Self {
            lines,
            pending: None,
            exhausted: false,
        }
    }
}

impl EventSource for TerminalEventSource {
    fn poll(&mut self, timeout: Duration) -> Result<bool> {
        if self.pending.is_some() {
            return Ok(true);
        }
        if self.exhausted {
            return Ok(false);
        }

        match self.lines.recv_timeout(timeout) {
            LineRead::Line(line) if line.trim().is_empty() => Ok(false),
            LineRead::Line(line) => match line.parse::<UiEvent>() {
                Ok(event) => {
                    self.pending = Some(event);
                    Ok(true)
                }
                Err(e) => {
                    tracing::debug!("Rejected command line {line:?}: {e}");
                    eprintln!("{e}\n{COMMAND_USAGE}");
                    Ok(false)
                }
            },
            LineRead::Timeout => Ok(false),
            LineRead::Closed => {
                tracing::info!("Input closed, no more events");
                self.exhausted = true;
                Ok(false)
            }
        }
    }

    fn read(&mut self) -> Result<UiEvent> {
        self.pending
            .take()
            .ok_or_else(|| anyhow::anyhow!("No events available"))
    }

    fn is_exhausted(&self) -> bool {
        self.exhausted && self.pending.is_none()
    }
}
