//! # Terminal I/O
//!
//! Stdin is read by one background thread and handed out line by line, so
//! the event source and the confirm prompt share the same input without
//! stealing lines from each other.

use super::{Dialog, PageSink};
use crate::board::views::RenderedPage;
use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Outcome of waiting for a line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineRead {
    Line(String),
    Timeout,
    Closed,
}

/// Shared handle to lines read from stdin
#[derive(Debug, Clone)]
pub struct StdinLines {
    receiver: Arc<Mutex<Receiver<String>>>,
}

impl StdinLines {
    /// Start the reader thread on the process stdin
    pub fn spawn() -> Self {
        let (sender, receiver) = mpsc::channel();
        std::thread::spawn(move || {
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                match line {
                    Ok(line) => {
                        if sender.send(line).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        tracing::warn!("Stopped reading stdin: {e}");
                        break;
                    }
                }
            }
            tracing::debug!("Stdin closed");
        });
        Self::from_receiver(receiver)
    }

    /// Wrap an existing line channel
    pub fn from_receiver(receiver: Receiver<String>) -> Self {
        Self {
            receiver: Arc::new(Mutex::new(receiver)),
        }
    }

    /// Wait up to `timeout` for the next line
    pub fn recv_timeout(&self, timeout: Duration) -> LineRead {
        match self.lock().recv_timeout(timeout) {
            Ok(line) => LineRead::Line(line),
            Err(RecvTimeoutError::Timeout) => LineRead::Timeout,
            Err(RecvTimeoutError::Disconnected) => LineRead::Closed,
        }
    }

    /// Block until the next line, or None once input has ended
    pub fn recv(&self) -> Option<String> {
        self.lock().recv().ok()
    }

    fn lock(&self) -> MutexGuard<'_, Receiver<String>> {
        self.receiver.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Alerts and confirmations on stderr, answers from stdin
#[derive(Debug, Clone)]
pub struct TerminalDialog {
    lines: StdinLines,
}

impl TerminalDialog {
    pub fn new(lines: StdinLines) -> Self {
        Self { lines }
    }
}

impl Dialog for TerminalDialog {
    fn alert(&mut self, message: &str) {
        eprintln!("! {message}");
    }

    fn confirm(&mut self, message: &str) -> bool {
        eprint!("{message} [y/N] ");
        let _ = io::stderr().flush();
        match self.lines.recv() {
            Some(answer) => is_yes(&answer),
            None => false,
        }
    }
}

/// Whether a typed answer means yes
pub fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Writes every page to stdout
#[derive(Debug, Default)]
pub struct StdoutPageSink;

impl StdoutPageSink {
    pub fn new() -> Self {
        Self
    }
}

impl PageSink for StdoutPageSink {
    fn present(&mut self, page: &RenderedPage) -> Result<()> {
        let mut stdout = io::stdout().lock();
        stdout
            .write_all(page.html.as_bytes())
            .and_then(|()| stdout.flush())
            .context("Failed to write page to stdout")
    }
}
