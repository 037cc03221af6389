//! # Mock I/O Implementations for Testing
//!
//! Dialog and page sink doubles that record what the controller showed.

use super::{Dialog, PageSink};
use crate::board::views::RenderedPage;
use anyhow::Result;
use std::collections::VecDeque;

/// Mock dialog
///
/// Records every alert and prompt. Confirm answers are taken from a queue;
/// once it is empty, `default_answer` is used.
#[derive(Debug, Clone, Default)]
pub struct MockDialog {
    alerts: Vec<String>,
    prompts: Vec<String>,
    answers: VecDeque<bool>,
    default_answer: bool,
}

impl MockDialog {
    /// Create a dialog that declines every confirmation
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a dialog that accepts every confirmation
    pub fn accepting() -> Self {
        Self {
            default_answer: true,
            ..Self::default()
        }
    }

    /// Queue the answer to the next confirmation
    pub fn push_answer(&mut self, answer: bool) {
        self.answers.push_back(answer);
    }

    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    pub fn last_alert(&self) -> Option<&str> {
        self.alerts.last().map(String::as_str)
    }
}

impl Dialog for MockDialog {
    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    fn confirm(&mut self, message: &str) -> bool {
        self.prompts.push(message.to_string());
        self.answers.pop_front().unwrap_or(self.default_answer)
    }
}

/// Mock page sink
///
/// Keeps every presented page for verification.
#[derive(Debug, Clone, Default)]
pub struct MockPageSink {
    pages: Vec<RenderedPage>,
    fail_writes: bool,
}

impl MockPageSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent present() fail
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    pub fn render_count(&self) -> usize {
        self.pages.len()
    }

    pub fn last_page(&self) -> Option<&RenderedPage> {
        self.pages.last()
    }

    /// Html of the last presented page, empty if nothing was presented
    pub fn last_html(&self) -> &str {
        self.pages.last().map(|page| page.html.as_str()).unwrap_or("")
    }
}

impl PageSink for MockPageSink {
    fn present(&mut self, page: &RenderedPage) -> Result<()> {
        if self.fail_writes {
            anyhow::bail!("Mock sink refused the page");
        }
        self.pages.push(page.clone());
        Ok(())
    }
}
