//! # I/O Abstraction Layer
//!
//! Trait seams for everything the controller shows to the user, so the
//! controller can be driven by tests without a terminal.
//!
//! ```text
//! Production:  AppController ──▶ TerminalDialog   ──▶ stderr prompt / stdin answer
//!                            ──▶ HtmlFilePageSink ──▶ page file on disk
//!                            ──▶ StdoutPageSink   ──▶ stdout
//!
//! Testing:     AppController ──▶ MockDialog       ──▶ recorded alerts, queued answers
//!                            ──▶ MockPageSink     ──▶ Vec<RenderedPage>
//! ```

use crate::board::views::RenderedPage;
use anyhow::Result;

pub mod file;
pub mod mock;
pub mod terminal;

pub use file::HtmlFilePageSink;
pub use mock::{MockDialog, MockPageSink};
pub use terminal::{LineRead, StdinLines, StdoutPageSink, TerminalDialog};

/// Blocking user notifications
pub trait Dialog {
    /// Tell the user something went wrong; returns once acknowledged
    fn alert(&mut self, message: &str);

    /// Ask a yes/no question
    fn confirm(&mut self, message: &str) -> bool;
}

/// Destination of rendered pages
pub trait PageSink {
    /// Show `page`, replacing whatever was shown before
    fn present(&mut self, page: &RenderedPage) -> Result<()>;
}
