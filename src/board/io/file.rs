//! # HTML File Sink
//!
//! Writes each rendered page over a file, e.g. one a browser is showing.
//! The page is written to a temp file next to the target and then moved into
//! place, so a reader never sees a half-written page.

use super::PageSink;
use crate::board::views::RenderedPage;
use anyhow::{Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

#[derive(Debug, Clone)]
pub struct HtmlFilePageSink {
    path: PathBuf,
}

impl HtmlFilePageSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PageSink for HtmlFilePageSink {
    fn present(&mut self, page: &RenderedPage) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut file = NamedTempFile::new_in(dir)
            .with_context(|| format!("Failed to create temp file in {}", dir.display()))?;
        file.write_all(page.html.as_bytes())
            .context("Failed to write page")?;
        file.persist(&self.path)
            .with_context(|| format!("Failed to write page to {}", self.path.display()))?;

        tracing::debug!("Page written to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(html: &str) -> RenderedPage {
        RenderedPage {
            html: html.to_string(),
            ..RenderedPage::default()
        }
    }

    #[test]
    fn present_should_replace_file_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("board.html");
        let mut sink = HtmlFilePageSink::new(&path);

        sink.present(&page("<p>first</p>")).unwrap();
        sink.present(&page("<p>second</p>")).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<p>second</p>");
    }

    #[test]
    fn present_should_fail_for_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = HtmlFilePageSink::new(dir.path().join("missing").join("board.html"));

        assert!(sink.present(&page("<p>x</p>")).is_err());
    }
}
