//! File-backed editing surface.
//!
//! The user's editor owns the text; luapad sees each saved version as a
//! full-text change and "sets the displayed text" by writing the file.

use std::path::PathBuf;

use tracing::debug;

use crate::error::Result;

/// A script file plus the text luapad last wrote to it.
pub struct Document {
    path: PathBuf,
    last_written: Option<String>,
}

impl Document {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            last_written: None,
        }
    }

    /// Current file contents.
    pub fn read(&self) -> Result<String> {
        Ok(std::fs::read_to_string(&self.path)?)
    }

    /// Read the file, returning `None` when it only holds luapad's own last write.
    pub fn read_change(&mut self) -> Result<Option<String>> {
        let text = self.read()?;
        if self.last_written.as_deref() == Some(text.as_str()) {
            debug!(path = %self.path.display(), "Ignoring echo of own write");
            return Ok(None);
        }
        self.last_written = None;
        Ok(Some(text))
    }

    /// Replace the file contents.
    pub fn write(&mut self, text: &str) -> Result<()> {
        std::fs::write(&self.path, text)?;
        self.last_written = Some(text.to_string());
        debug!(path = %self.path.display(), bytes = text.len(), "Document written");
        Ok(())
    }

    /// Write `text` only if the file does not exist yet. Returns whether it wrote.
    pub fn create_if_missing(&mut self, text: &str) -> Result<bool> {
        if self.path.exists() {
            return Ok(false);
        }
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        self.write(text)?;
        Ok(true)
    }
}
