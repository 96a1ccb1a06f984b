//! Attachment storage for uploaded files.
//!
//! Client-supplied names are reduced to a safe ASCII subset before touching
//! the filesystem. A later upload with the same name replaces the earlier one.

use anyhow::{Context, Result};
use regex::Regex;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};

const UNSAFE_CHARS: &str = r"[^A-Za-z0-9_.-]";

/// Reduces client file names to `[A-Za-z0-9_.-]`
#[derive(Debug, Clone)]
pub struct FileNameSanitizer {
    unsafe_chars: Regex,
}

impl FileNameSanitizer {
    pub fn new() -> Result<Self> {
        let unsafe_chars =
            Regex::new(UNSAFE_CHARS).context("Failed to compile file name filter")?;
        Ok(Self { unsafe_chars })
    }

    /// Path separators and whitespace become `_`, leading and trailing
    /// `.`/`_` are trimmed. Returns `None` when nothing usable is left.
    pub fn sanitize(&self, name: &str) -> Option<String> {
        let flattened: String = name
            .chars()
            .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
            .filter(|c| c.is_ascii())
            .collect();
        let joined = flattened.split_whitespace().collect::<Vec<_>>().join("_");
        let cleaned = self.unsafe_chars.replace_all(&joined, "");
        let trimmed = cleaned.trim_matches(|c| c == '.' || c == '_');

        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }
}

/// Writes uploads into one directory
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
    sanitizer: FileNameSanitizer,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            dir: dir.into(),
            sanitizer: FileNameSanitizer::new()?,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Save one upload, returning the stored name, or `None` if the
    /// client name had nothing usable in it
    pub async fn save(&self, client_name: &str, bytes: &[u8]) -> Result<Option<String>> {
        let Some(name) = self.sanitizer.sanitize(client_name) else {
            warn!("Skipping upload with unusable name {:?}", client_name);
            return Ok(None);
        };

        fs::create_dir_all(&self.dir)
            .await
            .with_context(|| format!("Failed to create upload dir {}", self.dir.display()))?;

        let path = self.dir.join(&name);
        fs::write(&path, bytes)
            .await
            .with_context(|| format!("Failed to write upload {}", path.display()))?;

        debug!("Stored upload {} ({} bytes)", path.display(), bytes.len());
        Ok(Some(name))
    }
}
