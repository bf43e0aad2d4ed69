//! JSON session persistence.
//!
//! One pretty-printed JSON document per session under the session directory.
//! File names embed the username and a unix timestamp, so listing needs no
//! index file. Persistence is best-effort at session end: any failure here
//! surfaces as an error without touching in-memory session state.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use arithmo_core::tracker::SessionSummary;

/// A reference to one saved session on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionHandle {
    pub username: String,
    /// Unix seconds when the session finished; the sort key for listings.
    pub timestamp: i64,
    pub path: PathBuf,
}

impl SessionHandle {
    /// Recover a handle from a `{username}_{timestamp}.json` file name.
    /// Returns `None` for files that don't follow the naming scheme.
    fn from_path(path: &Path) -> Option<SessionHandle> {
        let stem = path.file_stem()?.to_str()?;
        let (username, ts) = stem.rsplit_once('_')?;
        let timestamp = ts.parse().ok()?;
        Some(SessionHandle {
            username: username.to_string(),
            timestamp,
            path: path.to_path_buf(),
        })
    }
}

/// Session storage rooted at one directory.
#[derive(Debug, Clone)]
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write one session summary; creates the directory on first use.
    pub fn save(&self, summary: &SessionSummary) -> Result<SessionHandle> {
        fs::create_dir_all(&self.dir).with_context(|| {
            format!("failed to create session directory {}", self.dir.display())
        })?;

        let timestamp = summary.finished_at.timestamp();
        let path = self
            .dir
            .join(format!("{}_{}.json", summary.username, timestamp));
        let json =
            serde_json::to_string_pretty(summary).context("failed to serialize session summary")?;
        fs::write(&path, json)
            .with_context(|| format!("failed to write session to {}", path.display()))?;

        tracing::info!(path = %path.display(), "session saved");
        Ok(SessionHandle {
            username: summary.username.clone(),
            timestamp,
            path,
        })
    }

    /// All saved sessions for `username`, most recent first. A missing
    /// directory just means no sessions yet.
    pub fn list_sessions(&self, username: &str) -> Result<Vec<SessionHandle>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }
        let entries = fs::read_dir(&self.dir).with_context(|| {
            format!("failed to read session directory {}", self.dir.display())
        })?;

        let mut handles = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(handle) = SessionHandle::from_path(&path) {
                if handle.username == username {
                    handles.push(handle);
                }
            }
        }
        handles.sort_by_key(|h| std::cmp::Reverse(h.timestamp));
        Ok(handles)
    }

    pub fn load(&self, handle: &SessionHandle) -> Result<SessionSummary> {
        Self::load_path(&handle.path)
    }

    /// Load a session summary straight from a file path.
    pub fn load_path(path: &Path) -> Result<SessionSummary> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read session from {}", path.display()))?;
        serde_json::from_str(&content).context("failed to parse session JSON")
    }
}
