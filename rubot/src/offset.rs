//! Durable update-stream cursor: one scalar token per bot credential.

use std::path::{Path, PathBuf};

use rubot_core::Result;

/// Stores the last consumed offset in a text file. The default file name is
/// derived from the token so multiple bot instances do not collide.
#[derive(Debug, Clone)]
pub struct OffsetStore {
    path: PathBuf,
}

impl OffsetStore {
    /// Store at `offset_<first-10-chars-of-token>.txt` in the working directory.
    pub fn for_token(token: &str) -> Self {
        let prefix: String = token.chars().take(10).collect();
        Self {
            path: PathBuf::from(format!("offset_{prefix}.txt")),
        }
    }

    /// Store at an explicit path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored offset. A missing or empty file means "from the start
    /// of the stream".
    pub fn load(&self) -> Option<String> {
        let contents = std::fs::read_to_string(&self.path).ok()?;
        let trimmed = contents.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    /// Overwrites the stored offset.
    pub fn save(&self, offset_id: &str) -> Result<()> {
        std::fs::write(&self.path, offset_id)?;
        Ok(())
    }
}
