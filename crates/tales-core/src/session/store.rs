//! Durable storage for the session token.
//!
//! The token is a plain string in a single slot. [`FileSessionStore`] keeps it
//! in `<TALES_HOME>/token` with restricted permissions (0600). Tokens are never
//! logged.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::paths;

/// Persistence capability used by the session controller.
pub trait SessionStore {
    /// Reads the stored token, if any.
    ///
    /// # Errors
    /// Returns an error if the slot exists but cannot be read.
    fn load(&self) -> Result<Option<String>>;

    /// Replaces the stored token.
    ///
    /// # Errors
    /// Returns an error if the token cannot be written.
    fn save(&mut self, token: &str) -> Result<()>;

    /// Removes the stored token. Clearing an empty slot is not an error.
    ///
    /// # Errors
    /// Returns an error if an existing token cannot be removed.
    fn clear(&mut self) -> Result<()>;
}

/// Token file on disk.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the default `<TALES_HOME>/token` location.
    pub fn default_location() -> Self {
        Self::new(paths::token_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<String>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read token from {}", self.path.display()));
            }
        };

        // Returned verbatim so a restored token matches the one that was saved.
        Ok((!contents.trim().is_empty()).then_some(contents))
    }

    fn save(&mut self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        #[cfg(unix)]
        {
            use std::fs::OpenOptions;
            use std::os::unix::fs::OpenOptionsExt;
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(&self.path)
                .with_context(|| format!("Failed to open {} for writing", self.path.display()))?;
            file.write_all(token.as_bytes())
                .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        }

        #[cfg(not(unix))]
        {
            let mut file = fs::File::create(&self.path)
                .with_context(|| format!("Failed to open {} for writing", self.path.display()))?;
            file.write_all(token.as_bytes())
                .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        }

        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e)
                .with_context(|| format!("Failed to remove token at {}", self.path.display())),
        }
    }
}

/// In-memory store; also counts writes so callers can assert side effects.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    token: Option<String>,
    writes: usize,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            writes: 0,
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Number of `save` and `clear` calls seen.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.token.clone())
    }

    fn save(&mut self, token: &str) -> Result<()> {
        self.writes += 1;
        self.token = Some(token.to_string());
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.writes += 1;
        self.token = None;
        Ok(())
    }
}
