//! Durable token storage backends.
//!
//! The session store persists exactly one value, the bearer token. Backends
//! report IO failures to the caller; the session store logs them and carries
//! on with its in-memory state.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Durable home of the session token.
pub trait TokenStorage: Send + Sync {
    /// Read the persisted token. `Ok(None)` when nothing was stored.
    ///
    /// # Errors
    ///
    /// Returns the underlying IO error if the backend cannot be read.
    fn load(&self) -> io::Result<Option<String>>;

    /// Persist `token`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns the underlying IO error if the backend cannot be written.
    fn store(&self, token: &str) -> io::Result<()>;

    /// Delete the persisted token. Removing an absent token succeeds.
    ///
    /// # Errors
    ///
    /// Returns the underlying IO error if the backend cannot be written.
    fn remove(&self) -> io::Result<()>;
}

// =============================================================================
// MEMORY
// =============================================================================

/// Process-local storage. Used by tests and by embedders that persist elsewhere.
#[derive(Debug, Default)]
pub struct MemoryTokenStorage {
    value: Mutex<Option<String>>,
}

impl MemoryTokenStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-seeded with a token, as if a previous run had logged in.
    #[must_use]
    pub fn with_token(token: &str) -> Self {
        Self { value: Mutex::new(Some(token.to_owned())) }
    }

    /// Current persisted value, for assertions.
    #[must_use]
    pub fn persisted(&self) -> Option<String> {
        self.value
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

impl TokenStorage for MemoryTokenStorage {
    fn load(&self) -> io::Result<Option<String>> {
        Ok(self.persisted())
    }

    fn store(&self, token: &str) -> io::Result<()> {
        *self
            .value
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = Some(token.to_owned());
        Ok(())
    }

    fn remove(&self) -> io::Result<()> {
        *self
            .value
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = None;
        Ok(())
    }
}

// =============================================================================
// FILE
// =============================================================================

/// One file holding the raw token. Parent directories are created on first store.
#[derive(Debug, Clone)]
pub struct FileTokenStorage {
    path: PathBuf,
}

impl FileTokenStorage {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStorage for FileTokenStorage {
    fn load(&self) -> io::Result<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => {
                let token = raw.trim();
                Ok(if token.is_empty() { None } else { Some(token.to_owned()) })
            }
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error),
        }
    }

    fn store(&self, token: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&self.path, token)
    }

    fn remove(&self) -> io::Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(error),
        }
    }
}

#[cfg(test)]
#[path = "storage_test.rs"]
mod tests;
