//! Chrome user-data directory management.
//!
//! Each session gets its own user-data directory so runs never share
//! cookies, cache or crash state.

// ============================================================================
// Imports
// ============================================================================

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::debug;

use crate::error::{Error, Result};

// ============================================================================
// Profile
// ============================================================================

/// A Chrome user-data directory.
///
/// Created with [`Profile::new_temp()`], the directory is deleted when the
/// `Profile` is dropped. Created with [`Profile::from_path()`], it persists.
pub struct Profile {
    /// Optional temporary directory handle (keeps temp dir alive).
    _temp_dir: Option<TempDir>,

    /// Path to the user-data directory.
    path: PathBuf,
}

impl Profile {
    /// Creates a new temporary profile.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Profile`] if the temporary directory cannot be created.
    pub fn new_temp() -> Result<Self> {
        let temp_dir = TempDir::with_prefix("resilient-webdriver-")
            .map_err(|e| Error::profile(format!("Failed to create temp profile: {e}")))?;

        let path = temp_dir.path().to_path_buf();
        debug!(path = %path.display(), "Created temporary profile");

        Ok(Self {
            _temp_dir: Some(temp_dir),
            path,
        })
    }

    /// Uses an existing directory, creating it if missing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Profile`] if the directory cannot be created.
    pub fn from_path(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if !path.exists() {
            fs::create_dir_all(&path).map_err(|e| {
                Error::profile(format!(
                    "Failed to create profile directory at {}: {e}",
                    path.display()
                ))
            })?;
            debug!(path = %path.display(), "Created profile directory");
        }

        Ok(Self {
            _temp_dir: None,
            path,
        })
    }

    /// Returns the path to the user-data directory.
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the `--user-data-dir` argument for this profile.
    #[must_use]
    pub fn to_arg(&self) -> String {
        format!("--user-data-dir={}", self.path.display())
    }
}

// ============================================================================
// Tests
// ============================================================================
