//! Chrome binary discovery.
//!
//! Resolution order:
//!
//! 1. Explicit path passed to [`DriverBuilder::binary`](super::DriverBuilder::binary)
//! 2. `CHROME_BINARY` environment variable
//! 3. Well-known install locations for the current platform
//! 4. `PATH` lookup of common executable names

// ============================================================================
// Imports
// ============================================================================

use std::env;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};

// ============================================================================
// Constants
// ============================================================================

/// Environment variable overriding the Chrome binary.
pub const CHROME_BINARY_ENV: &str = "CHROME_BINARY";

#[cfg(target_os = "linux")]
const KNOWN_PATHS: &[&str] = &[
    "/usr/bin/google-chrome",
    "/usr/bin/google-chrome-stable",
    "/usr/bin/chromium-browser",
    "/usr/bin/chromium",
    "/usr/local/bin/google-chrome",
    "/snap/bin/chromium",
];

#[cfg(target_os = "macos")]
const KNOWN_PATHS: &[&str] = &[
    "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
    "/Applications/Chromium.app/Contents/MacOS/Chromium",
];

#[cfg(target_os = "windows")]
const KNOWN_PATHS: &[&str] = &[
    r"C:\Program Files\Google\Chrome\Application\chrome.exe",
    r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe",
];

#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
const KNOWN_PATHS: &[&str] = &[];

const PATH_NAMES: &[&str] = &[
    "google-chrome",
    "google-chrome-stable",
    "chromium",
    "chromium-browser",
    "chrome",
];

// ============================================================================
// Discovery
// ============================================================================

/// Resolves the Chrome binary to launch.
///
/// # Errors
///
/// Returns [`Error::ChromeNotFound`] if an explicit or environment path does
/// not exist, or if no binary can be discovered.
pub fn resolve_binary(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return existing(path);
    }

    if let Some(path) = env::var_os(CHROME_BINARY_ENV).filter(|p| !p.is_empty()) {
        debug!(path = ?path, "Using {CHROME_BINARY_ENV}");
        return existing(Path::new(&path));
    }

    if let Some(path) = KNOWN_PATHS.iter().map(PathBuf::from).find(|p| p.is_file()) {
        debug!(path = %path.display(), "Found Chrome at known location");
        return Ok(path);
    }

    if let Some(path) = search_path(PATH_NAMES) {
        debug!(path = %path.display(), "Found Chrome on PATH");
        return Ok(path);
    }

    Err(Error::chrome_not_found(PATH_NAMES.join(", ")))
}

/// Returns the first executable named in `names` found on `PATH`.
#[must_use]
pub fn search_path(names: &[&str]) -> Option<PathBuf> {
    let path_var = env::var_os("PATH")?;
    let dirs: Vec<PathBuf> = env::split_paths(&path_var).collect();

    names.iter().find_map(|name| {
        dirs.iter()
            .map(|dir| dir.join(executable_name(name)))
            .find(|candidate| candidate.is_file())
    })
}

fn existing(path: &Path) -> Result<PathBuf> {
    if path.is_file() {
        Ok(path.to_path_buf())
    } else {
        Err(Error::chrome_not_found(path))
    }
}

#[cfg(windows)]
fn executable_name(name: &str) -> String {
    format!("{name}.exe")
}

#[cfg(not(windows))]
fn executable_name(name: &str) -> String {
    name.to_string()
}

// ============================================================================
// Tests
// ============================================================================
