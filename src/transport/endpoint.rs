//! DevTools endpoint discovery.
//!
//! Chrome launched with `--remote-debugging-port=0` picks a free port and
//! announces the browser WebSocket URL on stderr:
//!
//! ```text
//! DevTools listening on ws://127.0.0.1:38125/devtools/browser/0c5e...
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::time::timeout;
use tracing::{debug, trace};
use url::Url;

use crate::error::{Error, Result};

// ============================================================================
// Constants
// ============================================================================

/// Time allowed for Chrome to announce its endpoint.
pub const ENDPOINT_TIMEOUT: Duration = Duration::from_secs(30);

static DEVTOOLS_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"DevTools listening on (ws://\S+)").expect("devtools endpoint regex")
});

// ============================================================================
// Discovery
// ============================================================================

/// Extracts the DevTools WebSocket URL from a single stderr line.
#[must_use]
pub fn parse_devtools_line(line: &str) -> Option<Url> {
    let captures = DEVTOOLS_LINE.captures(line)?;
    Url::parse(captures.get(1)?.as_str()).ok()
}

/// Reads the browser's stderr until the DevTools URL appears.
///
/// Once found, the rest of the stream is drained on a background task so
/// Chrome never blocks on a full pipe.
///
/// # Errors
///
/// - [`Error::ConnectionTimeout`] if no URL appears within `wait`
/// - [`Error::ProcessLaunchFailed`] if the stream ends first (browser exited)
pub async fn discover_ws_url<R>(stderr: R, wait: Duration) -> Result<Url>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    let mut lines = BufReader::new(stderr).lines();

    let found = timeout(wait, async {
        while let Some(line) = lines.next_line().await? {
            trace!(target: "chrome", "{line}");
            if let Some(url) = parse_devtools_line(&line) {
                return Ok(Some(url));
            }
        }
        Ok::<_, Error>(None)
    })
    .await
    .map_err(|_| Error::connection_timeout(wait.as_millis() as u64))??;

    let Some(url) = found else {
        return Err(Error::ProcessLaunchFailed {
            message: "browser exited before announcing its DevTools endpoint".to_string(),
        });
    };

    debug!(url = %url, "DevTools endpoint discovered");

    tokio::spawn(async move {
        while let Ok(Some(line)) = lines.next_line().await {
            trace!(target: "chrome", "{line}");
        }
    });

    Ok(url)
}

// ============================================================================
// Tests
// ============================================================================
