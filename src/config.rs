// src/config.rs
// =============================================================================
// Settings for one validation run.
//
// There is no config file: the CLI fills this struct from its flags, and
// library callers build it directly (usually starting from Default).
// =============================================================================

use std::path::PathBuf;
use std::time::Duration;

/// Upper bound on distinct external URLs. Hitting it means something changed
/// upstream and the concurrency width should be revisited.
pub const DEFAULT_MAX_EXTERNAL_URLS: usize = 100;

/// Same limit most HTTP clients use before giving up on a redirect chain.
pub const DEFAULT_MAX_REDIRECTS: usize = 30;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct CheckerConfig {
    /// Every page path is expressed relative to this directory.
    pub root: PathBuf,
    pub max_external_urls: usize,
    pub max_redirects: usize,
    /// Per-request timeout handed to the HTTP client. `None` = client default.
    pub timeout: Option<Duration>,
    pub user_agent: String,
    /// Only run the internal pass.
    pub skip_external: bool,
}

impl CheckerConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            max_external_urls: DEFAULT_MAX_EXTERNAL_URLS,
            max_redirects: DEFAULT_MAX_REDIRECTS,
            timeout: Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            user_agent: format!("link-warden/{}", env!("CARGO_PKG_VERSION")),
            skip_external: false,
        }
    }
}

impl Default for CheckerConfig {
    // Falls back to "." when the current directory is unavailable; paths are
    // still resolved consistently against it.
    fn default() -> Self {
        let root = std::env::current_dir()
            .and_then(|dir| dir.canonicalize())
            .unwrap_or_else(|_| PathBuf::from("."));
        Self::new(root)
    }
}
