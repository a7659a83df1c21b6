// src/error.rs
// =============================================================================
// Contract violations: input the checker was never designed to handle.
//
// These are NOT broken links. A broken link is a `Diagnostic` (see report.rs)
// and the run keeps going. A contract violation means the page generator
// upstream emitted something unexpected (an <a> without href, an absolute
// path link, a query string...), so the whole run stops at the first one.
// =============================================================================

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContractViolation {
    #[error("{}: found <a> tag without href", page.display())]
    AnchorWithoutHref { page: PathBuf },

    #[error("{}: absolute path links are not allowed: {href}", page.display())]
    AbsolutePathLink { page: PathBuf, href: String },

    #[error("got unexpected URL in {}: {href}", page.display())]
    UnexpectedHref { page: PathBuf, href: String },

    #[error("{} is outside of the root {}", path.display(), root.display())]
    OutsideRoot { path: PathBuf, root: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{count} external URLs is more than expected (limit {limit}), revisit concurrency")]
    TooManyExternalUrls { count: usize, limit: usize },

    #[error("failed to create HTTP client: {0}")]
    HttpClient(String),
}

pub type Result<T> = std::result::Result<T, ContractViolation>;
