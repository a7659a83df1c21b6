// src/report.rs
// =============================================================================
// What a run found.
//
// Every broken link becomes one Diagnostic. Its Display output is the exact
// line (or block of lines) printed for humans; --json serializes the same
// values instead.
// =============================================================================

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// Internal link to a file that doesn't exist.
    FileNotFound { page: PathBuf, path: String },
    /// Internal link to an id the target page doesn't define.
    FragmentNotFound {
        page: PathBuf,
        path: String,
        fragment: String,
    },
    TooManyRedirects { url: String },
    /// Anything but 200 OK.
    HttpStatus {
        url: String,
        status: u16,
        linked_from: Vec<PathBuf>,
    },
    /// No response at all (DNS, connection refused, timeout, TLS...).
    RequestFailed {
        url: String,
        reason: String,
        linked_from: Vec<PathBuf>,
    },
    /// External page fetched fine but lacks the linked id.
    ExternalFragmentNotFound {
        url: String,
        fragment: String,
        linked_from: Vec<PathBuf>,
    },
}

impl Diagnostic {
    pub fn is_external(&self) -> bool {
        !matches!(
            self,
            Diagnostic::FileNotFound { .. } | Diagnostic::FragmentNotFound { .. }
        )
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::FileNotFound { page, path } => {
                write!(f, "{}: {}: file not found", page.display(), path)
            }
            Diagnostic::FragmentNotFound {
                page,
                path,
                fragment,
            } => write!(
                f,
                "{}: {}#{}: fragment not found in page",
                page.display(),
                path,
                fragment
            ),
            Diagnostic::TooManyRedirects { url } => write!(f, "{}: too many redirects", url),
            Diagnostic::HttpStatus {
                url,
                status,
                linked_from,
            } => {
                write!(f, "{}: HTTP {}", url, status)?;
                write_linked_from(f, linked_from)
            }
            Diagnostic::RequestFailed {
                url,
                reason,
                linked_from,
            } => {
                write!(f, "{}: request failed: {}", url, reason)?;
                write_linked_from(f, linked_from)
            }
            Diagnostic::ExternalFragmentNotFound {
                url,
                fragment,
                linked_from,
            } => {
                write!(f, "{}#{}: fragment not found in page", url, fragment)?;
                write_linked_from(f, linked_from)
            }
        }
    }
}

// One indented "linked from" line per referring page
fn write_linked_from(f: &mut fmt::Formatter<'_>, pages: &[PathBuf]) -> fmt::Result {
    for page in pages {
        write!(f, "\n\tlinked from: {}", page.display())?;
    }
    Ok(())
}

/// Overall result of a run. The CLI maps this to an exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Pass,
    InternalFailures,
    ExternalFailures,
}

impl Outcome {
    pub fn is_pass(&self) -> bool {
        matches!(self, Outcome::Pass)
    }

    /// 0 = all links OK, 1 = broken links found
    pub fn exit_code(&self) -> i32 {
        if self.is_pass() {
            0
        } else {
            1
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub outcome: Outcome,
    pub pages_scanned: usize,
    pub internal_links_checked: usize,
    /// Stays 0 when the external pass was skipped.
    pub external_urls_checked: usize,
    pub diagnostics: Vec<Diagnostic>,
}

impl Report {
    /// (internal, external) diagnostic counts.
    pub fn broken_counts(&self) -> (usize, usize) {
        let external = self.diagnostics.iter().filter(|d| d.is_external()).count();
        (self.diagnostics.len() - external, external)
    }
}
