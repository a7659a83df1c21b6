// src/lib.rs
// =============================================================================
// link-warden: checks every link in a set of generated HTML pages.
//
// A run goes through three phases:
// 1. Scan: parse every page (in parallel), collect ids and links
// 2. Internal: check links between pages (files exist, fragments exist)
// 3. External: fetch every distinct outside URL once (concurrently) and
//    check linked fragments against the fetched page
//
// Phase 3 only runs when phase 2 found nothing: a broken build doesn't need
// a round of network requests to tell you so.
//
// Broken links are reported as Diagnostics inside the returned Report.
// Errors (ContractViolation) are reserved for pages the checker can't make
// sense of, and stop the run.
// =============================================================================

pub mod config;
pub mod error;
pub mod extract;
pub mod links;
pub mod page_info;
pub mod paths;
pub mod report;
pub mod validate;

#[cfg(test)]
mod test_support;

pub use config::CheckerConfig;
pub use error::{ContractViolation, Result};
pub use page_info::{scan_pages, PageInfo};
pub use report::{Diagnostic, Outcome, Report};
pub use validate::{validate_external, validate_internal, Fetcher, HttpFetcher};

use std::path::PathBuf;
use tracing::info;

/// Checks `paths` with real HTTP requests for external links.
pub async fn check_pages(paths: &[PathBuf], config: &CheckerConfig) -> Result<Report> {
    let fetcher = HttpFetcher::new(config)?;
    check_pages_with(paths, config, &fetcher).await
}

/// Same as [`check_pages`], with external requests going through `fetcher`.
pub async fn check_pages_with<F: Fetcher>(
    paths: &[PathBuf],
    config: &CheckerConfig,
    fetcher: &F,
) -> Result<Report> {
    let info = scan_pages(paths, &config.root)?;
    info!(
        pages = info.page_count(),
        internal_links = info.internal_link_count(),
        external_urls = info.external_urls.len(),
        "scanned pages"
    );

    let mut report = Report {
        outcome: Outcome::Pass,
        pages_scanned: info.page_count(),
        internal_links_checked: info.internal_link_count(),
        external_urls_checked: 0,
        diagnostics: validate_internal(&info, &config.root)?,
    };

    if !report.diagnostics.is_empty() {
        report.outcome = Outcome::InternalFailures;
        info!("internal links are broken, skipping external links");
        return Ok(report);
    }

    if config.skip_external {
        return Ok(report);
    }

    report.diagnostics = validate_external(&info, fetcher, config).await?;
    report.external_urls_checked = info.external_urls.len();
    if !report.diagnostics.is_empty() {
        report.outcome = Outcome::ExternalFailures;
    }

    Ok(report)
}
