// src/validate/external.rs
// =============================================================================
// This module checks external links by making HTTP requests.
//
// Key functionality:
// - One request per distinct URL, however many pages link to it
// - HEAD when nobody links to a fragment (existence is enough)
// - GET when fragments are linked, so we can look for the ids in the body
// - All URLs are checked concurrently and every failure is reported
//
// The network sits behind the `Fetcher` trait. `HttpFetcher` is the real
// reqwest implementation; tests plug in an in-memory one.
// =============================================================================

use crate::config::CheckerConfig;
use crate::error::{ContractViolation, Result};
use crate::extract::extract_ids;
use crate::page_info::{ExternalTarget, PageInfo};
use crate::report::Diagnostic;
use futures::stream::{self, StreamExt}; // StreamExt gives us .buffer_unordered()
use percent_encoding::percent_decode_str;
use reqwest::Client;
use std::future::Future;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMethod {
    /// Status only, no body
    Head,
    /// Status and body
    Get,
}

/// What came back from one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// `body` is only filled in for a successful GET.
    Response { status: u16, body: Option<String> },
    TooManyRedirects,
    /// The request never produced a response.
    Failed(String),
}

pub trait Fetcher {
    fn fetch(&self, url: &str, method: FetchMethod) -> impl Future<Output = FetchOutcome>;
}

// Makes real HTTP requests with reqwest
//
// The client is created once and shared by every request (connection
// pooling). Redirects are followed up to config.max_redirects.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &CheckerConfig) -> Result<Self> {
        let mut builder = Client::builder()
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .user_agent(config.user_agent.clone());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| ContractViolation::HttpClient(e.to_string()))?;
        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str, method: FetchMethod) -> impl Future<Output = FetchOutcome> {
        let request = match method {
            FetchMethod::Head => self.client.head(url),
            FetchMethod::Get => self.client.get(url),
        };

        async move {
            let response = match request.send().await {
                Ok(response) => response,
                Err(e) => return categorize_error(e),
            };

            let status = response.status().as_u16();
            if method == FetchMethod::Head || status != 200 {
                return FetchOutcome::Response { status, body: None };
            }

            match response.text().await {
                Ok(body) => FetchOutcome::Response {
                    status,
                    body: Some(body),
                },
                Err(e) => categorize_error(e),
            }
        }
    }
}

// Turns a reqwest error into something readable
//
// reqwest errors can happen for many reasons:
// - Too many redirects (gets its own diagnostic)
// - Network timeout
// - DNS resolution failure / connection refused
// - Anything else (TLS, broken body...) keeps reqwest's own message
fn categorize_error(error: reqwest::Error) -> FetchOutcome {
    if error.is_redirect() {
        FetchOutcome::TooManyRedirects
    } else if error.is_timeout() {
        FetchOutcome::Failed("request timed out".to_string())
    } else if error.is_connect() {
        FetchOutcome::Failed(format!("connection failed: {}", error))
    } else {
        FetchOutcome::Failed(error.to_string())
    }
}

// Checks every distinct external URL concurrently
//
// Returns all diagnostics, sorted by URL so the output doesn't depend on
// which request finished first.
//
// The number of URLs is checked against config.max_external_urls first: a
// sudden jump means the pages changed in a way worth looking at before we
// fire off that many requests at once.
pub async fn validate_external<F: Fetcher>(
    info: &PageInfo,
    fetcher: &F,
    config: &CheckerConfig,
) -> Result<Vec<Diagnostic>> {
    let count = info.external_urls.len();
    if count >= config.max_external_urls {
        return Err(ContractViolation::TooManyExternalUrls {
            count,
            limit: config.max_external_urls,
        });
    }

    // One slot per URL: every request is in flight at the same time
    let width = count.max(1);

    let checks = info.external_urls.iter().map(|(url, target)| async move {
        let diagnostics = check_url(fetcher, url, target).await;
        (url, diagnostics)
    });

    let mut results: Vec<(&String, Vec<Diagnostic>)> =
        stream::iter(checks).buffer_unordered(width).collect().await;
    results.sort_by(|a, b| a.0.cmp(b.0));

    Ok(results
        .into_iter()
        .flat_map(|(_, diagnostics)| diagnostics)
        .collect())
}

// Checks one URL and every fragment linked on it
//
// Returns an empty Vec when everything is fine.
async fn check_url<F: Fetcher>(fetcher: &F, url: &str, target: &ExternalTarget) -> Vec<Diagnostic> {
    let method = if target.only_fragmentless() {
        FetchMethod::Head
    } else {
        FetchMethod::Get
    };
    debug!(url, ?method, "fetching");

    let body = match fetcher.fetch(url, method).await {
        FetchOutcome::TooManyRedirects => {
            warn!(url, "too many redirects");
            return vec![Diagnostic::TooManyRedirects {
                url: url.to_string(),
            }];
        }
        FetchOutcome::Failed(reason) => {
            warn!(url, %reason, "request failed");
            return vec![Diagnostic::RequestFailed {
                url: url.to_string(),
                reason,
                linked_from: target.referrers().into_iter().collect(),
            }];
        }
        FetchOutcome::Response { status, .. } if status != 200 => {
            warn!(url, status, "bad status");
            return vec![Diagnostic::HttpStatus {
                url: url.to_string(),
                status,
                linked_from: target.referrers().into_iter().collect(),
            }];
        }
        FetchOutcome::Response { body, .. } => body,
    };

    if method == FetchMethod::Head {
        return Vec::new();
    }

    let ids = extract_ids(body.as_deref().unwrap_or_default());
    let mut diagnostics = Vec::new();

    for (fragment, pages) in &target.fragments {
        if fragment.is_empty() {
            continue;
        }
        // Links are percent-encoded ("a%20b"), ids in the page are not
        let decoded = percent_decode_str(fragment).decode_utf8_lossy();
        if !ids.contains(&*decoded) {
            diagnostics.push(Diagnostic::ExternalFragmentNotFound {
                url: url.to_string(),
                fragment: fragment.clone(),
                linked_from: pages.iter().cloned().collect(),
            });
        }
    }

    diagnostics
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. What is buffer_unordered?
//    - It runs up to N futures at once and yields results as they complete
//    - Here N is the number of URLs, so nothing waits for a free slot
//    - Results come back in completion order, hence the sort afterwards
//
// 2. Why a Fetcher trait?
//    - validate_external doesn't care where responses come from
//    - Tests use a fake that answers from a HashMap and records requests,
//      so they never touch the network
//
// 3. Why HEAD vs GET?
//    - HEAD skips the body: cheaper when we only need "does it exist"
//    - We need the body (to extract ids) as soon as any fragment is linked
// -----------------------------------------------------------------------------
