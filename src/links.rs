// src/links.rs
// =============================================================================
// Classifies raw hrefs as internal or external links.
//
// Internal: a relative path with an optional fragment, e.g.
//   "../chapter2.html#sec3", "intro.html", "#top", ""
// External: an absolute http(s) URL with an optional fragment, e.g.
//   "https://example.com/page#anchor"
//
// External fragments are normalized so they can be checked against the ids
// of the fetched page:
// - GitHub prefixes README heading ids with "user-content-"
// - "#page=N" on a PDF is a viewer instruction, not an id, so it is dropped
//
// Anything else (mailto:, query strings, absolute paths...) is a contract
// violation: the generator is expected to only emit the two forms above.
// =============================================================================

use crate::error::{ContractViolation, Result};
use serde::Serialize;
use std::path::Path;
use url::{ParseError, Url};

/// A link to another page (or the same page) in the checked set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InternalLink {
    /// Path relative to the directory of the linking page. Empty means
    /// "this same page".
    pub path: String,
    /// Possibly empty.
    pub fragment: String,
}

impl InternalLink {
    /// Rebuilds the href this link was parsed from.
    pub fn to_href(&self) -> String {
        if self.fragment.is_empty() {
            self.path.clone()
        } else {
            format!("{}#{}", self.path, self.fragment)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Link {
    Internal(InternalLink),
    External {
        /// The URL with its fragment stripped; this is what gets fetched.
        url: String,
        /// Normalized fragment, possibly empty.
        fragment: String,
    },
}

// Classifies one href found on `page`
//
// `page` is only used to name the page in errors.
pub fn classify_href(href: &str, page: &Path) -> Result<Link> {
    match Url::parse(href) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {
            Ok(classify_external(href, &url))
        }
        // No scheme at all: a relative reference
        Err(ParseError::RelativeUrlWithoutBase) => classify_internal(href, page).map(Link::Internal),
        // mailto:, javascript:, malformed http URLs...
        _ => Err(unexpected(href, page)),
    }
}

fn classify_external(href: &str, url: &Url) -> Link {
    let (url_no_fragment, fragment) = split_fragment(href);

    let fragment = if raw_authority(href) == "github.com" && !fragment.is_empty() {
        // The ids in GitHub READMEs have "user-content-" prepended
        format!("user-content-{}", fragment)
    } else if url.path().ends_with(".pdf") && fragment.starts_with("page=") {
        String::new()
    } else {
        fragment.to_string()
    };

    Link::External {
        url: url_no_fragment.to_string(),
        fragment,
    }
}

fn classify_internal(href: &str, page: &Path) -> Result<InternalLink> {
    let (path, fragment) = split_fragment(href);

    // Query strings have no meaning for files on disk
    if path.contains('?') {
        return Err(unexpected(href, page));
    }

    let link = InternalLink {
        path: path.to_string(),
        fragment: fragment.to_string(),
    };

    // Catches anything the split above doesn't model, e.g. a bare "#" or a
    // trailing "page.html#"
    if link.to_href() != href {
        return Err(unexpected(href, page));
    }

    if link.path.starts_with('/') {
        return Err(ContractViolation::AbsolutePathLink {
            page: page.to_path_buf(),
            href: href.to_string(),
        });
    }

    Ok(link)
}

// The authority exactly as written ("user@Host:port"). Url normalizes
// case and drops default ports, which would widen the github.com match.
fn raw_authority(href: &str) -> &str {
    let rest = href.split_once("://").map_or("", |(_, rest)| rest);
    let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    &rest[..end]
}

// Splits at the first '#'. No '#' means an empty fragment.
fn split_fragment(href: &str) -> (&str, &str) {
    href.split_once('#').unwrap_or((href, ""))
}

fn unexpected(href: &str, page: &Path) -> ContractViolation {
    ContractViolation::UnexpectedHref {
        page: page.to_path_buf(),
        href: href.to_string(),
    }
}
