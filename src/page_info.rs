// src/page_info.rs
// =============================================================================
// Scans pages and accumulates everything the validators need.
//
// How it works:
// 1. Each input path is scanned on its own (in parallel with rayon):
//    read the file, extract ids and hrefs, classify each href
// 2. Each scan produces a small PageInfo for that one page
// 3. The small PageInfos are merged into one aggregate
// 4. The aggregate is then read-only for both validation passes
//
// All maps are BTreeMaps so iteration (and therefore reporting) order only
// depends on the input, never on thread scheduling.
// =============================================================================

use crate::error::{ContractViolation, Result};
use crate::extract::{extract_hrefs, extract_ids};
use crate::links::{classify_href, InternalLink, Link};
use crate::paths::normalize_path;
use rayon::prelude::*;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use tracing::debug;

/// One external URL and who links to it, per fragment.
///
/// The empty-string key collects pages linking to the URL without a fragment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExternalTarget {
    pub fragments: BTreeMap<String, BTreeSet<PathBuf>>,
}

impl ExternalTarget {
    pub fn add_reference(&mut self, fragment: String, page: PathBuf) {
        self.fragments.entry(fragment).or_default().insert(page);
    }

    /// True when no page asked for a fragment, so existence is all we check.
    pub fn only_fragmentless(&self) -> bool {
        self.fragments.keys().all(|fragment| fragment.is_empty())
    }

    /// Every page linking to this URL, whatever the fragment.
    pub fn referrers(&self) -> BTreeSet<PathBuf> {
        self.fragments.values().flatten().cloned().collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct PageInfo {
    /// Page -> ids defined in it
    pub internal_ids: BTreeMap<PathBuf, BTreeSet<String>>,
    /// Page -> links to other pages, in href order
    pub internal_links: BTreeMap<PathBuf, Vec<InternalLink>>,
    /// URL without fragment -> fragments -> pages linking there
    pub external_urls: BTreeMap<String, ExternalTarget>,
}

impl PageInfo {
    pub fn new() -> Self {
        Self::default()
    }

    // Folds another (usually single-page) PageInfo into this one
    //
    // Pages are keyed by path and each path is scanned once per run, so ids
    // and links are plain inserts. External references are unioned: many
    // pages can link to the same URL.
    pub fn merge(&mut self, other: PageInfo) {
        self.internal_ids.extend(other.internal_ids);
        self.internal_links.extend(other.internal_links);

        for (url, target) in other.external_urls {
            let entry = self.external_urls.entry(url).or_default();
            for (fragment, pages) in target.fragments {
                entry.fragments.entry(fragment).or_default().extend(pages);
            }
        }
    }

    pub fn page_count(&self) -> usize {
        self.internal_ids.len()
    }

    pub fn internal_link_count(&self) -> usize {
        self.internal_links.values().map(Vec::len).sum()
    }
}

// Scans a single page
//
// `path` may be absolute or relative to `root`; it is stored relative to
// `root` either way.
pub fn scan_page(path: &Path, root: &Path) -> Result<PageInfo> {
    let page = normalize_path(path, root)?;
    let html = std::fs::read_to_string(root.join(&page)).map_err(|source| {
        ContractViolation::Read {
            path: page.clone(),
            source,
        }
    })?;

    let mut info = PageInfo::new();
    let mut links = Vec::new();

    for href in extract_hrefs(&html, &page)? {
        match classify_href(&href, &page)? {
            Link::Internal(link) => links.push(link),
            Link::External { url, fragment } => {
                info.external_urls
                    .entry(url)
                    .or_default()
                    .add_reference(fragment, page.clone());
            }
        }
    }

    let ids = extract_ids(&html);
    debug!(
        page = %page.display(),
        ids = ids.len(),
        internal_links = links.len(),
        external_urls = info.external_urls.len(),
        "scanned page"
    );

    info.internal_ids.insert(page.clone(), ids);
    info.internal_links.insert(page, links);
    Ok(info)
}

// Scans all pages in parallel and merges the results
//
// Parsing is CPU-bound, so rayon's default pool (one thread per core) is a
// good fit. The first contract violation aborts the whole scan.
pub fn scan_pages(paths: &[PathBuf], root: &Path) -> Result<PageInfo> {
    let scanned: Vec<PageInfo> = paths
        .par_iter()
        .map(|path| scan_page(path, root))
        .collect::<Result<_>>()?;

    let mut info = PageInfo::new();
    for page in scanned {
        info.merge(page);
    }
    Ok(info)
}
