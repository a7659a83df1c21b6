// src/validate/internal.rs
// =============================================================================
// Checks links between the scanned pages.
//
// For every (page, link) pair:
// 1. Resolve the link's path against the page's directory
// 2. The target file must exist on disk
// 3. If the link has a fragment, the target page must define that id
//
// No network, no parsing: everything was collected during the scan.
// =============================================================================

use super::legacy::is_known_missing_fragment;
use crate::error::Result;
use crate::page_info::PageInfo;
use crate::paths::normalize_path;
use crate::report::Diagnostic;
use std::collections::BTreeSet;
use std::path::Path;
use tracing::debug;

// Returns one diagnostic per broken internal link (empty = all good)
//
// Only a link that escapes `root` is an error; broken links never are.
pub fn validate_internal(info: &PageInfo, root: &Path) -> Result<Vec<Diagnostic>> {
    let no_ids = BTreeSet::new();
    let mut diagnostics = Vec::new();

    for (page, links) in &info.internal_links {
        let dir = page.parent().unwrap_or(Path::new(""));

        for link in links {
            let target = if link.path.is_empty() {
                page.clone()
            } else {
                normalize_path(&dir.join(&link.path), root)?
            };

            if !root.join(&target).exists() {
                diagnostics.push(Diagnostic::FileNotFound {
                    page: page.clone(),
                    path: link.path.clone(),
                });
                continue;
            }

            if link.fragment.is_empty() {
                continue;
            }

            // A file that exists but wasn't scanned (an image, a PDF...)
            // has no ids we know of
            let ids = info.internal_ids.get(&target).unwrap_or(&no_ids);
            if !ids.contains(&link.fragment)
                && !is_known_missing_fragment(&target, &link.fragment)
            {
                diagnostics.push(Diagnostic::FragmentNotFound {
                    page: page.clone(),
                    path: link.path.clone(),
                    fragment: link.fragment.clone(),
                });
            }
        }
    }

    debug!(
        links = info.internal_link_count(),
        broken = diagnostics.len(),
        "internal validation finished"
    );
    Ok(diagnostics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page_info::scan_pages;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    // Writes the pages and scans them all, like a real run would
    fn site(pages: &[(&str, &str)]) -> (TempDir, PageInfo) {
        let dir = TempDir::new().unwrap();
        let mut paths = Vec::new();
        for (path, html) in pages {
            let full = dir.path().join(path);
            fs::create_dir_all(full.parent().unwrap()).unwrap();
            fs::write(&full, html).unwrap();
            paths.push(PathBuf::from(path));
        }
        let info = scan_pages(&paths, dir.path()).unwrap();
        (dir, info)
    }

    #[test]
    fn test_valid_links_pass() {
        let (dir, info) = site(&[
            ("a.html", r##"<h2 id="sec1">One</h2><a href="#sec1">self</a>"##),
            ("b.html", r#"<a href="a.html">a</a><a href="a.html#sec1">a#sec1</a>"#),
        ]);
        let diagnostics = validate_internal(&info, dir.path()).unwrap();
        assert!(diagnostics.is_empty(), "{:?}", diagnostics);
    }

    #[test]
    fn test_missing_file() {
        let (dir, info) = site(&[("index.html", r#"<a href="missing.html">x</a>"#)]);
        let diagnostics = validate_internal(&info, dir.path()).unwrap();
        assert_eq!(
            diagnostics,
            vec![Diagnostic::FileNotFound {
                page: PathBuf::from("index.html"),
                path: "missing.html".to_string(),
            }]
        );
        assert_eq!(
            diagnostics[0].to_string(),
            "index.html: missing.html: file not found"
        );
    }

    #[test]
    fn test_missing_fragment() {
        let (dir, info) = site(&[
            ("a.html", r#"<h2 id="sec1">One</h2>"#),
            ("b.html", r#"<a href="a.html#sec2">x</a><a href="a.html#sec1">y</a>"#),
        ]);
        let diagnostics = validate_internal(&info, dir.path()).unwrap();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].to_string(),
            "b.html: a.html#sec2: fragment not found in page"
        );
    }

    #[test]
    fn test_relative_paths_resolve_from_page_dir() {
        let (dir, info) = site(&[
            ("docs/ch1/index.html", r##"<a href="../ch2/index.html#start">next</a>"##),
            ("docs/ch2/index.html", r#"<h1 id="start">Ch2</h1><a href="../ch1/index.html">prev</a>"#),
        ]);
        let diagnostics = validate_internal(&info, dir.path()).unwrap();
        assert!(diagnostics.is_empty(), "{:?}", diagnostics);
    }

    #[test]
    fn test_fragment_in_unscanned_file_is_reported() {
        let (dir, info) = site(&[("index.html", r#"<a href="logo.svg#icon">x</a>"#)]);
        fs::write(dir.path().join("logo.svg"), "<svg/>").unwrap();

        let diagnostics = validate_internal(&info, dir.path()).unwrap();
        assert_eq!(diagnostics.len(), 1);
        assert!(matches!(diagnostics[0], Diagnostic::FragmentNotFound { .. }));
    }

    #[test]
    fn test_all_failures_are_collected() {
        let (dir, info) = site(&[(
            "index.html",
            r##"<a href="gone1.html">1</a><a href="gone2.html">2</a><a href="#nowhere">3</a>"##,
        )]);
        let diagnostics = validate_internal(&info, dir.path()).unwrap();
        assert_eq!(diagnostics.len(), 3);
    }

    #[test]
    fn test_legacy_exercise_fragments_are_tolerated() {
        let (dir, info) = site(&[
            ("docs/exercise/4/index.html", r#"<h1 id="top">Ex 4</h1>"#),
            (
                "docs/index.html",
                r#"<a href="exercise/4/index.html#ex4.7">ex</a><a href="exercise/4/index.html#other">x</a>"#,
            ),
        ]);
        let diagnostics = validate_internal(&info, dir.path()).unwrap();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(
            diagnostics[0].to_string(),
            "docs/index.html: exercise/4/index.html#other: fragment not found in page"
        );
    }

    #[test]
    fn test_link_escaping_root_is_a_violation() {
        let (dir, info) = site(&[("index.html", r#"<a href="../outside.html">x</a>"#)]);
        assert!(validate_internal(&info, dir.path()).is_err());
    }

    #[test]
    fn test_idempotent() {
        let (dir, info) = site(&[
            ("a.html", r#"<a href="b.html#x">b</a><a href="c.html">c</a>"#),
            ("b.html", r#"<p id="y"></p>"#),
        ]);
        let first = validate_internal(&info, dir.path()).unwrap();
        let second = validate_internal(&info, dir.path()).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }
}
