// src/extract/html.rs
// =============================================================================
// This module extracts ids and hrefs from HTML pages.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Decodes entities in attribute values for us (&amp; -> &)
//
// Both extractors are used for local pages AND for fetched external pages
// (to check that a linked fragment really exists there).
// =============================================================================

use crate::error::{ContractViolation, Result};
use scraper::{Html, Selector};
use std::collections::BTreeSet;
use std::path::Path;

// Extracts every anchor id a document defines
//
// An id can come from:
//   - an `id` attribute on any tag:        <h2 id="intro">
//   - a `name` attribute on <a> tags:      <a name="sec1.2"></a>
//     (older sites such as the SICP book still use these)
//
// Duplicates are fine, the set takes care of them. Empty values are ignored
// since "#" alone never targets anything.
pub fn extract_ids(html: &str) -> BTreeSet<String> {
    let document = Html::parse_document(html);
    let mut ids = BTreeSet::new();

    // Selectors are constants, parsing them can only fail on a typo here
    let with_id = Selector::parse("[id]").expect("valid selector");
    let named_anchor = Selector::parse("a[name]").expect("valid selector");

    for element in document.select(&with_id) {
        if let Some(id) = element.value().attr("id").filter(|id| !id.is_empty()) {
            ids.insert(id.to_string());
        }
    }

    for element in document.select(&named_anchor) {
        if let Some(name) = element.value().attr("name").filter(|name| !name.is_empty()) {
            ids.insert(name.to_string());
        }
    }

    ids
}

// Extracts the raw href of every <a> tag, deduplicated
//
// Hrefs are returned exactly as written (after entity decoding), NOT resolved
// against anything: classification happens later in links.rs.
//
// Every <a> must carry an href. The pages we check come from our own
// generator, so an <a> without one (including <a name="..."> anchors) means
// the generator changed and the run should stop.
pub fn extract_hrefs(html: &str, page: &Path) -> Result<BTreeSet<String>> {
    let document = Html::parse_document(html);
    let anchors = Selector::parse("a").expect("valid selector");

    let mut hrefs = BTreeSet::new();
    for element in document.select(&anchors) {
        match element.value().attr("href") {
            Some(href) => {
                hrefs.insert(href.to_string());
            }
            None => {
                return Err(ContractViolation::AnchorWithoutHref {
                    page: page.to_path_buf(),
                })
            }
        }
    }

    Ok(hrefs)
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why BTreeSet instead of HashSet?
//    - Iteration order is sorted, so links are checked (and reported) in the
//      same order on every run
//    - Running the checker twice on the same pages prints identical output
//
// 2. Why does extract_hrefs take the page path?
//    - Only to name the offending page in the error
//    - The HTML itself is all it needs to do the work
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_ids_from_any_tag() {
        let html = r#"
            <h1 id="top">Title</h1>
            <section id="intro"><p id="p1">Hi</p></section>
        "#;
        let ids = extract_ids(html);
        assert_eq!(
            ids.into_iter().collect::<Vec<_>>(),
            vec!["intro", "p1", "top"]
        );
    }

    #[test]
    fn test_extract_ids_includes_anchor_names() {
        let html = r#"<a name="sec_1.2"></a><a href="x.html" id="link">x</a>"#;
        let ids = extract_ids(html);
        assert!(ids.contains("sec_1.2"));
        assert!(ids.contains("link"));
    }

    #[test]
    fn test_name_on_other_tags_is_not_an_id() {
        let html = r#"<input name="q"><div name="block"></div>"#;
        assert!(extract_ids(html).is_empty());
    }

    #[test]
    fn test_duplicate_and_empty_ids() {
        let html = r#"<p id="dup"></p><p id="dup"></p><p id=""></p>"#;
        let ids = extract_ids(html);
        assert_eq!(ids.len(), 1);
        assert!(ids.contains("dup"));
    }

    #[test]
    fn test_extract_hrefs_deduplicates() {
        let html = r##"
            <a href="a.html">A</a>
            <a href="a.html">A again</a>
            <a href="#frag">Frag</a>
            <a href="https://example.com/">Ext</a>
        "##;
        let hrefs = extract_hrefs(html, Path::new("index.html")).unwrap();
        assert_eq!(hrefs.len(), 3);
        assert!(hrefs.contains("#frag"));
        assert!(hrefs.contains("https://example.com/"));
    }

    #[test]
    fn test_extract_hrefs_decodes_entities() {
        let html = r#"<a href="https://example.com/?a=1&amp;b=2">x</a>"#;
        let hrefs = extract_hrefs(html, Path::new("index.html")).unwrap();
        assert!(hrefs.contains("https://example.com/?a=1&b=2"));
    }

    #[test]
    fn test_anchor_without_href_is_a_violation() {
        let html = r#"<a href="ok.html">ok</a><a name="legacy"></a>"#;
        let result = extract_hrefs(html, Path::new("docs/page.html"));
        match result {
            Err(ContractViolation::AnchorWithoutHref { page }) => {
                assert_eq!(page, Path::new("docs/page.html"));
            }
            other => panic!("expected AnchorWithoutHref, got {:?}", other),
        }
    }
}
