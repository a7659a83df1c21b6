// src/extract/mod.rs
// =============================================================================
// Pulls the two things we care about out of an HTML document:
// - the anchor ids it defines (link targets)
// - the hrefs of its <a> tags (link sources)
// =============================================================================

mod html;

pub use html::{extract_hrefs, extract_ids};
