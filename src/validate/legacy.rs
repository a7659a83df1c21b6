// src/validate/legacy.rs
// =============================================================================
// Known missing fragments that are tolerated for now.
//
// Exercise pages in chapters 4 and 5 still link to old "ex4.N" / "ex5.N"
// anchors that were never generated. This list is deliberately narrow: a
// directory plus a fragment prefix. Do not grow it into a general ignore
// mechanism.
// =============================================================================

use std::path::Path;

// TODO: Remove once the chapter 4 and 5 exercise anchors are generated.
const KNOWN_MISSING: &[(&str, &str)] = &[
    ("docs/exercise/4", "ex4."),
    ("docs/exercise/5", "ex5."),
];

/// True if a missing `fragment` in `target` is a known, tolerated gap.
pub fn is_known_missing_fragment(target: &Path, fragment: &str) -> bool {
    let Some(dir) = target.parent() else {
        return false;
    };
    KNOWN_MISSING
        .iter()
        .any(|(known_dir, prefix)| dir == Path::new(known_dir) && fragment.starts_with(prefix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_exercise_fragments() {
        assert!(is_known_missing_fragment(
            Path::new("docs/exercise/4/index.html"),
            "ex4.12"
        ));
        assert!(is_known_missing_fragment(
            Path::new("docs/exercise/5/index.html"),
            "ex5.1"
        ));
    }

    #[test]
    fn test_exemption_is_narrow() {
        // Wrong prefix for the directory
        assert!(!is_known_missing_fragment(
            Path::new("docs/exercise/4/index.html"),
            "ex5.1"
        ));
        // Other directories aren't covered
        assert!(!is_known_missing_fragment(
            Path::new("docs/exercise/3/index.html"),
            "ex3.1"
        ));
        // Nested deeper isn't covered either
        assert!(!is_known_missing_fragment(
            Path::new("docs/exercise/4/more/index.html"),
            "ex4.1"
        ));
    }
}
