// src/paths.rs
// =============================================================================
// Path normalization.
//
// Pages are identified by their path relative to a fixed root (the working
// directory when the run starts). The root is passed in explicitly so tests
// can point it at a temporary directory instead of changing the process cwd.
//
// Normalization is lexical: "." and ".." are folded without touching the
// filesystem, so it also works for link targets that don't exist (those get
// reported as "file not found" later).
// =============================================================================

use crate::error::{ContractViolation, Result};
use std::path::{Component, Path, PathBuf};

// Resolves `path` against `root` and returns it relative to `root`
//
// Examples (root = /site):
//   "docs/index.html"          -> "docs/index.html"
//   "/site/docs/./a/../b.html" -> "docs/b.html"
//   "../elsewhere.html"        -> Err(OutsideRoot)
pub fn normalize_path(path: &Path, root: &Path) -> Result<PathBuf> {
    // A relative root ("." included) is anchored at the current directory,
    // otherwise an empty cleaned root would accept any path
    let root = std::path::absolute(root)
        .map(|root| lexical_clean(&root))
        .map_err(|_| ContractViolation::OutsideRoot {
            path: path.to_path_buf(),
            root: root.to_path_buf(),
        })?;
    let absolute = lexical_clean(&root.join(path));

    match absolute.strip_prefix(&root) {
        Ok(relative) => Ok(relative.to_path_buf()),
        Err(_) => Err(ContractViolation::OutsideRoot {
            path: path.to_path_buf(),
            root,
        }),
    }
}

// Folds "." and ".." components. ".." only cancels a preceding normal
// component; at the filesystem root it is dropped, and at the start of a
// relative path (or after another "..") it is kept.
fn lexical_clean(path: &Path) -> PathBuf {
    let mut cleaned = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match cleaned.components().next_back() {
                Some(Component::Normal(_)) => {
                    cleaned.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => cleaned.push(component),
            },
            other => cleaned.push(other),
        }
    }
    cleaned
}
