//! Reference-string to repository-path resolution.
//!
//! References found inside source files rarely spell out a full repository
//! path: LaTeX `\input` arguments are usually relative to the containing
//! file, build scripts name files relative to the repository root, and
//! graphics directives sometimes mention only a basename. Resolution tries
//! those interpretations in priority order and returns the first one that
//! names a file actually present in the inventory.
//!
//! A reference that resolves to nothing is not an error: conservative
//! matching means unresolved references are dropped, never reported.

use crate::scan::Inventory;
use std::path::{Component, Path, PathBuf};

/// Lexically normalize a repository-relative candidate path.
///
/// Removes `.` components and pops `..` against earlier components.
/// Returns `None` when `..` would escape the repository root, which makes
/// the candidate invalid rather than an error.
fn normalize(candidate: &Path) -> Option<PathBuf> {
    let mut out = PathBuf::new();
    for component in candidate.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    return None;
                }
            }
            Component::Normal(part) => out.push(part),
            // Absolute or prefixed references never name repository files
            Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    Some(out)
}

/// Resolve a reference string found in `source` to a repository file.
///
/// `source` is the repository-relative path of the file that contained the
/// reference; `reference` is the fully-qualified candidate string (the
/// caller has already applied any default-extension inference).
///
/// Candidates are tried in priority order:
/// 1. relative to the containing file's directory
/// 2. relative to the repository root
/// 3. the basename of the reference, relative to the containing directory
///
/// The first candidate present in the inventory wins; `None` otherwise.
pub fn resolve(inventory: &Inventory, source: &Path, reference: &str) -> Option<PathBuf> {
    let reference = Path::new(reference);
    let source_dir = source.parent().unwrap_or_else(|| Path::new(""));

    let mut candidates: Vec<PathBuf> = Vec::with_capacity(3);
    candidates.push(source_dir.join(reference));
    candidates.push(reference.to_path_buf());
    if let Some(base) = reference.file_name() {
        candidates.push(source_dir.join(base));
    }

    candidates
        .into_iter()
        .filter_map(|c| normalize(&c))
        .find(|c| inventory.contains(c))
}
