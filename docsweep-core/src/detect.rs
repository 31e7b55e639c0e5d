//! Unused-set computation.
//!
//! The unused set is derived once at the end of a run: all files minus the
//! used set, minus an allow-list of conventionally important basenames.
//! Allow-listed files are exempt by convention, not by evidence of use.

use crate::scan::Inventory;
use crate::usage::Usage;
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Basenames never reported as unused, even when genuinely unreferenced.
pub const ALLOWED_FILENAMES: &[&str] = &[
    "README.md",
    "README.txt",
    "LICENSE",
    ".gitignore",
    "requirements.txt",
    "setup.py",
    "Makefile",
];

/// Compute the sorted unused set: AllFiles − UsedSet − AllowList.
///
/// `extra_allowed` extends the conventional allow-list (from configuration).
pub fn find_unused(
    inventory: &Inventory,
    usage: &Usage,
    extra_allowed: &[String],
) -> BTreeSet<PathBuf> {
    inventory
        .iter()
        .filter(|f| !usage.is_used(&f.path))
        .filter(|f| {
            let base = f.basename();
            !ALLOWED_FILENAMES.contains(&base) && !extra_allowed.iter().any(|a| a == base)
        })
        .map(|f| f.path.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::{FileKind, RepositoryFile};
    use std::path::Path;

    fn inventory(paths: &[&str]) -> Inventory {
        Inventory::from_parts(
            PathBuf::from("/repo"),
            paths
                .iter()
                .map(|p| RepositoryFile {
                    path: PathBuf::from(p),
                    kind: FileKind::from_path(Path::new(p)),
                    executable: false,
                })
                .collect(),
        )
    }

    #[test]
    fn test_set_difference() {
        let inv = inventory(&["main.tex", "chapter1.tex", "orphan.tex"]);
        let mut usage = Usage::default();
        usage.mark_used(Path::new("main.tex"));
        usage.mark_used(Path::new("chapter1.tex"));

        let unused = find_unused(&inv, &usage, &[]);
        assert_eq!(unused, BTreeSet::from([PathBuf::from("orphan.tex")]));
    }

    #[test]
    fn test_allowlist_exempts_unreferenced_files() {
        let inv = inventory(&["README.md", "LICENSE", ".gitignore", "orphan.tex"]);
        let usage = Usage::default();

        let unused = find_unused(&inv, &usage, &[]);
        assert_eq!(unused, BTreeSet::from([PathBuf::from("orphan.tex")]));
    }

    #[test]
    fn test_extra_allowed_from_config() {
        let inv = inventory(&["CHANGELOG.md", "orphan.tex"]);
        let usage = Usage::default();

        let unused = find_unused(&inv, &usage, &["CHANGELOG.md".to_string()]);
        assert_eq!(unused, BTreeSet::from([PathBuf::from("orphan.tex")]));
    }

    #[test]
    fn test_allowlist_matches_basename_in_subdirectories() {
        let inv = inventory(&["docs/README.md"]);
        let usage = Usage::default();
        assert!(find_unused(&inv, &usage, &[]).is_empty());
    }
}
