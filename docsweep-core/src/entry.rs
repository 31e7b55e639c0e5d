//! Entry-point and heuristic marking.
//!
//! Files enter the used set here without any incoming reference: known
//! entry-point basenames, files with the executable bit, and the
//! watch-script special case. All three rules are pure additions to the
//! used set and never touch the sample classification.

use crate::scan::{FileKind, Inventory};
use crate::usage::Usage;

/// Basenames treated as entry points regardless of content or location.
///
/// Multiple files with the same basename in different directories are all
/// marked (e.g. `draft/main.tex` and `proposal/main.tex`).
pub const ENTRY_POINT_NAMES: &[&str] = &["main.tex", "main.py", "make.sh", "compile.sh"];

/// Marker substring identifying the file-watch script.
const WATCHER_MARKER: &str = "watchdog";

/// Mark every file whose basename is a recognized entry point.
pub fn mark_entry_points(inventory: &Inventory, usage: &mut Usage) {
    for file in inventory.iter() {
        if ENTRY_POINT_NAMES.contains(&file.basename()) {
            usage.mark_used(&file.path);
        }
    }
}

/// Mark every file with the executable permission bit set.
pub fn mark_executables(inventory: &Inventory, usage: &mut Usage) {
    for file in inventory.iter() {
        if file.executable {
            usage.mark_used(&file.path);
        }
    }
}

/// Mark the watch script and, transitively, every markdown file.
///
/// The watcher triggers the build on markdown changes, so its presence
/// keeps all markdown sources alive even without direct references.
pub fn mark_watch_scripts(inventory: &Inventory, usage: &mut Usage) {
    let has_watcher = inventory
        .by_kind(FileKind::Python)
        .any(|f| f.path.to_string_lossy().contains(WATCHER_MARKER));
    if !has_watcher {
        return;
    }

    for file in inventory.by_kind(FileKind::Python) {
        if file.path.to_string_lossy().contains(WATCHER_MARKER) {
            usage.mark_used(&file.path);
        }
    }
    for file in inventory.by_kind(FileKind::Markdown) {
        usage.mark_used(&file.path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::RepositoryFile;
    use std::path::{Path, PathBuf};

    fn file(path: &str, executable: bool) -> RepositoryFile {
        RepositoryFile {
            path: PathBuf::from(path),
            kind: crate::scan::FileKind::from_path(Path::new(path)),
            executable,
        }
    }

    #[test]
    fn test_entry_points_marked_in_every_directory() {
        let inv = Inventory::from_parts(
            PathBuf::from("/repo"),
            vec![
                file("draft/main.tex", false),
                file("proposal/main.tex", false),
                file("draft/chapter1.tex", false),
            ],
        );
        let mut usage = Usage::default();
        mark_entry_points(&inv, &mut usage);
        assert!(usage.is_used(Path::new("draft/main.tex")));
        assert!(usage.is_used(Path::new("proposal/main.tex")));
        assert!(!usage.is_used(Path::new("draft/chapter1.tex")));
    }

    #[test]
    fn test_executables_marked() {
        let inv = Inventory::from_parts(
            PathBuf::from("/repo"),
            vec![file("tools/deploy.sh", true), file("notes.txt", false)],
        );
        let mut usage = Usage::default();
        mark_executables(&inv, &mut usage);
        assert!(usage.is_used(Path::new("tools/deploy.sh")));
        assert!(!usage.is_used(Path::new("notes.txt")));
    }

    #[test]
    fn test_watch_script_marks_markdown() {
        let inv = Inventory::from_parts(
            PathBuf::from("/repo"),
            vec![
                file("scripts/watchdog_compiler.py", false),
                file("draft/notes.md", false),
                file("draft/chapter1.tex", false),
            ],
        );
        let mut usage = Usage::default();
        mark_watch_scripts(&inv, &mut usage);
        assert!(usage.is_used(Path::new("scripts/watchdog_compiler.py")));
        assert!(usage.is_used(Path::new("draft/notes.md")));
        assert!(!usage.is_used(Path::new("draft/chapter1.tex")));
    }

    #[test]
    fn test_no_watch_script_no_markdown_marking() {
        let inv = Inventory::from_parts(
            PathBuf::from("/repo"),
            vec![file("draft/notes.md", false)],
        );
        let mut usage = Usage::default();
        mark_watch_scripts(&inv, &mut usage);
        assert!(!usage.is_used(Path::new("draft/notes.md")));
    }
}
