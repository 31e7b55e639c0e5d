//! Usage-set accumulation and extractor orchestration.
//!
//! [`Usage`] is the explicit builder state threaded through the analysis
//! pass: a monotonically growing used set plus the per-file dependency
//! mapping. Nothing ever removes an entry, which is what makes the pass
//! order-independent: permuting scan order within a category cannot change
//! the final sets.
//!
//! [`UsageBuilder`] walks each file category with its extractor, resolves
//! every extracted reference through [`crate::resolve`], and records the
//! edge and the used mark together for each successful resolution.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::path::{Path, PathBuf};

use crate::error::DocsweepResult;
use crate::extract::build::{BuildScriptExtractor, BUILD_SCRIPT_NAMES};
use crate::extract::latex::LatexExtractor;
use crate::extract::script::ScriptExtractor;
use crate::extract::{read_lossy, Reference};
use crate::resolve::resolve;
use crate::scan::{FileKind, Inventory};

/// Accumulated usage state for one analysis run.
///
/// Both collections are append-only: a file enters the used set via a
/// resolved reference, an entry-point name, the executable bit, or a
/// build-script heuristic, and never leaves it.
#[derive(Debug, Default, Clone)]
pub struct Usage {
    used: HashSet<PathBuf>,
    deps: BTreeMap<PathBuf, BTreeSet<PathBuf>>,
}

impl Usage {
    /// Mark a file as used without recording an edge.
    pub fn mark_used(&mut self, path: &Path) {
        self.used.insert(path.to_path_buf());
    }

    /// Record a reference edge and mark the target used.
    ///
    /// The two updates happen together so callers never observe an edge to
    /// a file that is not in the used set.
    pub fn add_edge(&mut self, source: &Path, target: &Path) {
        self.deps
            .entry(source.to_path_buf())
            .or_default()
            .insert(target.to_path_buf());
        self.used.insert(target.to_path_buf());
    }

    /// Whether a repository-relative path has been marked used.
    pub fn is_used(&self, path: &Path) -> bool {
        self.used.contains(path)
    }

    /// The used set.
    pub fn used(&self) -> &HashSet<PathBuf> {
        &self.used
    }

    /// Number of files marked used.
    pub fn used_count(&self) -> usize {
        self.used.len()
    }

    /// The per-file dependency mapping (sources with at least one edge).
    pub fn dependencies(&self) -> &BTreeMap<PathBuf, BTreeSet<PathBuf>> {
        &self.deps
    }

    /// Consume into the dependency mapping.
    pub fn into_parts(self) -> (HashSet<PathBuf>, BTreeMap<PathBuf, BTreeSet<PathBuf>>) {
        (self.used, self.deps)
    }
}

/// Orchestrates extractors over their file categories.
pub struct UsageBuilder<'a> {
    inventory: &'a Inventory,
    latex: LatexExtractor,
    script: ScriptExtractor,
    build: BuildScriptExtractor,
    usage: Usage,
}

impl<'a> UsageBuilder<'a> {
    pub fn new(inventory: &'a Inventory) -> DocsweepResult<Self> {
        Ok(Self {
            inventory,
            latex: LatexExtractor::new()?,
            script: ScriptExtractor::new()?,
            build: BuildScriptExtractor::new()?,
            usage: Usage::default(),
        })
    }

    /// Mutable access to the accumulated state, for entry-point and
    /// heuristic classifiers that add marks outside extraction.
    pub fn usage_mut(&mut self) -> &mut Usage {
        &mut self.usage
    }

    /// Scan every LaTeX file for include/graphics/bibliography directives.
    pub fn analyze_latex(&mut self) {
        let latex_files: Vec<PathBuf> = self
            .inventory
            .by_kind(FileKind::Latex)
            .map(|f| f.path.clone())
            .collect();
        for path in latex_files {
            let Some(content) = read_lossy(self.inventory.root(), &path) else {
                continue;
            };
            let refs = self.latex.extract(&content);
            self.record_references(&path, &refs);
        }
    }

    /// Scan every Python file for local module imports.
    pub fn analyze_scripts(&mut self) {
        let script_files: Vec<PathBuf> = self
            .inventory
            .by_kind(FileKind::Python)
            .map(|f| f.path.clone())
            .collect();
        for path in script_files {
            let Some(content) = read_lossy(self.inventory.root(), &path) else {
                continue;
            };
            let refs = self.script.extract(&content);
            self.record_references(&path, &refs);
        }
    }

    /// Run build-script heuristics over every recognized build script.
    pub fn analyze_build_scripts(&mut self) {
        let build_scripts: Vec<PathBuf> = self
            .inventory
            .iter()
            .filter(|f| BUILD_SCRIPT_NAMES.contains(&f.basename()))
            .map(|f| f.path.clone())
            .collect();
        for path in build_scripts {
            self.usage.mark_used(&path);
            let Some(content) = read_lossy(self.inventory.root(), &path) else {
                continue;
            };
            self.build.apply(self.inventory, &content, &mut self.usage);
        }
    }

    /// Resolve extracted references and record the surviving edges.
    ///
    /// Unresolved references are dropped silently: a missing target is not
    /// a fault of the tool, it just produces no edge.
    fn record_references(&mut self, source: &Path, refs: &[Reference]) {
        for reference in refs {
            let qualified = reference.qualified();
            if let Some(target) = resolve(self.inventory, source, &qualified) {
                self.usage.add_edge(source, &target);
            }
        }
    }

    /// Finish the pass and return the immutable accumulated state.
    pub fn finish(self) -> Usage {
        self.usage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::RepositoryFile;

    #[test]
    fn test_add_edge_marks_target_used() {
        let mut usage = Usage::default();
        usage.add_edge(Path::new("main.tex"), Path::new("chapter1.tex"));
        assert!(usage.is_used(Path::new("chapter1.tex")));
        assert!(!usage.is_used(Path::new("main.tex")));
        assert_eq!(usage.dependencies().len(), 1);
    }

    #[test]
    fn test_duplicate_edges_collapse() {
        let mut usage = Usage::default();
        usage.add_edge(Path::new("main.tex"), Path::new("chapter1.tex"));
        usage.add_edge(Path::new("main.tex"), Path::new("chapter1.tex"));
        let targets = &usage.dependencies()[Path::new("main.tex")];
        assert_eq!(targets.len(), 1);
    }

    #[test]
    fn test_unresolved_reference_creates_no_edge() {
        let inv = Inventory::from_parts(
            PathBuf::from("/repo"),
            vec![RepositoryFile {
                path: PathBuf::from("main.tex"),
                kind: FileKind::Latex,
                executable: false,
            }],
        );
        let mut builder = UsageBuilder::new(&inv).unwrap();
        builder.record_references(
            Path::new("main.tex"),
            &[Reference::new("ghost", Some(".tex"))],
        );
        let usage = builder.finish();
        assert!(usage.dependencies().is_empty());
        assert_eq!(usage.used_count(), 0);
    }
}
