//! Builder pattern API for docsweep analysis.
//!
//! Provides a fluent interface for configuring and running one analysis
//! pass:
//!
//! ```rust,ignore
//! use docsweep_core::prelude::*;
//!
//! let result = Docsweep::new("/path/to/repo")
//!     .exclude_dirs(["build"])
//!     .analyze()?;
//!
//! for unused in &result.unused {
//!     println!("Unused file: {}", unused.display());
//! }
//! ```
//!
//! All accumulation happens in explicit builder state threaded through the
//! pass; the returned [`AnalysisResult`] is an immutable record. Re-running
//! means a fresh scan; there is no incremental state between runs.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::detect::find_unused;
use crate::entry::{mark_entry_points, mark_executables, mark_watch_scripts};
use crate::samples::{find_sample_files, SampleMatcher};
use crate::scan::scan_repository;
use crate::usage::UsageBuilder;

/// Builder for configuring unused-file analysis.
#[derive(Debug, Clone)]
pub struct Docsweep {
    /// Root path of the repository to analyze
    root: PathBuf,

    /// Custom excluded directories (extends the built-in exclusions)
    excluded_dirs: Vec<String>,

    /// Extra allow-listed basenames (extends the built-in allow-list)
    extra_allowed: Vec<String>,
}

impl Docsweep {
    /// Create a new analysis builder for the given repository path.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            excluded_dirs: Vec::new(),
            extra_allowed: Vec::new(),
        }
    }

    /// Add directories to exclude from scanning.
    pub fn exclude_dirs(mut self, dirs: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.excluded_dirs.extend(dirs.into_iter().map(Into::into));
        self
    }

    /// Add basenames to exempt from the unused classification.
    pub fn allow_files(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.extra_allowed.extend(names.into_iter().map(Into::into));
        self
    }

    /// Run the single-pass batch analysis and return results.
    ///
    /// Deterministic for a fixed filesystem snapshot: the used set only
    /// grows during the pass, so category processing order cannot change
    /// the outcome.
    pub fn analyze(&self) -> Result<AnalysisResult> {
        // 1. Discover all files
        let inventory = scan_repository(&self.root, &self.excluded_dirs)
            .context("Failed to scan repository")?;

        // 2. Entry points, executables, watch-script special case
        let mut builder = UsageBuilder::new(&inventory)
            .context("Failed to compile reference patterns")?;
        mark_entry_points(&inventory, builder.usage_mut());
        mark_executables(&inventory, builder.usage_mut());
        mark_watch_scripts(&inventory, builder.usage_mut());

        // 3. Extractor passes per category
        builder.analyze_latex();
        builder.analyze_scripts();
        builder.analyze_build_scripts();
        let usage = builder.finish();

        // 4. Sample/template classification (independent of usage)
        let matcher = SampleMatcher::new().context("Failed to compile sample patterns")?;
        let samples = find_sample_files(&inventory, &matcher);

        // 5. Derived unused set
        let unused = find_unused(&inventory, &usage, &self.extra_allowed);

        let total_files = inventory.len();
        let (used, dependencies) = usage.into_parts();
        let used: BTreeSet<PathBuf> = used.into_iter().collect();

        Ok(AnalysisResult {
            root: self.root.clone(),
            total_files,
            used,
            unused,
            samples,
            dependencies,
        })
    }
}

/// Immutable result of one analysis run.
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    /// Root path that was analyzed
    pub root: PathBuf,

    /// Total number of files discovered
    pub total_files: usize,

    /// Files reachable from references, entry points, or heuristics
    pub used: BTreeSet<PathBuf>,

    /// Candidate-for-deletion files (sorted)
    pub unused: BTreeSet<PathBuf>,

    /// Sample/template files by naming convention (sorted)
    pub samples: Vec<PathBuf>,

    /// Per-file dependency mapping (sources with at least one edge)
    pub dependencies: BTreeMap<PathBuf, BTreeSet<PathBuf>>,
}

impl AnalysisResult {
    /// Number of files marked used.
    pub fn used_count(&self) -> usize {
        self.used.len()
    }

    /// Number of files reported unused.
    pub fn unused_count(&self) -> usize {
        self.unused.len()
    }

    /// Usage rate as a percentage; 0.0 when the repository is empty.
    pub fn usage_rate(&self) -> f64 {
        if self.total_files == 0 {
            0.0
        } else {
            (self.used.len() as f64 / self.total_files as f64) * 100.0
        }
    }

    /// Whether a path was classified unused.
    pub fn is_unused(&self, path: &Path) -> bool {
        self.unused.contains(path)
    }
}
