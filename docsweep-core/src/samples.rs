//! Sample/template file classification.
//!
//! Purely a naming-pattern classification over the inventory, computed
//! without consulting the used set: a file can be both used and a sample,
//! unused and a sample, or neither. Matching is case-insensitive and
//! anchored on the basename.

use crate::error::{DocsweepError, DocsweepResult};
use crate::scan::Inventory;
use regex::Regex;
use std::path::PathBuf;

/// Compiled sample/template naming patterns.
///
/// Recognized shapes: `sample-*`, `*-sample*`, `template*`, `*-template*`,
/// `example*`, `*-example*`.
#[derive(Debug)]
pub struct SampleMatcher {
    pattern: Regex,
}

impl SampleMatcher {
    pub fn new() -> DocsweepResult<Self> {
        let pattern =
            Regex::new(r"(?i)(^sample-|-sample|^template|-template|^example|-example)")
                .map_err(|e| DocsweepError::internal(format!("bad sample pattern: {e}")))?;
        Ok(Self { pattern })
    }

    /// Whether a basename matches one of the sample/template shapes.
    pub fn matches(&self, basename: &str) -> bool {
        self.pattern.is_match(basename)
    }
}

/// Classify every inventory file against the sample/template patterns.
///
/// Returns the matching paths in sorted order.
pub fn find_sample_files(inventory: &Inventory, matcher: &SampleMatcher) -> Vec<PathBuf> {
    inventory
        .iter()
        .filter(|f| matcher.matches(f.basename()))
        .map(|f| f.path.clone())
        .collect()
}
