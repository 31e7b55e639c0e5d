//! Prelude module for convenient imports.
//!
//! Import commonly used types with a single line:
//!
//! ```rust,ignore
//! use docsweep_core::prelude::*;
//! ```

// Core analysis types
pub use crate::error::{DocsweepError, DocsweepResult};
pub use crate::scan::{FileKind, Inventory, RepositoryFile};

// Builder API
pub use crate::builder::{AnalysisResult, Docsweep};

// File scanning
pub use crate::scan::scan_repository;

// Usage accumulation
pub use crate::usage::{Usage, UsageBuilder};

// Unused-set computation
pub use crate::detect::find_unused;

// Sample classification
pub use crate::samples::{find_sample_files, SampleMatcher};

// Graph view
pub use crate::graph::{build_graph, graph_to_json};

// Configuration
pub use crate::config::{load_config, DocsweepConfig};

// Watch loop
#[cfg(feature = "watch")]
pub use crate::watch::{watch, WatchOptions};
