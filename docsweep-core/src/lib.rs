//! docsweep-core: unused-file detection library for document repositories.
//!
//! This library scans a document-authoring repository (LaTeX sources,
//! scripts, images) and reports which files are unreferenced, which are
//! sample/template artifacts, and which are reachable from build and watch
//! entry points. It surfaces candidate-for-deletion files without ever
//! deleting anything.
//!
//! # Features
//!
//! - **Reference-graph building**: conservative pattern matching over LaTeX
//!   directives, Python imports, and shell build scripts
//! - **Entry-point detection**: conventional build/document entry files and
//!   executables are treated as inherently used
//! - **Sample classification**: naming-pattern detection of sample/template
//!   artifacts, independent of usage
//! - **Unused-set computation**: set complement with a conventional
//!   allow-list
//! - **Watch loop**: debounced file-watch-and-rebuild against an external
//!   build script (feature `watch`)
//!
//! # Quick Start
//!
//! Use the [`prelude`] module for convenient imports:
//!
//! ```rust,ignore
//! use docsweep_core::prelude::*;
//!
//! let result = Docsweep::new("/path/to/repo").analyze()?;
//!
//! for unused in &result.unused {
//!     println!("Unused file: {}", unused.display());
//! }
//! ```
//!
//! # Design
//!
//! The analysis is deliberately not a true dependency resolver: matching is
//! textual and one-level, and both false negatives and false positives are
//! accepted trade-offs. One run is a single-pass, deterministic batch over
//! a fixed filesystem snapshot with no state carried between runs.
//!
//! # Module Organization
//!
//! - [`scan`]: parallel file discovery and categorization
//! - [`extract`]: per-category reference extractors
//! - [`resolve`]: reference-string to repository-path resolution
//! - [`usage`]: used-set and dependency-mapping accumulation
//! - [`entry`]: entry-point / executable / watch-script marking
//! - [`samples`]: sample/template naming classification
//! - [`detect`]: unused-set computation with allow-list
//! - [`graph`]: petgraph view and JSON export of reference edges
//! - [`report`]: plaintext, condensed and JSON output
//! - [`builder`]: fluent builder API
//! - [`watch`]: debounced file-watch rebuild loop
//! - [`error`]: typed error handling

pub mod builder;
pub mod config;
pub mod detect;
pub mod entry;
pub mod error;
pub mod extract;
pub mod graph;
pub mod logging;
pub mod prelude;
pub mod report;
pub mod resolve;
pub mod samples;
pub mod scan;
pub mod usage;

#[cfg(feature = "watch")]
pub mod watch;

// ============================================================================
// Explicit Re-exports (avoiding glob imports for clear API surface)
// ============================================================================

// Error types
pub use error::{DocsweepError, DocsweepResult, IoResultExt};

// Builder API
pub use builder::{AnalysisResult, Docsweep};

// Configuration
pub use config::{load_config, DocsweepConfig, OutputConfig, WatchConfig};

// Unused-set computation
pub use detect::{find_unused, ALLOWED_FILENAMES};

// Entry-point marking
pub use entry::{mark_entry_points, mark_executables, mark_watch_scripts, ENTRY_POINT_NAMES};

// Extraction
pub use extract::build::{BuildScriptExtractor, BUILD_SCRIPT_NAMES};
pub use extract::latex::LatexExtractor;
pub use extract::script::ScriptExtractor;
pub use extract::Reference;

// Graph view
pub use graph::{build_graph, edge_count, graph_to_json};

// Logging
pub use logging::{init_structured_logging, log_error, log_info, log_warn};

// Reporting
pub use report::{print_json, print_plain, write_condensed};

// Resolution
pub use resolve::resolve;

// Sample classification
pub use samples::{find_sample_files, SampleMatcher};

// File scanning
pub use scan::{scan_repository, FileKind, Inventory, RepositoryFile};

// Usage accumulation
pub use usage::{Usage, UsageBuilder};

// Watch loop
#[cfg(feature = "watch")]
pub use watch::{watch, RebuildHandler, WatchOptions, DEFAULT_DEBOUNCE};
