//! Configuration loading from docsweep.toml.

use crate::error::{DocsweepError, DocsweepResult, IoResultExt};
use serde::Deserialize;
use std::{fs, path::Path};

/// Main configuration structure for docsweep.toml.
#[derive(Debug, Deserialize, Default)]
pub struct DocsweepConfig {
    /// Extra basenames exempted from the unused classification.
    pub allow: Option<Vec<String>>,
    /// Extra directory names excluded from the scan.
    pub exclude_dirs: Option<Vec<String>>,
    /// Output configuration.
    pub output: Option<OutputConfig>,
    /// Watch loop configuration.
    pub watch: Option<WatchConfig>,
}

/// Output format configuration.
#[derive(Debug, Deserialize, Default)]
pub struct OutputConfig {
    /// Output format: "plain" or "json".
    pub format: Option<String>,
}

/// Watch loop configuration.
#[derive(Debug, Deserialize, Default)]
pub struct WatchConfig {
    /// Build script invoked on change (default: make.sh in the watched dir).
    pub build_script: Option<String>,
    /// Debounce interval in seconds (default: 2).
    pub debounce_secs: Option<u64>,
    /// Extensions that trigger a rebuild (default: ["md"]).
    pub extensions: Option<Vec<String>>,
}

/// Loads configuration from docsweep.toml if it exists.
pub fn load_config(root: &Path) -> DocsweepResult<Option<DocsweepConfig>> {
    let path = root.join("docsweep.toml");
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(&path).with_path(&path)?;
    let cfg =
        toml::from_str(&content).map_err(|e| DocsweepError::config(&path, e.to_string()))?;
    Ok(Some(cfg))
}
