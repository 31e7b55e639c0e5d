//! docsweep CLI - unused-file detector for document-authoring repositories.
//!
//! Features:
//! - Conservative reference scanning (LaTeX directives, Python imports,
//!   shell build scripts)
//! - Sample/template artifact classification
//! - Human-readable, condensed-file, and JSON reports
//! - Debounced watch-and-rebuild mode

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::time::Duration;

use docsweep_core::{
    init_structured_logging, load_config, print_json, print_plain, watch, write_condensed,
    Docsweep, WatchOptions,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Unused-file detector for document repositories")]
pub struct Cli {
    /// Path to the repository root
    #[arg(default_value = ".")]
    path: String,

    /// Write a condensed copy of the report to a file
    #[arg(short, long)]
    output: Option<String>,

    /// Output results in JSON format
    #[arg(long)]
    json: bool,

    /// Extra directory names to exclude from scanning
    #[arg(long, num_args = 1..)]
    exclude: Vec<String>,

    /// Extra basenames exempt from the unused classification
    #[arg(long, num_args = 1..)]
    allow: Vec<String>,

    /// Watch the repository and rebuild on change instead of analyzing
    #[arg(long)]
    watch: bool,

    /// Build script invoked by watch mode (default: make.sh in the watched dir)
    #[arg(long)]
    build_script: Option<String>,

    /// Debounce interval between builds, in seconds (default: 2)
    #[arg(long)]
    debounce_secs: Option<u64>,

    /// Extensions that trigger a rebuild in watch mode (default: md)
    #[arg(long, num_args = 1..)]
    watch_ext: Vec<String>,
}

/// Validates output file paths to prevent path traversal.
///
/// Rejects absolute paths, `..` components, and null bytes.
fn validate_output_path(path: &str) -> Result<PathBuf> {
    if path.contains('\0') {
        return Err(anyhow!("Output path contains null bytes"));
    }

    let p = PathBuf::from(path);

    if p.is_absolute() {
        return Err(anyhow!(
            "Output path must be relative, not absolute: {}",
            path
        ));
    }

    for component in p.components() {
        if matches!(component, std::path::Component::ParentDir) {
            return Err(anyhow!(
                "Path traversal (..) not allowed in output paths: {}",
                path
            ));
        }
    }

    Ok(p)
}

fn run_watch(cli: &Cli) -> Result<()> {
    let dir = PathBuf::from(&cli.path);
    let config = load_config(&dir)
        .with_context(|| format!("Failed to load config from: {}", cli.path))?
        .unwrap_or_default();
    let watch_cfg = config.watch.unwrap_or_default();

    // CLI flags win over docsweep.toml, which wins over defaults
    let script = cli
        .build_script
        .clone()
        .or(watch_cfg.build_script)
        .unwrap_or_else(|| "make.sh".to_string());
    let script = {
        let p = PathBuf::from(script);
        if p.is_relative() {
            dir.join(p)
        } else {
            p
        }
    };
    let debounce_secs = cli.debounce_secs.or(watch_cfg.debounce_secs).unwrap_or(2);
    let extensions = if !cli.watch_ext.is_empty() {
        cli.watch_ext.clone()
    } else {
        watch_cfg
            .extensions
            .unwrap_or_else(|| vec!["md".to_string()])
    };

    let options = WatchOptions::new(&dir, &script)
        .debounce(Duration::from_secs(debounce_secs))
        .extensions(extensions.iter().cloned());

    eprintln!(
        "Watching {} for changes ({} files). Press Ctrl+C to stop.",
        dir.display(),
        extensions.join(", ")
    );

    // Runs until the process is interrupted; the flag exists for embedders
    // that stop the loop programmatically.
    let stop = AtomicBool::new(false);
    watch(options, &stop).context("Watch loop failed")?;
    Ok(())
}

fn main() -> Result<()> {
    std::panic::set_hook(Box::new(|info| {
        eprintln!("[PANIC] docsweep internal error: {}", info);
        eprintln!("[PANIC] The process will exit safely with code 2.");
    }));

    // Structured JSON logs to stderr, respects RUST_LOG
    init_structured_logging();

    let cli = Cli::parse();

    if cli.watch {
        return run_watch(&cli);
    }

    let root = Path::new(&cli.path);
    let config = load_config(root)
        .with_context(|| format!("Failed to load config from: {}", cli.path))?
        .unwrap_or_default();

    let mut analysis = Docsweep::new(root)
        .exclude_dirs(cli.exclude.iter().cloned())
        .allow_files(cli.allow.iter().cloned());
    if let Some(dirs) = &config.exclude_dirs {
        analysis = analysis.exclude_dirs(dirs.iter().cloned());
    }
    if let Some(names) = &config.allow {
        analysis = analysis.allow_files(names.iter().cloned());
    }

    let result = analysis
        .analyze()
        .with_context(|| format!("Failed to analyze repository: {}", cli.path))?;

    let json = cli.json
        || config
            .output
            .as_ref()
            .and_then(|o| o.format.as_deref())
            .is_some_and(|f| f.eq_ignore_ascii_case("json"));

    if json {
        print_json(&result);
    } else {
        print_plain(&result);
    }

    if let Some(output) = &cli.output {
        let path = validate_output_path(output)?;
        write_condensed(&result, &path)
            .with_context(|| format!("Failed to write report to: {}", output))?;
        eprintln!("Report saved to: {}", path.display());
    }

    Ok(())
}
