//! Output formatting - plaintext, condensed file report, and JSON.

use crate::builder::AnalysisResult;
use crate::error::{DocsweepResult, IoResultExt};
use crate::graph::{edge_count, graph_to_json};
use serde_json::json;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

const RULE: &str = "============================================================";

/// Prints the full human-readable report to stdout.
pub fn print_plain(result: &AnalysisResult) {
    println!("{RULE}");
    println!("UNUSED FILE DETECTION REPORT");
    println!("{RULE}");

    println!();
    println!("SUMMARY:");
    println!("Total files: {}", result.total_files);
    println!("Used files: {}", result.used_count());
    println!("Unused files: {}", result.unused_count());
    println!("Usage rate: {:.1}%", result.usage_rate());

    if !result.unused.is_empty() {
        println!();
        println!("UNUSED FILES ({}):", result.unused_count());
        for file in &result.unused {
            println!("  - {}", file.display());
        }
    }

    if !result.samples.is_empty() {
        println!();
        println!("SAMPLE/TEMPLATE FILES ({}):", result.samples.len());
        println!("(These might be examples and could be removed if not needed)");
        for file in &result.samples {
            println!("  - {}", file.display());
        }
    }

    if !result.dependencies.is_empty() {
        println!();
        println!("FILE DEPENDENCIES:");
        for (source, targets) in &result.dependencies {
            println!("  {} depends on:", source.display());
            for target in targets {
                println!("    - {}", target.display());
            }
        }
    }

    println!();
    println!("RECOMMENDATIONS:");
    if result.unused.is_empty() && result.samples.is_empty() {
        println!("1. All files appear to be in use - good repository hygiene!");
    } else {
        if !result.unused.is_empty() {
            println!("1. Consider removing unused files to reduce repository size");
        }
        if !result.samples.is_empty() {
            println!("2. Review sample/template files - remove if not needed");
        }
    }

    println!();
    println!("{RULE}");
}

/// Writes the condensed report to a file.
///
/// Summary block plus the unused and sample lists, without the dependency
/// mapping or recommendations.
pub fn write_condensed(result: &AnalysisResult, path: &Path) -> DocsweepResult<()> {
    let mut out = String::new();
    let _ = writeln!(out, "UNUSED FILE DETECTION REPORT");
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "Total files: {}", result.total_files);
    let _ = writeln!(out, "Used files: {}", result.used_count());
    let _ = writeln!(out, "Unused files: {}", result.unused_count());
    let _ = writeln!(out, "Usage rate: {:.1}%", result.usage_rate());
    let _ = writeln!(out);

    if !result.unused.is_empty() {
        let _ = writeln!(out, "UNUSED FILES:");
        for file in &result.unused {
            let _ = writeln!(out, "  - {}", file.display());
        }
        let _ = writeln!(out);
    }

    if !result.samples.is_empty() {
        let _ = writeln!(out, "SAMPLE/TEMPLATE FILES:");
        for file in &result.samples {
            let _ = writeln!(out, "  - {}", file.display());
        }
    }

    fs::write(path, out).with_path(path)
}

/// Prints the report in JSON format.
///
/// Falls back to the summary line if serialization fails (should never
/// happen with string arrays, but handled anyway).
pub fn print_json(result: &AnalysisResult) {
    let value = json!({
        "summary": {
            "total_files": result.total_files,
            "used_files": result.used_count(),
            "unused_files": result.unused_count(),
            "usage_rate": result.usage_rate(),
            "reference_edges": edge_count(&result.dependencies),
        },
        "unused": result.unused.iter().map(|p| p.display().to_string()).collect::<Vec<_>>(),
        "samples": result.samples.iter().map(|p| p.display().to_string()).collect::<Vec<_>>(),
        "dependencies": graph_to_json(&result.dependencies),
    });
    match serde_json::to_string_pretty(&value) {
        Ok(text) => println!("{}", text),
        Err(e) => {
            eprintln!("[WARN] JSON serialization failed: {}", e);
            println!(
                "{{\"total_files\": {}, \"unused_files\": {}}}",
                result.total_files,
                result.unused_count()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeMap, BTreeSet};
    use std::path::PathBuf;

    fn sample_result() -> AnalysisResult {
        AnalysisResult {
            root: PathBuf::from("/repo"),
            total_files: 3,
            used: BTreeSet::from([PathBuf::from("main.tex"), PathBuf::from("chapter1.tex")]),
            unused: BTreeSet::from([PathBuf::from("orphan.tex")]),
            samples: vec![PathBuf::from("sample-document.tex")],
            dependencies: BTreeMap::from([(
                PathBuf::from("main.tex"),
                BTreeSet::from([PathBuf::from("chapter1.tex")]),
            )]),
        }
    }

    #[test]
    fn test_condensed_report_contents() {
        let dir = std::env::temp_dir().join(format!("docsweep_report_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("report.txt");

        write_condensed(&sample_result(), &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();

        assert!(text.contains("Total files: 3"));
        assert!(text.contains("Usage rate: 66.7%"));
        assert!(text.contains("orphan.tex"));
        assert!(text.contains("sample-document.tex"));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_usage_rate_zero_guard() {
        let result = AnalysisResult {
            root: PathBuf::from("/empty"),
            total_files: 0,
            used: BTreeSet::new(),
            unused: BTreeSet::new(),
            samples: Vec::new(),
            dependencies: BTreeMap::new(),
        };
        assert_eq!(result.usage_rate(), 0.0);
    }
}
