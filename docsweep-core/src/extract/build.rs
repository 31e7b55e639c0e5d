//! Build-script heuristics.
//!
//! Shell build scripts (`make.sh`, `compile.sh`) are not parsed; instead
//! three independent heuristics run over their raw content:
//!
//! 1. a `pandoc` mention marks every markdown file used, plus each one's
//!    `.tex` sibling when both exist (pandoc is the primary reason markdown
//!    sources exist in these repositories; the rule is kept literal);
//! 2. a typesetting-compiler mention (`latex`, `pdflatex`, `xelatex`) marks
//!    every file named exactly `main.tex` used;
//! 3. bare filename tokens with a recognized document extension mark any
//!    repository file with that basename used, regardless of directory.
//!
//! Heuristics only grow the used set; none of them records reference edges.

use crate::error::{DocsweepError, DocsweepResult};
use crate::scan::{FileKind, Inventory};
use crate::usage::Usage;
use regex::Regex;
use std::path::Path;

/// Basenames treated as build scripts.
pub const BUILD_SCRIPT_NAMES: &[&str] = &["make.sh", "compile.sh"];

/// Document-conversion tool whose mention implies markdown sources are live.
const CONVERTER_TOOL: &str = "pandoc";

/// Typesetting compilers whose mention implies the document entry is built.
const TYPESETTER_NAMES: &[&str] = &["latex", "pdflatex", "xelatex"];

/// The document entry filename marked used by the compiler heuristic.
const DOCUMENT_ENTRY: &str = "main.tex";

/// Compiled token patterns for build-script content.
#[derive(Debug)]
pub struct BuildScriptExtractor {
    bare_token: Regex,
    quoted_token: Regex,
}

impl BuildScriptExtractor {
    pub fn new() -> DocsweepResult<Self> {
        let compile = |pattern: &str| {
            Regex::new(pattern)
                .map_err(|e| DocsweepError::internal(format!("bad token pattern: {e}")))
        };
        Ok(Self {
            bare_token: compile(r"\b(\w+\.(?:tex|pdf|md|bib))\b")?,
            quoted_token: compile(r#"["']([^"']+\.(?:tex|pdf|md|bib))["']"#)?,
        })
    }

    /// Apply all three heuristics for one build script's content.
    pub fn apply(&self, inventory: &Inventory, content: &str, usage: &mut Usage) {
        if content.contains(CONVERTER_TOOL) {
            self.mark_converted_documents(inventory, usage);
        }

        if TYPESETTER_NAMES.iter().any(|name| content.contains(name)) {
            for file in inventory.by_basename(DOCUMENT_ENTRY) {
                usage.mark_used(&file.path);
            }
        }

        self.mark_mentioned_files(inventory, content, usage);
    }

    /// Heuristic 1: every markdown file is converted, and each conversion
    /// keeps its `.tex` counterpart alive.
    fn mark_converted_documents(&self, inventory: &Inventory, usage: &mut Usage) {
        let tex_siblings: Vec<_> = inventory
            .by_kind(FileKind::Markdown)
            .map(|md| md.path.with_extension("tex"))
            .filter(|tex| inventory.contains(tex))
            .collect();
        for md in inventory.by_kind(FileKind::Markdown) {
            usage.mark_used(&md.path);
        }
        for tex in tex_siblings {
            usage.mark_used(&tex);
        }
    }

    /// Heuristic 3: bare or quoted filename tokens mark basename matches.
    fn mark_mentioned_files(&self, inventory: &Inventory, content: &str, usage: &mut Usage) {
        let mut mentioned: Vec<String> = Vec::new();
        for cap in self.bare_token.captures_iter(content) {
            mentioned.push(cap[1].to_string());
        }
        for cap in self.quoted_token.captures_iter(content) {
            // quoted mentions may carry a directory prefix; match on basename
            if let Some(base) = Path::new(&cap[1]).file_name().and_then(|n| n.to_str()) {
                mentioned.push(base.to_string());
            }
        }

        let matched: Vec<_> = inventory
            .iter()
            .filter(|f| mentioned.iter().any(|m| m == f.basename()))
            .map(|f| f.path.clone())
            .collect();
        for path in matched {
            usage.mark_used(&path);
        }
    }
}
