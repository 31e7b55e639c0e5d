//! LaTeX directive extraction.
//!
//! Matches the four directive shapes that pull other repository files into a
//! document: `\input{..}`, `\include{..}`, `\includegraphics[opts]{..}` and
//! `\bibliography{..}`. This is pattern matching, not TeX parsing: directives
//! inside comments or `verbatim` blocks are still matched, which errs on the
//! side of marking files used.

use super::Reference;
use crate::error::{DocsweepError, DocsweepResult};
use regex::Regex;

/// Compiled directive patterns for LaTeX sources.
#[derive(Debug)]
pub struct LatexExtractor {
    input: Regex,
    include: Regex,
    graphics: Regex,
    bibliography: Regex,
}

impl LatexExtractor {
    pub fn new() -> DocsweepResult<Self> {
        let compile = |pattern: &str| {
            Regex::new(pattern)
                .map_err(|e| DocsweepError::internal(format!("bad latex pattern: {e}")))
        };
        Ok(Self {
            input: compile(r"\\input\{([^}]+)\}")?,
            include: compile(r"\\include\{([^}]+)\}")?,
            // bracketed options before the braced argument are ignorable
            graphics: compile(r"\\includegraphics(?:\[[^\]]*\])?\{([^}]+)\}")?,
            bibliography: compile(r"\\bibliography\{([^}]+)\}")?,
        })
    }

    /// Extract all references from one file's content.
    ///
    /// `\input`/`\include` default to `.tex`, `\bibliography` to `.bib`;
    /// graphics arguments are used exactly as written (they may resolve via
    /// basename match instead).
    pub fn extract(&self, content: &str) -> Vec<Reference> {
        let mut refs = Vec::new();
        for pattern in [&self.input, &self.include] {
            for cap in pattern.captures_iter(content) {
                refs.push(Reference::new(cap[1].trim(), Some(".tex")));
            }
        }
        for cap in self.graphics.captures_iter(content) {
            refs.push(Reference::new(cap[1].trim(), None));
        }
        for cap in self.bibliography.captures_iter(content) {
            refs.push(Reference::new(cap[1].trim(), Some(".bib")));
        }
        refs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(content: &str) -> Vec<String> {
        LatexExtractor::new()
            .unwrap()
            .extract(content)
            .iter()
            .map(|r| r.qualified())
            .collect()
    }

    #[test]
    fn test_input_and_include() {
        let refs = extract(r"\input{chapter1} \include{appendix.tex}");
        assert_eq!(refs, vec!["chapter1.tex", "appendix.tex"]);
    }

    #[test]
    fn test_graphics_with_options() {
        let refs = extract(r"\includegraphics[width=0.5\textwidth]{figures/plot.png}");
        assert_eq!(refs, vec!["figures/plot.png"]);
    }

    #[test]
    fn test_graphics_without_extension_kept_as_is() {
        let refs = extract(r"\includegraphics{diagram}");
        assert_eq!(refs, vec!["diagram"]);
    }

    #[test]
    fn test_bibliography_gets_bib_extension() {
        let refs = extract(r"\bibliography{references}");
        assert_eq!(refs, vec!["references.bib"]);
    }

    #[test]
    fn test_plain_text_yields_nothing() {
        assert!(extract("no directives here, just prose").is_empty());
    }
}
