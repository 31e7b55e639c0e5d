//! Python import extraction.
//!
//! Matches `import module` and `from module import ...` statements,
//! capturing only the first identifier token. Dotted or package-qualified
//! imports are not resolved: the identifier is treated as a candidate `.py`
//! file and simply fails to resolve when no such repository file exists.

use super::Reference;
use crate::error::{DocsweepError, DocsweepResult};
use regex::Regex;

/// Compiled import patterns for Python scripts.
#[derive(Debug)]
pub struct ScriptExtractor {
    plain_import: Regex,
    from_import: Regex,
}

impl ScriptExtractor {
    pub fn new() -> DocsweepResult<Self> {
        let compile = |pattern: &str| {
            Regex::new(pattern)
                .map_err(|e| DocsweepError::internal(format!("bad import pattern: {e}")))
        };
        Ok(Self {
            plain_import: compile(r"(?m)^\s*import\s+(\w+)")?,
            from_import: compile(r"(?m)^\s*from\s+(\w+)\s+import")?,
        })
    }

    /// Extract module references from one script's content.
    pub fn extract(&self, content: &str) -> Vec<Reference> {
        let mut refs = Vec::new();
        for pattern in [&self.plain_import, &self.from_import] {
            for cap in pattern.captures_iter(content) {
                refs.push(Reference::new(&cap[1], Some(".py")));
            }
        }
        refs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(content: &str) -> Vec<String> {
        ScriptExtractor::new()
            .unwrap()
            .extract(content)
            .iter()
            .map(|r| r.qualified())
            .collect()
    }

    #[test]
    fn test_plain_import() {
        assert_eq!(extract("import helpers\n"), vec!["helpers.py"]);
    }

    #[test]
    fn test_from_import() {
        assert_eq!(extract("from utils import convert\n"), vec!["utils.py"]);
    }

    #[test]
    fn test_dotted_import_captures_first_token_only() {
        // `os.path` is package-qualified; only `os` is captured and it will
        // fail to resolve against the inventory
        assert_eq!(extract("import os.path\n"), vec!["os.py"]);
    }

    #[test]
    fn test_indented_imports_match() {
        let content = "def f():\n    import helpers\n";
        assert_eq!(extract(content), vec!["helpers.py"]);
    }

    #[test]
    fn test_no_imports() {
        assert!(extract("x = 1\nprint(x)\n").is_empty());
    }
}
