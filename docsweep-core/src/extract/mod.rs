//! Reference extractors, one per source category.
//!
//! Each extractor scans raw file content for conservative textual patterns
//! and yields raw reference strings plus the default extension the category
//! implies. Extraction never fails the run: undecodable bytes are replaced
//! during the lossy read, and unreadable files simply contribute nothing.
//!
//! - [`latex`]: `\input`, `\include`, `\includegraphics`, `\bibliography`
//! - [`script`]: `import x` / `from x import` module references
//! - [`build`]: shell build-script heuristics (converter tools, compiler
//!   names, bare filename tokens)

pub mod build;
pub mod latex;
pub mod script;

use std::fs;
use std::path::Path;

/// A raw reference extracted from file content.
///
/// `raw` is the string exactly as it appeared in the directive; `default_ext`
/// is the extension the extracting category implies when the reference
/// carries none (e.g. `.tex` for `\input`). Graphics references carry no
/// default and are resolved as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub raw: String,
    pub default_ext: Option<&'static str>,
}

impl Reference {
    pub fn new(raw: impl Into<String>, default_ext: Option<&'static str>) -> Self {
        Self {
            raw: raw.into(),
            default_ext,
        }
    }

    /// The fully-qualified candidate string handed to the path resolver.
    ///
    /// Appends the default extension unless the raw reference already ends
    /// with it, mirroring how authors omit `.tex` in `\input{chapter1}`.
    pub fn qualified(&self) -> String {
        match self.default_ext {
            Some(ext) if !self.raw.ends_with(ext) => format!("{}{}", self.raw, ext),
            _ => self.raw.clone(),
        }
    }
}

/// Read a repository file permissively.
///
/// Undecodable bytes are replaced, never fatal; a read error is logged with
/// the filename and cause and the file is skipped.
pub(crate) fn read_lossy(root: &Path, relative: &Path) -> Option<String> {
    match fs::read(root.join(relative)) {
        Ok(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
        Err(e) => {
            tracing::warn!(path = %relative.display(), error = %e, "skipping unreadable file");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualified_appends_default_extension() {
        let r = Reference::new("chapter1", Some(".tex"));
        assert_eq!(r.qualified(), "chapter1.tex");
    }

    #[test]
    fn test_qualified_keeps_existing_extension() {
        let r = Reference::new("chapter1.tex", Some(".tex"));
        assert_eq!(r.qualified(), "chapter1.tex");
    }

    #[test]
    fn test_qualified_without_default() {
        let r = Reference::new("figures/plot.png", None);
        assert_eq!(r.qualified(), "figures/plot.png");
    }
}
