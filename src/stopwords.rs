use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::normalize::normalize;

// Include the default Persian stopword list at compile time
const DEFAULT_STOPWORDS_BYTES: &[u8] = include_bytes!("../default_stopwords.txt");

/// Stopwords held in normalized form; membership tests normalize the probe
/// token with the same normalizer so filtering stays consistent.
#[derive(Debug)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl StopwordSet {
    /// Loads stopwords from the given file, or from the embedded default
    /// list when no path is supplied. A missing or unreadable explicit path
    /// is fatal; the pipeline must not silently degrade to "no filtering".
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            info!(action = "load", component = "stopwords", file_path = ?path, "Loading stopwords from file");
            if !path.exists() {
                anyhow::bail!("Stopword file not found: {:?}", path);
            }
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read stopword file {:?}", path))?;
            let set = Self::from_lines(&content);
            info!(
                action = "loaded",
                component = "stopwords",
                word_count = set.len(),
                file_path = ?path,
                "Stopwords loaded"
            );
            Ok(set)
        } else {
            info!(
                action = "load",
                component = "stopwords",
                "Using embedded default stopword list"
            );
            let content = std::str::from_utf8(DEFAULT_STOPWORDS_BYTES)
                .context("Failed to decode embedded default stopwords")?;
            let set = Self::from_lines(content);
            info!(
                action = "loaded",
                component = "stopwords",
                word_count = set.len(),
                "Embedded stopwords loaded"
            );
            Ok(set)
        }
    }

    /// One token per line; lines are trimmed, blanks and `#` comments are
    /// skipped, and every entry is normalized before insertion.
    pub fn from_lines(content: &str) -> Self {
        let words = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(normalize)
            .collect();
        Self { words }
    }

    pub fn empty() -> Self {
        Self {
            words: HashSet::new(),
        }
    }

    /// Normalization-consistent membership: the probe token is normalized
    /// before lookup.
    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(&normalize(token))
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn trims_and_skips_blank_and_comment_lines() {
        let set = StopwordSet::from_lines("  که \n\n# comment\nاز\n");
        assert_eq!(set.len(), 2);
        assert!(set.contains("که"));
        assert!(set.contains("از"));
    }

    #[test]
    fn membership_is_normalization_consistent() {
        // Stopword spelled with Arabic kaf/yeh still matches Persian spellings
        let set = StopwordSet::from_lines("يك\n");
        assert!(set.contains("یک"));
        assert!(set.contains("يك"));
        assert!(!set.contains("دو"));
    }

    #[test]
    fn missing_explicit_path_is_fatal() {
        let err = StopwordSet::load(Some(Path::new("/nonexistent/stopwords.txt"))).unwrap_err();
        assert!(format!("{err}").contains("stopwords.txt"));
    }

    #[test]
    fn loads_from_file_and_embedded_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "alpha\nbeta").unwrap();
        let set = StopwordSet::load(Some(file.path())).unwrap();
        assert!(set.contains("alpha"));

        let defaults = StopwordSet::load(None).unwrap();
        assert!(!defaults.is_empty());
        assert!(defaults.contains("که"));
    }
}
