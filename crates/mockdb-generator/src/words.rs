//! Word lists backing the realistic string modes.

use mockdb_core::{Error, Result};
use std::fs;
use std::path::Path;
use std::sync::{Arc, OnceLock};

const FEMALE_NAMES: &str = include_str!("../resources/female_names.txt");
const MALE_NAMES: &str = include_str!("../resources/male_names.txt");
const SURNAMES: &str = include_str!("../resources/surnames.txt");
const WORDS: &str = include_str!("../resources/words.txt");

/// File names read by [`WordLists::from_dir`].
pub const WORD_LIST_FILES: [&str; 4] = [
    "female_names.txt",
    "male_names.txt",
    "surnames.txt",
    "words.txt",
];

/// Given names, surnames and a natural-language corpus.
///
/// Every list is guaranteed non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordLists {
    female_names: Vec<String>,
    male_names: Vec<String>,
    surnames: Vec<String>,
    words: Vec<String>,
}

impl WordLists {
    /// Build word lists, failing if any list is empty.
    pub fn new(
        female_names: Vec<String>,
        male_names: Vec<String>,
        surnames: Vec<String>,
        words: Vec<String>,
    ) -> Result<Self> {
        for (name, list) in WORD_LIST_FILES
            .iter()
            .zip([&female_names, &male_names, &surnames, &words])
        {
            if list.is_empty() {
                return Err(Error::invalid(format!("word list '{name}' is empty")));
            }
        }
        Ok(Self {
            female_names,
            male_names,
            surnames,
            words,
        })
    }

    /// The lists compiled into the binary, loaded once per process.
    pub fn builtin() -> Arc<WordLists> {
        static BUILTIN: OnceLock<Arc<WordLists>> = OnceLock::new();
        BUILTIN
            .get_or_init(|| {
                Arc::new(WordLists {
                    female_names: split_lines(FEMALE_NAMES),
                    male_names: split_lines(MALE_NAMES),
                    surnames: split_lines(SURNAMES),
                    words: split_lines(WORDS),
                })
            })
            .clone()
    }

    /// Load the four list files from a directory.
    pub fn from_dir<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        let mut lists = Vec::with_capacity(WORD_LIST_FILES.len());
        for file in WORD_LIST_FILES {
            let content = fs::read_to_string(dir.join(file))?;
            lists.push(split_lines(&content));
        }
        tracing::debug!("Loaded word lists from {}", dir.display());

        let mut lists = lists.into_iter();
        let mut next = || lists.next().unwrap_or_default();
        Self::new(next(), next(), next(), next())
    }

    pub fn female_names(&self) -> &[String] {
        &self.female_names
    }

    pub fn male_names(&self) -> &[String] {
        &self.male_names
    }

    pub fn surnames(&self) -> &[String] {
        &self.surnames
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }
}

/// One entry per non-blank line, trimmed.
fn split_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_builtin_lists_are_populated() {
        let lists = WordLists::builtin();
        assert!(!lists.female_names().is_empty());
        assert!(!lists.male_names().is_empty());
        assert!(!lists.surnames().is_empty());
        assert!(!lists.words().is_empty());
        assert!(lists.words().iter().all(|w| !w.contains(char::is_whitespace)));
    }

    #[test]
    fn test_builtin_is_memoized() {
        let a = WordLists::builtin();
        let b = WordLists::builtin();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_from_dir() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("female_names.txt"), "ada\n\n  grace \n").unwrap();
        fs::write(dir.path().join("male_names.txt"), "alan\n").unwrap();
        fs::write(dir.path().join("surnames.txt"), "lovelace\nhopper\n").unwrap();
        fs::write(dir.path().join("words.txt"), "lorem\nipsum\n").unwrap();

        let lists = WordLists::from_dir(dir.path()).unwrap();
        assert_eq!(lists.female_names(), ["ada", "grace"]);
        assert_eq!(lists.surnames().len(), 2);
    }

    #[test]
    fn test_from_dir_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = WordLists::from_dir(dir.path());
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_empty_list_rejected() {
        let result = WordLists::new(
            vec!["a".into()],
            vec![],
            vec!["b".into()],
            vec!["c".into()],
        );
        match result {
            Err(Error::InvalidConfiguration(msg)) => assert!(msg.contains("'male_names.txt'")),
            other => panic!("expected InvalidConfiguration, got {other:?}"),
        }
    }
}
