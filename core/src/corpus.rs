//! In-memory corpus tree: Testament -> Book -> Chapter -> Verse.
//!
//! The tree is loaded once and never mutated. None of the maps carry an
//! order; callers that display or walk keys go through [`sorted_keys`].

use crate::error::{CoreError, CoreResult};
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

/// Verse number -> verse text.
pub type Chapter = HashMap<String, String>;
/// Chapter number -> chapter.
pub type Book = HashMap<String, Chapter>;
/// Book name -> book.
pub type Testament = HashMap<String, Book>;

/// KJV excerpt compiled into the binary for runs without a corpus file.
const BUNDLED: &str = include_str!("../../data/sample.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TestamentId {
    Old,
    New,
}

impl TestamentId {
    /// Index construction and corpus-wide walks visit testaments in this order.
    pub const ALL: [Self; 2] = [Self::Old, Self::New];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Old => "OT",
            Self::New => "NT",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::Old => "Old Testament",
            Self::New => "New Testament",
        }
    }

    /// Case-insensitive match against `OT` / `NT`.
    #[must_use]
    pub fn parse(token: &str) -> Option<Self> {
        if token.eq_ignore_ascii_case("ot") {
            Some(Self::Old)
        } else if token.eq_ignore_ascii_case("nt") {
            Some(Self::New)
        } else {
            None
        }
    }
}

impl fmt::Display for TestamentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Corpus {
    #[serde(rename = "OT", default)]
    old: Testament,
    #[serde(rename = "NT", default)]
    new: Testament,
}

impl Corpus {
    #[must_use]
    pub fn new(old: Testament, new: Testament) -> Self {
        Self { old, new }
    }

    /// Parses the nested JSON layout `{"OT": {book: {chapter: {verse: text}}}, "NT": ...}`.
    pub fn from_json(data: &str) -> CoreResult<Self> {
        if data.trim().is_empty() {
            return Err(CoreError::EmptyCorpus);
        }
        let corpus: Self = serde_json::from_str(data)?;
        tracing::debug!(
            ot_books = corpus.old.len(),
            nt_books = corpus.new.len(),
            "corpus loaded"
        );
        Ok(corpus)
    }

    pub fn from_file(path: impl AsRef<Path>) -> CoreResult<Self> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path).map_err(|source| CoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&data)
    }

    /// The sample corpus shipped inside the binary.
    pub fn bundled() -> CoreResult<Self> {
        Self::from_json(BUNDLED)
    }

    #[must_use]
    pub fn testament(&self, id: TestamentId) -> &Testament {
        match id {
            TestamentId::Old => &self.old,
            TestamentId::New => &self.new,
        }
    }

    /// Finds a book ignoring case and spaces, so `1john`, `1 JOHN` and
    /// `1 John` all land on the same entry. Returns the stored name.
    #[must_use]
    pub fn book(&self, testament: TestamentId, name: &str) -> Option<(&str, &Book)> {
        let wanted = normalize_key(name);
        self.testament(testament)
            .iter()
            .find(|(key, _)| normalize_key(key) == wanted)
            .map(|(key, book)| (key.as_str(), book))
    }

    #[must_use]
    pub fn chapter(&self, testament: TestamentId, book: &str, chapter: &str) -> Option<&Chapter> {
        self.book(testament, book)
            .and_then(|(_, b)| b.get(chapter))
    }

    #[must_use]
    pub fn verse(
        &self,
        testament: TestamentId,
        book: &str,
        chapter: &str,
        verse: &str,
    ) -> Option<&str> {
        self.chapter(testament, book, chapter)
            .and_then(|c| c.get(verse))
            .map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.old.is_empty() && self.new.is_empty()
    }
}

/// Lowercases and strips spaces. This is the lookup key used by the book
/// index and by case/space-insensitive book matching.
#[must_use]
pub fn normalize_key(s: &str) -> String {
    s.chars()
        .filter(|c| *c != ' ')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Keys of `map` in display order: numerically ascending when every key is
/// an integer, lexicographically ascending otherwise.
#[must_use]
pub fn sorted_keys<V>(map: &HashMap<String, V>) -> Vec<&str> {
    let mut keys: Vec<&str> = map.keys().map(String::as_str).collect();
    sort_keys(&mut keys);
    keys
}

pub(crate) fn sort_keys(keys: &mut [&str]) {
    let numeric: Option<Vec<i64>> = keys.iter().map(|k| k.parse::<i64>().ok()).collect();
    if numeric.is_some() {
        keys.sort_by_key(|k| k.parse::<i64>().unwrap_or_default());
    } else {
        keys.sort_unstable();
    }
}
