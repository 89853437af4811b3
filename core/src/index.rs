//! Prefix index over book names.
//!
//! Every prefix of every normalized book name maps to the first book that
//! claimed it. Claim order is OT before NT and books in [`sorted_keys`]
//! order inside each testament, so with `John` and `Joshua` in different
//! testaments `jo` belongs to whichever is indexed first. A few short
//! abbreviations are pinned afterwards regardless of who claimed them.

use crate::corpus::{normalize_key, sorted_keys, Corpus, TestamentId};
use crate::location::Location;
use std::collections::HashMap;

/// Abbreviation -> normalized book name.
pub const MANUAL_ALIASES: &[(&str, &str)] = &[
    ("mt", "matthew"),
    ("mk", "mark"),
    ("lk", "luke"),
    ("jn", "john"),
    ("php", "philippians"),
];

#[derive(Debug, Clone, Default)]
pub struct BookIndex {
    entries: HashMap<String, Location>,
}

impl BookIndex {
    #[must_use]
    pub fn build(corpus: &Corpus) -> Self {
        let mut entries = HashMap::new();
        let mut books_by_key: HashMap<String, Location> = HashMap::new();

        for testament in TestamentId::ALL {
            entries.insert(
                testament.as_str().to_lowercase(),
                Location::Testament(testament),
            );

            for name in sorted_keys(corpus.testament(testament)) {
                let key = normalize_key(name);
                let target = Location::book(testament, name);
                for (end, c) in key.char_indices() {
                    let prefix = &key[..end + c.len_utf8()];
                    entries
                        .entry(prefix.to_string())
                        .or_insert_with(|| target.clone());
                }
                books_by_key.entry(key).or_insert(target);
            }
        }

        for (alias, book_key) in MANUAL_ALIASES {
            if let Some(target) = books_by_key.get(*book_key) {
                entries.insert((*alias).to_string(), target.clone());
            }
        }

        tracing::debug!(keys = entries.len(), "book index built");
        Self { entries }
    }

    /// Exact lookup of an already-normalized key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Location> {
        self.entries.get(key)
    }

    /// Normalizes `token` (lowercase, spaces removed) before the lookup.
    #[must_use]
    pub fn resolve(&self, token: &str) -> Option<&Location> {
        self.entries.get(&normalize_key(token))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::{Book, Testament};

    fn book() -> Book {
        let mut chapter = HashMap::new();
        chapter.insert("1".to_string(), "text".to_string());
        let mut book = HashMap::new();
        book.insert("1".to_string(), chapter);
        book
    }

    fn corpus(ot: &[&str], nt: &[&str]) -> Corpus {
        let make = |names: &[&str]| -> Testament {
            names.iter().map(|n| ((*n).to_string(), book())).collect()
        };
        Corpus::new(make(ot), make(nt))
    }

    #[test]
    fn empty_corpus_only_has_testaments() {
        let index = BookIndex::build(&Corpus::default());
        assert_eq!(index.len(), 2);
        assert_eq!(index.get("ot"), Some(&Location::Testament(TestamentId::Old)));
        assert_eq!(index.get("nt"), Some(&Location::Testament(TestamentId::New)));
    }

    #[test]
    fn every_unclaimed_prefix_maps_to_its_book() {
        let c = corpus(&["Genesis", "Exodus"], &["John", "1 John"]);
        let index = BookIndex::build(&c);
        for prefix in ["g", "ge", "gen", "genesis"] {
            assert_eq!(
                index.get(prefix),
                Some(&Location::book(TestamentId::Old, "Genesis")),
                "prefix {prefix}"
            );
        }
        for prefix in ["1", "1j", "1john"] {
            assert_eq!(
                index.get(prefix),
                Some(&Location::book(TestamentId::New, "1 John")),
                "prefix {prefix}"
            );
        }
    }

    #[test]
    fn first_sorted_book_owns_shared_prefix() {
        let c = corpus(&["Joshua", "Job"], &["John"]);
        let index = BookIndex::build(&c);
        // "Job" sorts before "Joshua" and claims "j" and "jo".
        assert_eq!(index.get("jo"), Some(&Location::book(TestamentId::Old, "Job")));
        assert_eq!(index.get("josh"), Some(&Location::book(TestamentId::Old, "Joshua")));
        // OT is indexed first, so John only owns what is left.
        assert_eq!(index.get("joh"), Some(&Location::book(TestamentId::New, "John")));
    }

    #[test]
    fn manual_aliases_override_prefix_claims() {
        // "Jnah" is indexed first and claims "jn" as a plain prefix.
        let c = corpus(&["Jnah", "Job"], &["John", "Matthew", "Mark"]);
        let index = BookIndex::build(&c);
        assert_eq!(index.get("jna"), Some(&Location::book(TestamentId::Old, "Jnah")));
        assert_eq!(index.get("jn"), Some(&Location::book(TestamentId::New, "John")));
        assert_eq!(index.get("mt"), Some(&Location::book(TestamentId::New, "Matthew")));
        assert_eq!(index.get("mk"), Some(&Location::book(TestamentId::New, "Mark")));
        assert_eq!(index.get("lk"), None);
    }

    #[test]
    fn resolve_normalizes_token() {
        let c = corpus(&[], &["1 Corinthians"]);
        let index = BookIndex::build(&c);
        let expected = Location::book(TestamentId::New, "1 Corinthians");
        assert_eq!(index.resolve("1 Cor"), Some(&expected));
        assert_eq!(index.resolve("1COR"), Some(&expected));
        assert_eq!(index.resolve("2cor"), None);
    }
}
