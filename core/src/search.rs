//! Case-insensitive substring search scoped by location depth.

use crate::corpus::{sorted_keys, Book, Chapter, Corpus, TestamentId};
use crate::location::Location;
use std::ops::Range;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub book: String,
    pub chapter: String,
    pub verse: String,
    pub text: String,
    /// Byte range of the first occurrence of the query in `text`.
    pub highlight: Range<usize>,
}

impl SearchHit {
    /// `Book Chapter:Verse`
    #[must_use]
    pub fn reference(&self) -> String {
        format!("{} {}:{}", self.book, self.chapter, self.verse)
    }
}

/// Query normalization applied before matching: quotes dropped, lowercased.
#[must_use]
pub fn normalize_query(query: &str) -> String {
    query.replace('"', "").to_lowercase()
}

/// Searches the subtree under `location`: everything at the root, one
/// testament, one book or one chapter. Hits come back in corpus order.
#[must_use]
pub fn search(corpus: &Corpus, location: &Location, query: &str) -> Vec<SearchHit> {
    let needle = normalize_query(query);
    let mut hits = Vec::new();
    if needle.is_empty() {
        return hits;
    }

    match location {
        Location::Root => {
            for testament in TestamentId::ALL {
                search_testament(corpus, testament, &needle, &mut hits);
            }
        }
        Location::Testament(t) => search_testament(corpus, *t, &needle, &mut hits),
        Location::Book { testament, book } => {
            if let Some((name, b)) = corpus.book(*testament, book) {
                search_book(name, b, &needle, &mut hits);
            }
        }
        Location::Chapter {
            testament,
            book,
            chapter,
        } => {
            if let Some((name, b)) = corpus.book(*testament, book) {
                if let Some(c) = b.get(chapter) {
                    search_chapter(name, chapter, c, &needle, &mut hits);
                }
            }
        }
    }
    hits
}

fn search_testament(corpus: &Corpus, id: TestamentId, needle: &str, hits: &mut Vec<SearchHit>) {
    let testament = corpus.testament(id);
    for name in sorted_keys(testament) {
        search_book(name, &testament[name], needle, hits);
    }
}

fn search_book(name: &str, book: &Book, needle: &str, hits: &mut Vec<SearchHit>) {
    for chapter in sorted_keys(book) {
        search_chapter(name, chapter, &book[chapter], needle, hits);
    }
}

fn search_chapter(
    book: &str,
    chapter_key: &str,
    chapter: &Chapter,
    needle: &str,
    hits: &mut Vec<SearchHit>,
) {
    for verse in sorted_keys(chapter) {
        let text = &chapter[verse];
        if let Some(highlight) = find_ignore_case(text, needle) {
            hits.push(SearchHit {
                book: book.to_string(),
                chapter: chapter_key.to_string(),
                verse: verse.to_string(),
                text: text.clone(),
                highlight,
            });
        }
    }
}

/// Finds the first occurrence of the lowercase `needle` in `haystack`,
/// comparing lowercased characters. The returned range indexes `haystack`
/// itself, so it stays valid when lowercasing changes byte lengths.
fn find_ignore_case(haystack: &str, needle: &str) -> Option<Range<usize>> {
    for (start, _) in haystack.char_indices() {
        let mut wanted = needle.chars();
        let mut pending = wanted.next();
        'scan: for (offset, c) in haystack[start..].char_indices() {
            for lower in c.to_lowercase() {
                match pending {
                    Some(w) if w == lower => pending = wanted.next(),
                    Some(_) => break 'scan,
                    None => break,
                }
            }
            if pending.is_none() {
                return Some(start..start + offset + c.len_utf8());
            }
        }
    }
    None
}
