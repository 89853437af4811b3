//! The session state behind the shell: corpus, its book index, the
//! navigator and the bookmark store.

use crate::bookmarks::Bookmarks;
use crate::corpus::Corpus;
use crate::error::{CoreError, NavError};
use crate::index::BookIndex;
use crate::listing::{self, Listing};
use crate::location::Location;
use crate::manna::{self, RandomVerse};
use crate::navigator::Navigator;
use crate::reference::{self, ReadEvent};
use crate::search::{self, SearchHit};
use rand::Rng;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BookmarkError {
    #[error("bookmark '{0}' not found")]
    Unknown(String),

    #[error("bookmark '{name}' points to missing location {target}")]
    Stale { name: String, target: String },

    #[error(transparent)]
    Persist(#[from] CoreError),
}

#[derive(Debug)]
pub struct Engine {
    corpus: Corpus,
    index: BookIndex,
    nav: Navigator,
    bookmarks: Bookmarks,
}

impl Engine {
    /// Builds the book index once; it is never rebuilt for this engine.
    #[must_use]
    pub fn new(corpus: Corpus, bookmarks: Bookmarks) -> Self {
        let index = BookIndex::build(&corpus);
        Self {
            corpus,
            index,
            nav: Navigator::new(),
            bookmarks,
        }
    }

    #[must_use]
    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    #[must_use]
    pub fn location(&self) -> &Location {
        self.nav.location()
    }

    #[must_use]
    pub fn navigator(&self) -> &Navigator {
        &self.nav
    }

    pub fn navigator_mut(&mut self) -> &mut Navigator {
        &mut self.nav
    }

    #[must_use]
    pub fn bookmarks(&self) -> &Bookmarks {
        &self.bookmarks
    }

    /// Prompt form of the current location.
    #[must_use]
    pub fn path_string(&self) -> String {
        self.nav.location().to_string()
    }

    pub fn change_directory(&mut self, arg: &str) -> Result<(), NavError> {
        self.nav.change_directory(&self.corpus, &self.index, arg)
    }

    /// Reads every reference in `args` left to right. An empty argument
    /// shows the current book or chapter. Runs of whitespace count as one
    /// space, so tabs around `+` or `and` still separate references.
    pub fn read(&mut self, args: &str) -> Vec<ReadEvent> {
        let args = args.split_whitespace().collect::<Vec<_>>().join(" ");
        let segments = reference::split_references(&args);
        if segments.is_empty() {
            return reference::read_at(&self.corpus, self.nav.location(), "");
        }
        segments
            .into_iter()
            .flat_map(|segment| {
                reference::read_segment(&self.corpus, &self.index, &mut self.nav, segment)
            })
            .collect()
    }

    #[must_use]
    pub fn list(&self) -> Listing {
        listing::list(&self.corpus, self.nav.location())
    }

    #[must_use]
    pub fn search(&self, query: &str) -> Vec<SearchHit> {
        search::search(&self.corpus, self.nav.location(), query)
    }

    pub fn random_verse<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<RandomVerse> {
        manna::random_verse(&self.corpus, rng)
    }

    /// Saves the current location under `name` and returns its path.
    pub fn mark(&mut self, name: &str) -> Result<String, BookmarkError> {
        let target = self.path_string();
        self.bookmarks.set(name, &target)?;
        Ok(target)
    }

    /// Jumps to a saved location. The stored path is re-validated against
    /// the corpus so a stale bookmark cannot leave a dangling location.
    pub fn goto(&mut self, name: &str) -> Result<(), BookmarkError> {
        let target = self
            .bookmarks
            .get(name)
            .ok_or_else(|| BookmarkError::Unknown(name.to_string()))?
            .to_string();
        self.nav
            .absolute_move(&self.corpus, &target)
            .map_err(|_| BookmarkError::Stale {
                name: name.to_string(),
                target,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::TestamentId;

    fn engine() -> Engine {
        let corpus = Corpus::from_json(
            r#"{
                "OT": {"Genesis": {"1": {"1": "In the beginning"}}},
                "NT": {"John": {"3": {"16": "For God so loved"}}}
            }"#,
        )
        .unwrap();
        Engine::new(corpus, Bookmarks::in_memory())
    }

    #[test]
    fn multi_reference_read_ends_at_last_book() {
        let mut e = engine();
        let events = e.read("Genesis 1:1 + John 3:16");
        let texts: Vec<_> = events
            .iter()
            .filter_map(|ev| match ev {
                ReadEvent::Verse(v) => Some(v.text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(texts, vec!["In the beginning", "For God so loved"]);
        assert_eq!(e.path_string(), "/NT/John");
    }

    #[test]
    fn tabs_around_separators_still_split() {
        let mut e = engine();
        let verses = e
            .read("Genesis 1:1\t+\tJohn 3:16")
            .into_iter()
            .filter(|ev| matches!(ev, ReadEvent::Verse(_)))
            .count();
        assert_eq!(verses, 2);

        let verses = e
            .read("Genesis 1:1 \t and\tJohn 3:16")
            .into_iter()
            .filter(|ev| matches!(ev, ReadEvent::Verse(_)))
            .count();
        assert_eq!(verses, 2);
        assert_eq!(e.path_string(), "/NT/John");
    }

    #[test]
    fn empty_read_at_root_needs_book() {
        let mut e = engine();
        assert_eq!(e.read("  "), vec![ReadEvent::NoBookSelected]);
    }

    #[test]
    fn mark_and_goto_records_history() {
        let mut e = engine();
        e.change_directory("/OT/Genesis").unwrap();
        assert_eq!(e.mark("gen").unwrap(), "/OT/Genesis");
        e.change_directory("/").unwrap();
        e.goto("gen").unwrap();
        assert_eq!(e.location(), &Location::book(TestamentId::Old, "Genesis"));
        e.change_directory("-").unwrap();
        assert!(e.location().is_root());
    }

    #[test]
    fn goto_unknown_or_stale() {
        let mut e = engine();
        assert!(matches!(e.goto("nope"), Err(BookmarkError::Unknown(_))));

        let mut marks = Bookmarks::in_memory();
        marks.set("gone", "/OT/Leviticus").unwrap();
        let mut e = Engine::new(e.corpus().clone(), marks);
        assert!(matches!(e.goto("gone"), Err(BookmarkError::Stale { .. })));
        assert!(e.location().is_root());
    }
}
