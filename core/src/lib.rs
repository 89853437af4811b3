//! bsh core: the corpus tree and everything that resolves user input
//! against it.
//!
//! - [`corpus`]: immutable Testament -> Book -> Chapter -> Verse store
//! - [`index`]: first-come prefix index over book names
//! - [`navigator`]: current/previous location, `cd` semantics
//! - [`reference`]: multi-reference, greedy book matching, verse selectors
//! - [`search`], [`listing`], [`manna`]: read-only views over the corpus

#![allow(missing_docs)]

pub mod bookmarks;
pub mod corpus;
pub mod engine;
pub mod error;
pub mod index;
pub mod listing;
pub mod location;
pub mod manna;
pub mod navigator;
pub mod reference;
pub mod search;

pub use bookmarks::Bookmarks;
pub use corpus::{normalize_key, sorted_keys, Book, Chapter, Corpus, Testament, TestamentId};
pub use engine::{BookmarkError, Engine};
pub use error::{CoreError, CoreResult, NavError};
pub use index::BookIndex;
pub use listing::Listing;
pub use location::Location;
pub use manna::RandomVerse;
pub use navigator::Navigator;
pub use reference::{ReadEvent, Verse, VerseSelector};
pub use search::SearchHit;
