//! Current/previous location and the moves between them.
//!
//! Relative steps (`..`, a single local `cd`) never touch the history.
//! Jumps (absolute paths, teleports, bookmark gotos) record the location
//! they left so `cd -` can swap back to it.

use crate::corpus::{normalize_key, Corpus, TestamentId};
use crate::error::NavError;
use crate::index::BookIndex;
use crate::location::Location;

#[derive(Debug, Clone, Default)]
pub struct Navigator {
    location: Location,
    previous: Option<Location>,
}

impl Navigator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn location(&self) -> &Location {
        &self.location
    }

    #[must_use]
    pub fn previous(&self) -> Option<&Location> {
        self.previous.as_ref()
    }

    /// Replaces the location without recording history.
    pub fn set_location(&mut self, location: Location) {
        self.location = location;
    }

    pub fn step_out(&mut self) {
        self.location = self.location.parent();
    }

    pub fn step_in(&mut self, corpus: &Corpus, token: &str) -> Result<(), NavError> {
        let next = Self::child_of(&self.location, corpus, token)
            .ok_or_else(|| NavError::NotFound(token.to_string()))?;
        self.location = next;
        Ok(())
    }

    /// Walks `path` from the root one component at a time. A failing
    /// component rejects the whole move: neither the location nor the
    /// history changes.
    pub fn absolute_move(&mut self, corpus: &Corpus, path: &str) -> Result<(), NavError> {
        let mut target = Location::Root;
        for part in path.split('/').filter(|p| !p.is_empty()) {
            target = Self::child_of(&target, corpus, part)
                .ok_or_else(|| NavError::PathElementNotFound(part.to_string()))?;
        }
        self.jump_to(target);
        Ok(())
    }

    pub fn teleport(&mut self, index: &BookIndex, token: &str) -> Result<(), NavError> {
        let target = index
            .resolve(token)
            .ok_or_else(|| NavError::NotFound(token.to_string()))?
            .clone();
        self.jump_to(target);
        Ok(())
    }

    /// Moves to `target`, remembering the current location for `cd -`.
    pub fn jump_to(&mut self, target: Location) {
        tracing::debug!(from = %self.location, to = %target, "jump");
        self.previous = Some(std::mem::replace(&mut self.location, target));
    }

    pub fn swap_to_previous(&mut self) -> Result<(), NavError> {
        let previous = self.previous.as_mut().ok_or(NavError::NoHistory)?;
        std::mem::swap(&mut self.location, previous);
        Ok(())
    }

    /// `cd` semantics: `/` or nothing goes to the root, `-` swaps with the
    /// previous location, `..` steps out, a leading `/` walks an absolute
    /// path, and anything else is tried as a local child before falling back
    /// to the global book index.
    pub fn change_directory(
        &mut self,
        corpus: &Corpus,
        index: &BookIndex,
        arg: &str,
    ) -> Result<(), NavError> {
        let arg = arg.trim();
        match arg {
            "" | "/" => self.absolute_move(corpus, "/"),
            "-" => self.swap_to_previous(),
            ".." => {
                self.step_out();
                Ok(())
            }
            _ if arg.starts_with('/') => self.absolute_move(corpus, arg),
            _ => {
                if self.step_in(corpus, arg).is_ok() || self.teleport(index, arg).is_ok() {
                    Ok(())
                } else {
                    Err(NavError::PathNotFound(arg.to_string()))
                }
            }
        }
    }

    fn child_of(location: &Location, corpus: &Corpus, token: &str) -> Option<Location> {
        match location {
            Location::Root => TestamentId::parse(token).map(Location::Testament),
            Location::Testament(t) => {
                let wanted = normalize_key(token);
                corpus
                    .testament(*t)
                    .keys()
                    .find(|name| normalize_key(name) == wanted)
                    .map(|name| Location::book(*t, name.clone()))
            }
            Location::Book { testament, book } => corpus
                .chapter(*testament, book, token)
                .map(|_| Location::chapter(*testament, book.clone(), token)),
            Location::Chapter { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> Corpus {
        Corpus::from_json(
            r#"{
                "OT": {
                    "Genesis": {"1": {"1": "In the beginning"}},
                    "Exodus": {"1": {"1": "Now these are the names"}}
                },
                "NT": {
                    "Matthew": {"1": {"1": "The book of the generation"}},
                    "John": {"3": {"16": "For God so loved"}},
                    "1 John": {"1": {"1": "That which was from the beginning"}}
                }
            }"#,
        )
        .unwrap()
    }

    fn at(location: Location) -> Navigator {
        let mut nav = Navigator::new();
        nav.set_location(location);
        nav
    }

    #[test]
    fn step_in_per_depth() {
        let c = corpus();
        let mut nav = Navigator::new();
        nav.step_in(&c, "ot").unwrap();
        nav.step_in(&c, "GENESIS").unwrap();
        nav.step_in(&c, "1").unwrap();
        assert_eq!(nav.location().to_string(), "/OT/Genesis/1");
        assert_eq!(nav.step_in(&c, "1"), Err(NavError::NotFound("1".into())));
    }

    #[test]
    fn step_in_matches_book_ignoring_spaces() {
        let c = corpus();
        let mut nav = at(Location::Testament(TestamentId::New));
        nav.step_in(&c, "1john").unwrap();
        assert_eq!(nav.location(), &Location::book(TestamentId::New, "1 John"));
    }

    #[test]
    fn step_in_chapter_is_exact() {
        let c = corpus();
        let mut nav = at(Location::book(TestamentId::New, "John"));
        assert!(nav.step_in(&c, "4").is_err());
        assert_eq!(nav.location(), &Location::book(TestamentId::New, "John"));
    }

    #[test]
    fn step_out_stops_at_root() {
        let mut nav = at(Location::Testament(TestamentId::Old));
        nav.step_out();
        nav.step_out();
        assert!(nav.location().is_root());
    }

    #[test]
    fn absolute_move_then_undo_is_a_swap() {
        let c = corpus();
        let mut nav = Navigator::new();
        nav.absolute_move(&c, "/OT/Genesis").unwrap();
        nav.swap_to_previous().unwrap();
        assert!(nav.location().is_root());
        nav.swap_to_previous().unwrap();
        assert_eq!(nav.location().to_string(), "/OT/Genesis");
    }

    #[test]
    fn failed_absolute_move_rolls_back() {
        let c = corpus();
        let mut nav = at(Location::book(TestamentId::New, "John"));
        let err = nav.absolute_move(&c, "/OT/Leviticus/1").unwrap_err();
        assert_eq!(err, NavError::PathElementNotFound("Leviticus".into()));
        assert_eq!(nav.location(), &Location::book(TestamentId::New, "John"));
        assert_eq!(nav.previous(), None);
    }

    #[test]
    fn undo_without_history() {
        let mut nav = Navigator::new();
        assert_eq!(nav.swap_to_previous(), Err(NavError::NoHistory));
        assert!(nav.location().is_root());
    }

    #[test]
    fn local_step_does_not_record_history() {
        let c = corpus();
        let index = BookIndex::build(&c);
        let mut nav = Navigator::new();
        nav.change_directory(&c, &index, "ot").unwrap();
        nav.change_directory(&c, &index, "..").unwrap();
        assert_eq!(nav.previous(), None);
    }

    #[test]
    fn cd_falls_back_to_teleport() {
        let c = corpus();
        let index = BookIndex::build(&c);
        let mut nav = at(Location::Testament(TestamentId::Old));
        nav.change_directory(&c, &index, "john").unwrap();
        assert_eq!(nav.location().to_string(), "/NT/John");
        assert_eq!(nav.previous(), Some(&Location::Testament(TestamentId::Old)));
    }

    #[test]
    fn cd_unknown_leaves_location() {
        let c = corpus();
        let index = BookIndex::build(&c);
        let mut nav = at(Location::Testament(TestamentId::Old));
        let err = nav.change_directory(&c, &index, "fakebook").unwrap_err();
        assert_eq!(err, NavError::PathNotFound("fakebook".into()));
        assert_eq!(nav.location(), &Location::Testament(TestamentId::Old));
    }

    #[test]
    fn teleport_is_idempotent() {
        let c = corpus();
        let index = BookIndex::build(&c);
        let starts = [
            Location::Root,
            Location::Testament(TestamentId::Old),
            Location::chapter(TestamentId::New, "John", "3"),
        ];
        for start in starts {
            let mut nav = at(start);
            nav.teleport(&index, "1 jo").unwrap();
            let first = nav.location().clone();
            nav.teleport(&index, "1 jo").unwrap();
            assert_eq!(nav.location(), &first);
            assert_eq!(first.to_string(), "/NT/1 John");
        }
    }
}
