//! Free-form reading references: `john 3:16-18, 20 + rom 8:28`.
//!
//! A reference line is split into independent segments, each segment is
//! matched greedily against the book index, and whatever is left is read as
//! `chapter[:verses]` (at book level) or `verses` (inside a chapter).

use crate::corpus::{sorted_keys, Chapter, Corpus};
use crate::index::BookIndex;
use crate::location::Location;
use crate::navigator::Navigator;

/// Literal separators between references. Matching is case sensitive on
/// purpose: `And` inside a phrase is left alone.
pub const REFERENCE_SEPARATORS: [&str; 3] = [" + ", " and ", " AND "];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verse {
    pub number: String,
    pub text: String,
}

/// One observable step of a read, in output order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadEvent {
    /// The location is above book level and nothing in the input named a book.
    NoBookSelected,
    ChapterList {
        book: String,
        chapters: Vec<String>,
    },
    Chapter {
        book: String,
        chapter: String,
        verses: Vec<Verse>,
    },
    ChapterNotFound(String),
    /// Printed once before the verses of a selector.
    Heading {
        book: String,
        chapter: String,
        selector: String,
    },
    Verse(Verse),
    EndOfChapter,
    InvalidRange(String),
    VerseNotFound(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerseSelector {
    Single(String),
    Range { start: u32, end: u32 },
    InvalidRange(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookMatch {
    pub target: Location,
    /// Number of leading tokens that formed the book name.
    pub consumed: usize,
}

/// Splits on [`REFERENCE_SEPARATORS`]; segments are trimmed and empty ones
/// dropped.
#[must_use]
pub fn split_references(input: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut rest = input;
    while let Some((at, len)) = REFERENCE_SEPARATORS
        .iter()
        .filter_map(|sep| rest.find(sep).map(|i| (i, sep.len())))
        .min_by_key(|(i, _)| *i)
    {
        segments.push(&rest[..at]);
        rest = &rest[at + len..];
    }
    segments.push(rest);
    segments
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Greedy book matcher. Tokens are concatenated left to right (lowercased,
/// no separator) and every prefix that hits the index replaces the previous
/// best, so `1 cor` beats `1`.
#[must_use]
pub fn match_book(index: &BookIndex, tokens: &[&str]) -> Option<BookMatch> {
    let mut key = String::new();
    let mut best = None;
    for (i, token) in tokens.iter().enumerate() {
        key.push_str(&token.to_lowercase());
        if let Some(target) = index.get(&key) {
            best = Some(BookMatch {
                target: target.clone(),
                consumed: i + 1,
            });
        }
    }
    best
}

/// Parses `16`, `16-18`, `16-18, 20` into selectors. Range endpoints that
/// are not integers yield [`VerseSelector::InvalidRange`] for that segment
/// only.
#[must_use]
pub fn parse_verse_selector(text: &str) -> Vec<VerseSelector> {
    text.split(',')
        .map(str::trim)
        .filter(|seg| !seg.is_empty())
        .map(|seg| match seg.split_once('-') {
            Some((start, end)) => match (start.trim().parse(), end.trim().parse()) {
                (Ok(start), Ok(end)) => VerseSelector::Range { start, end },
                _ => VerseSelector::InvalidRange(seg.to_string()),
            },
            None => VerseSelector::Single(seg.to_string()),
        })
        .collect()
}

/// Resolves one reference segment, moving the navigator when the segment
/// names a book, and returns what should be shown.
pub fn read_segment(
    corpus: &Corpus,
    index: &BookIndex,
    nav: &mut Navigator,
    segment: &str,
) -> Vec<ReadEvent> {
    let tokens: Vec<&str> = segment.split_whitespace().collect();
    if let Some(first) = tokens.first() {
        if let Some(found) = match_book(index, &tokens) {
            if found.consumed > 1 || !is_local_reference(corpus, nav.location(), first) {
                nav.set_location(found.target);
                let rest = tokens[found.consumed..].join(" ");
                return read_at(corpus, nav.location(), &rest);
            }
        }
    }
    read_at(corpus, nav.location(), segment)
}

/// At book level a lone leading token that names a chapter of the current
/// book wins over a one-token book match: `cat 1` in Matthew reads Matthew 1.
/// Inside a chapter any book match teleports.
fn is_local_reference(corpus: &Corpus, location: &Location, token: &str) -> bool {
    match location {
        Location::Book { testament, book } => corpus
            .chapter(*testament, book, &token.to_lowercase())
            .is_some(),
        _ => false,
    }
}

/// Reads `arg` relative to `location` without moving.
#[must_use]
pub fn read_at(corpus: &Corpus, location: &Location, arg: &str) -> Vec<ReadEvent> {
    let (Some(testament), Some(book_name)) = (location.testament_id(), location.book_name())
    else {
        return vec![ReadEvent::NoBookSelected];
    };
    let Some((book_name, book)) = corpus.book(testament, book_name) else {
        return vec![ReadEvent::NoBookSelected];
    };
    let arg = arg.trim();

    let (chapter_key, selector) = match location.chapter_key() {
        Some(chapter) => (chapter.to_string(), arg.to_string()),
        None if arg.is_empty() => {
            return vec![ReadEvent::ChapterList {
                book: book_name.to_string(),
                chapters: sorted_keys(book).into_iter().map(str::to_string).collect(),
            }];
        }
        None => {
            let spaced = arg.replace(':', " ");
            let mut parts = spaced.split_whitespace();
            let Some(chapter) = parts.next() else {
                return vec![ReadEvent::ChapterNotFound(arg.to_string())];
            };
            (chapter.to_string(), parts.collect::<Vec<_>>().join(" "))
        }
    };

    let Some(chapter) = book.get(&chapter_key) else {
        return vec![ReadEvent::ChapterNotFound(chapter_key)];
    };

    if selector.is_empty() {
        return vec![ReadEvent::Chapter {
            book: book_name.to_string(),
            chapter: chapter_key,
            verses: whole_chapter(chapter),
        }];
    }

    let mut events = vec![ReadEvent::Heading {
        book: book_name.to_string(),
        chapter: chapter_key,
        selector: selector.clone(),
    }];
    for sel in parse_verse_selector(&selector) {
        select_verses(chapter, sel, &mut events);
    }
    events
}

fn select_verses(chapter: &Chapter, selector: VerseSelector, events: &mut Vec<ReadEvent>) {
    match selector {
        VerseSelector::Single(number) => match chapter.get(&number) {
            Some(text) => events.push(ReadEvent::Verse(Verse {
                number,
                text: text.clone(),
            })),
            None => events.push(ReadEvent::VerseNotFound(number)),
        },
        VerseSelector::Range { start, end } => {
            for n in start..=end {
                let number = n.to_string();
                let Some(text) = chapter.get(&number) else {
                    events.push(ReadEvent::EndOfChapter);
                    break;
                };
                events.push(ReadEvent::Verse(Verse {
                    number,
                    text: text.clone(),
                }));
            }
        }
        VerseSelector::InvalidRange(segment) => events.push(ReadEvent::InvalidRange(segment)),
    }
}

pub(crate) fn whole_chapter(chapter: &Chapter) -> Vec<Verse> {
    sorted_keys(chapter)
        .into_iter()
        .map(|number| Verse {
            number: number.to_string(),
            text: chapter[number].clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::TestamentId;

    fn corpus() -> Corpus {
        Corpus::from_json(
            r#"{
                "OT": {
                    "Genesis": {"1": {"1": "In the beginning", "2": "And the earth was without form"}}
                },
                "NT": {
                    "Matthew": {"1": {"1": "The book of the generation"}},
                    "John": {"3": {"16": "For God so loved", "17": "For God sent not"}},
                    "1 John": {"1": {"1": "That which was from the beginning"}},
                    "1 Corinthians": {"13": {"4": "Charity suffereth long"}}
                }
            }"#,
        )
        .unwrap()
    }

    fn verse(number: &str, text: &str) -> ReadEvent {
        ReadEvent::Verse(Verse {
            number: number.into(),
            text: text.into(),
        })
    }

    #[test]
    fn split_on_literal_separators() {
        assert_eq!(
            split_references("john 3:16 + rom 8:28 and gen 1:1 AND ex 1"),
            vec!["john 3:16", "rom 8:28", "gen 1:1", "ex 1"]
        );
        assert_eq!(split_references("john 3:16 And rom 8"), vec!["john 3:16 And rom 8"]);
        assert_eq!(split_references(" + john"), vec!["john"]);
    }

    #[test]
    fn longest_token_match_wins() {
        let c = corpus();
        let index = BookIndex::build(&c);
        let found = match_book(&index, &["1", "cor", "13:4"]).unwrap();
        assert_eq!(found.consumed, 2);
        assert_eq!(found.target, Location::book(TestamentId::New, "1 Corinthians"));

        let found = match_book(&index, &["1", "13:4"]).unwrap();
        assert_eq!(found.consumed, 1);
        assert!(match_book(&index, &["zzz"]).is_none());
    }

    #[test]
    fn verse_selector_grammar() {
        assert_eq!(
            parse_verse_selector("16-18, 20,,bad-1"),
            vec![
                VerseSelector::Range { start: 16, end: 18 },
                VerseSelector::Single("20".into()),
                VerseSelector::InvalidRange("bad-1".into()),
            ]
        );
    }

    #[test]
    fn range_stops_at_end_of_chapter() {
        let c = corpus();
        let loc = Location::book(TestamentId::New, "John");
        let events = read_at(&c, &loc, "3:16-18");
        assert_eq!(
            &events[1..],
            &[
                verse("16", "For God so loved"),
                verse("17", "For God sent not"),
                ReadEvent::EndOfChapter,
            ]
        );
    }

    #[test]
    fn invalid_range_continues_with_next_segment() {
        let c = corpus();
        let loc = Location::chapter(TestamentId::New, "John", "3");
        let events = read_at(&c, &loc, "16-bad, 17");
        assert_eq!(
            &events[1..],
            &[
                ReadEvent::InvalidRange("16-bad".into()),
                verse("17", "For God sent not"),
            ]
        );
    }

    #[test]
    fn missing_single_verse_is_reported() {
        let c = corpus();
        let loc = Location::book(TestamentId::New, "John");
        let events = read_at(&c, &loc, "3:99,16");
        assert_eq!(
            &events[1..],
            &[
                ReadEvent::VerseNotFound("99".into()),
                verse("16", "For God so loved"),
            ]
        );
    }

    #[test]
    fn missing_chapter_is_reported() {
        let c = corpus();
        let loc = Location::book(TestamentId::New, "John");
        assert_eq!(
            read_at(&c, &loc, "99"),
            vec![ReadEvent::ChapterNotFound("99".into())]
        );
    }

    #[test]
    fn empty_argument_lists_book_or_reads_chapter() {
        let c = corpus();
        let book = Location::book(TestamentId::Old, "Genesis");
        assert_eq!(
            read_at(&c, &book, ""),
            vec![ReadEvent::ChapterList {
                book: "Genesis".into(),
                chapters: vec!["1".into()],
            }]
        );
        let chapter = Location::chapter(TestamentId::Old, "Genesis", "1");
        match &read_at(&c, &chapter, "")[..] {
            [ReadEvent::Chapter { verses, .. }] => assert_eq!(verses.len(), 2),
            other => panic!("unexpected events: {other:?}"),
        }
    }

    #[test]
    fn reading_above_book_level_needs_a_book() {
        let c = corpus();
        assert_eq!(
            read_at(&c, &Location::Root, "3:16"),
            vec![ReadEvent::NoBookSelected]
        );
    }

    #[test]
    fn local_chapter_beats_single_token_book() {
        let c = corpus();
        let index = BookIndex::build(&c);
        let mut nav = Navigator::new();
        nav.set_location(Location::book(TestamentId::New, "Matthew"));
        let events = read_segment(&c, &index, &mut nav, "1");
        assert_eq!(nav.location(), &Location::book(TestamentId::New, "Matthew"));
        assert!(matches!(&events[..], [ReadEvent::Chapter { book, chapter, .. }]
            if book == "Matthew" && chapter == "1"));
    }

    #[test]
    fn multi_token_book_beats_local_chapter() {
        let c = corpus();
        let index = BookIndex::build(&c);
        let mut nav = Navigator::new();
        nav.set_location(Location::book(TestamentId::New, "Matthew"));
        read_segment(&c, &index, &mut nav, "1 john 1:1");
        assert_eq!(nav.location(), &Location::book(TestamentId::New, "1 John"));
    }

    #[test]
    fn local_verse_inside_chapter() {
        let c = corpus();
        let index = BookIndex::build(&c);
        let mut nav = Navigator::new();
        nav.set_location(Location::chapter(TestamentId::Old, "Genesis", "1"));
        let events = read_segment(&c, &index, &mut nav, "2");
        assert_eq!(nav.location().to_string(), "/OT/Genesis/1");
        assert_eq!(
            &events[1..],
            &[verse("2", "And the earth was without form")]
        );
    }

    #[test]
    fn single_token_book_match_teleports_from_chapter() {
        let c = corpus();
        let index = BookIndex::build(&c);
        let mut nav = Navigator::new();
        nav.set_location(Location::chapter(TestamentId::Old, "Genesis", "1"));
        let events = read_segment(&c, &index, &mut nav, "1");
        assert_eq!(nav.location().to_string(), "/NT/1 Corinthians");
        assert!(matches!(
            &events[..],
            [ReadEvent::ChapterList { book, .. }] if book == "1 Corinthians"
        ));
    }

    #[test]
    fn book_reference_moves_to_book() {
        let c = corpus();
        let index = BookIndex::build(&c);
        let mut nav = Navigator::new();
        let events = read_segment(&c, &index, &mut nav, "jn 3:16");
        assert_eq!(nav.location().to_string(), "/NT/John");
        assert_eq!(
            events,
            vec![
                ReadEvent::Heading {
                    book: "John".into(),
                    chapter: "3".into(),
                    selector: "16".into(),
                },
                verse("16", "For God so loved"),
            ]
        );
    }
}
