use crate::corpus::{sorted_keys, Corpus, TestamentId};
use crate::location::Location;
use crate::reference::{whole_chapter, Verse};

/// Children of a location, already in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing {
    Testaments(Vec<TestamentId>),
    Books(Vec<String>),
    Chapters(Vec<String>),
    Verses { chapter: String, verses: Vec<Verse> },
}

impl Listing {
    /// Names a user can `cd` into from here. Verses are leaves.
    #[must_use]
    pub fn entry_names(&self) -> Vec<String> {
        match self {
            Self::Testaments(ids) => ids.iter().map(|t| t.as_str().to_string()).collect(),
            Self::Books(names) | Self::Chapters(names) => names.clone(),
            Self::Verses { .. } => Vec::new(),
        }
    }
}

#[must_use]
pub fn list(corpus: &Corpus, location: &Location) -> Listing {
    match location {
        Location::Root => Listing::Testaments(TestamentId::ALL.to_vec()),
        Location::Testament(t) => Listing::Books(owned(sorted_keys(corpus.testament(*t)))),
        Location::Book { testament, book } => Listing::Chapters(
            corpus
                .book(*testament, book)
                .map(|(_, b)| owned(sorted_keys(b)))
                .unwrap_or_default(),
        ),
        Location::Chapter {
            testament,
            book,
            chapter,
        } => Listing::Verses {
            chapter: chapter.clone(),
            verses: corpus
                .chapter(*testament, book, chapter)
                .map(whole_chapter)
                .unwrap_or_default(),
        },
    }
}

fn owned(keys: Vec<&str>) -> Vec<String> {
    keys.into_iter().map(str::to_string).collect()
}
