use crate::corpus::{sorted_keys, Corpus, TestamentId};
use rand::seq::SliceRandom;
use rand::Rng;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RandomVerse {
    pub testament: TestamentId,
    pub book: String,
    pub chapter: String,
    pub verse: String,
    pub text: String,
}

impl RandomVerse {
    #[must_use]
    pub fn reference(&self) -> String {
        format!("{} {}:{}", self.book, self.chapter, self.verse)
    }
}

/// Picks a verse by choosing uniformly at each level: testament, book,
/// chapter, verse. Short books are as likely as long ones. Returns `None`
/// when the chosen branch runs out of children before reaching a verse.
pub fn random_verse<R: Rng + ?Sized>(corpus: &Corpus, rng: &mut R) -> Option<RandomVerse> {
    let testaments: Vec<TestamentId> = TestamentId::ALL
        .into_iter()
        .filter(|t| !corpus.testament(*t).is_empty())
        .collect();
    let testament = *testaments.choose(rng)?;

    let books = corpus.testament(testament);
    let book = *sorted_keys(books).choose(rng)?;
    let chapters = &books[book];
    let chapter = *sorted_keys(chapters).choose(rng)?;
    let verses = &chapters[chapter];
    let verse = *sorted_keys(verses).choose(rng)?;

    Some(RandomVerse {
        testament,
        book: book.to_string(),
        chapter: chapter.to_string(),
        verse: verse.to_string(),
        text: verses[verse].clone(),
    })
}
