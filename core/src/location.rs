use crate::corpus::TestamentId;
use std::fmt;

/// A position in the corpus tree. Each variant is one level deeper than the
/// previous, so a location can never hold more than three segments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Location {
    #[default]
    Root,
    Testament(TestamentId),
    Book {
        testament: TestamentId,
        book: String,
    },
    Chapter {
        testament: TestamentId,
        book: String,
        chapter: String,
    },
}

impl Location {
    #[must_use]
    pub fn book(testament: TestamentId, book: impl Into<String>) -> Self {
        Self::Book {
            testament,
            book: book.into(),
        }
    }

    #[must_use]
    pub fn chapter(
        testament: TestamentId,
        book: impl Into<String>,
        chapter: impl Into<String>,
    ) -> Self {
        Self::Chapter {
            testament,
            book: book.into(),
            chapter: chapter.into(),
        }
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Self::Root => 0,
            Self::Testament(_) => 1,
            Self::Book { .. } => 2,
            Self::Chapter { .. } => 3,
        }
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        matches!(self, Self::Root)
    }

    #[must_use]
    pub fn testament_id(&self) -> Option<TestamentId> {
        match self {
            Self::Root => None,
            Self::Testament(t) | Self::Book { testament: t, .. } | Self::Chapter { testament: t, .. } => {
                Some(*t)
            }
        }
    }

    #[must_use]
    pub fn book_name(&self) -> Option<&str> {
        match self {
            Self::Book { book, .. } | Self::Chapter { book, .. } => Some(book),
            _ => None,
        }
    }

    #[must_use]
    pub fn chapter_key(&self) -> Option<&str> {
        match self {
            Self::Chapter { chapter, .. } => Some(chapter),
            _ => None,
        }
    }

    /// The location one level up; root stays root.
    #[must_use]
    pub fn parent(&self) -> Self {
        match self {
            Self::Root | Self::Testament(_) => Self::Root,
            Self::Book { testament, .. } => Self::Testament(*testament),
            Self::Chapter {
                testament, book, ..
            } => Self::book(*testament, book.clone()),
        }
    }

    #[must_use]
    pub fn segments(&self) -> Vec<&str> {
        match self {
            Self::Root => Vec::new(),
            Self::Testament(t) => vec![t.as_str()],
            Self::Book { testament, book } => vec![testament.as_str(), book],
            Self::Chapter {
                testament,
                book,
                chapter,
            } => vec![testament.as_str(), book, chapter],
        }
    }
}

/// Renders as an absolute path: `/`, `/NT`, `/NT/1 John`, `/NT/1 John/3`.
impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.segments().join("/"))
    }
}
