//! Terminal rendering of engine results.
//!
//! Every function returns plain lines; styling goes through [`colors`] so
//! `--no-color` and `NO_COLOR` are honored in one place.

use bsh_core::{BookmarkError, Listing, NavError, RandomVerse, ReadEvent, SearchHit, Verse};

/// Color scheme for shell output
pub mod colors {
    use colored::{ColoredString, Colorize};

    /// Section rules such as `── Books ──`
    pub fn rule(s: &str) -> ColoredString {
        s.dimmed()
    }

    /// Navigable entries
    pub fn entry(s: &str) -> ColoredString {
        s.blue()
    }

    /// Verse numbers
    pub fn number(s: &str) -> ColoredString {
        s.yellow()
    }

    /// `Book C:V` references and reading headings
    pub fn reference(s: &str) -> ColoredString {
        s.cyan()
    }

    pub fn success(s: &str) -> ColoredString {
        s.green()
    }

    pub fn error(s: &str) -> ColoredString {
        s.red()
    }

    /// Search matches inside verse text
    pub fn highlight(s: &str) -> ColoredString {
        s.yellow().bold()
    }

    pub fn emphasis(s: &str) -> ColoredString {
        s.bold()
    }
}

/// Turns styling on or off for the whole process.
pub fn set_color(enabled: bool) {
    colored::control::set_override(enabled);
}

fn rule(title: &str) -> String {
    colors::rule(&format!("── {title} ──")).to_string()
}

fn dir_entry(name: &str) -> String {
    colors::entry(&format!("DIR  {name}")).to_string()
}

#[must_use]
pub fn verse_line(verse: &Verse) -> String {
    format!(
        "{}: {}",
        colors::number(&format!("{:>3}", verse.number)),
        verse.text
    )
}

#[must_use]
pub fn read_event(event: &ReadEvent) -> Vec<String> {
    match event {
        ReadEvent::NoBookSelected => {
            vec![colors::error("Error: Select a book first.").to_string()]
        }
        ReadEvent::ChapterList { chapters, .. } => {
            let mut lines = vec![rule("Chapters")];
            lines.extend(chapters.iter().map(|c| dir_entry(c)));
            lines
        }
        ReadEvent::Chapter {
            book,
            chapter,
            verses,
        } => {
            let mut lines = vec![
                String::new(),
                colors::reference(&format!("Reading {book} {chapter}")).to_string(),
            ];
            lines.extend(verses.iter().map(verse_line));
            lines
        }
        ReadEvent::ChapterNotFound(chapter) => {
            vec![colors::error(&format!("Chapter {chapter} not found.")).to_string()]
        }
        ReadEvent::Heading {
            book,
            chapter,
            selector,
        } => vec![
            String::new(),
            colors::reference(&format!("Reading {book} {chapter}:{selector}")).to_string(),
        ],
        ReadEvent::Verse(verse) => vec![verse_line(verse)],
        ReadEvent::EndOfChapter => vec![colors::rule("     (End of chapter)").to_string()],
        ReadEvent::InvalidRange(segment) => {
            vec![colors::error(&format!("Invalid range: {segment}")).to_string()]
        }
        ReadEvent::VerseNotFound(verse) => {
            vec![colors::error(&format!("Verse {verse} not found.")).to_string()]
        }
    }
}

#[must_use]
pub fn listing(listing: &Listing) -> Vec<String> {
    match listing {
        Listing::Testaments(ids) => {
            let mut lines = vec![rule("Bible Root")];
            lines.extend(
                ids.iter()
                    .map(|t| format!("{}  ({})", colors::entry(t.as_str()), t.description())),
            );
            lines
        }
        Listing::Books(names) => {
            let mut lines = vec![rule("Books")];
            lines.extend(names.iter().map(|n| dir_entry(n)));
            lines
        }
        Listing::Chapters(names) => {
            let mut lines = vec![rule("Chapters")];
            lines.extend(names.iter().map(|n| dir_entry(n)));
            lines
        }
        Listing::Verses { chapter, verses } => {
            let mut lines = vec![rule(&format!("Reading {chapter}"))];
            lines.extend(verses.iter().map(verse_line));
            lines
        }
    }
}

/// `[Book C:V] text` with the first match highlighted.
#[must_use]
pub fn search_hit(hit: &SearchHit) -> String {
    let reference = colors::reference(&format!("[{}]", hit.reference()));
    let text = &hit.text;
    let highlighted = match (
        text.get(..hit.highlight.start),
        text.get(hit.highlight.clone()),
        text.get(hit.highlight.end..),
    ) {
        (Some(before), Some(matched), Some(after)) => {
            format!("{before}{}{after}", colors::highlight(matched))
        }
        _ => text.clone(),
    };
    format!("{reference} {highlighted}")
}

#[must_use]
pub fn search_summary(count: usize) -> String {
    match count {
        0 => "No matches.".to_string(),
        1 => colors::rule("Found 1 match.").to_string(),
        n => colors::rule(&format!("Found {n} matches.")).to_string(),
    }
}

#[must_use]
pub fn random_verse(verse: &RandomVerse) -> Vec<String> {
    vec![
        String::new(),
        colors::reference(&format!("[Random] {}", verse.reference())).to_string(),
        colors::emphasis(&verse.text).to_string(),
        String::new(),
    ]
}

#[must_use]
pub fn bookmarks<'a>(marks: impl Iterator<Item = (&'a str, &'a str)>) -> Vec<String> {
    let mut lines = vec![colors::reference("══ Saved Bookmarks ══").to_string()];
    let before = lines.len();
    lines.extend(marks.map(|(name, target)| {
        format!("  {} -> {target}", colors::number(&format!("{name:<10}")))
    }));
    if lines.len() == before {
        lines.push("  (No bookmarks yet)".to_string());
    }
    lines
}

#[must_use]
pub fn nav_error(err: &NavError) -> String {
    let message = match err {
        NavError::NoHistory => "No history.".to_string(),
        NavError::PathElementNotFound(part) => format!("❌ Path element '{part}' not found."),
        NavError::PathNotFound(path) => format!("❌ Path '{path}' not found."),
        NavError::NotFound(name) => format!("❌ '{name}' not found."),
    };
    colors::error(&message).to_string()
}

#[must_use]
pub fn bookmark_error(err: &BookmarkError) -> String {
    let message = match err {
        BookmarkError::Unknown(name) => format!("Bookmark '{name}' not found."),
        BookmarkError::Stale { name, target } => {
            format!("Bookmark '{name}' points to {target}, which no longer exists.")
        }
        BookmarkError::Persist(e) => format!("Could not save bookmarks: {e}"),
    };
    colors::error(&message).to_string()
}

#[must_use]
pub fn banner() -> Vec<String> {
    vec![
        colors::reference("╔══════════════════════════════════════╗").to_string(),
        colors::reference("║            BIBLE SHELL (bsh)         ║").to_string(),
        colors::reference("╚══════════════════════════════════════╝").to_string(),
        format!(
            "{} {} {}",
            colors::rule("Type"),
            colors::success("help"),
            colors::rule("to see all commands.")
        ),
        format!(
            "{} {} {}",
            colors::rule("Type"),
            colors::success("manna"),
            colors::rule("for a random verse.")
        ),
        String::new(),
    ]
}

/// Expands `{cwd}` and the color placeholders of a prompt template. With
/// color off the color placeholders expand to nothing.
#[must_use]
pub fn prompt(template: &str, cwd: &str, color: bool) -> String {
    const CODES: [(&str, &str); 7] = [
        ("{red}", "\x1b[31m"),
        ("{green}", "\x1b[32m"),
        ("{blue}", "\x1b[34m"),
        ("{yellow}", "\x1b[33m"),
        ("{cyan}", "\x1b[36m"),
        ("{bold}", "\x1b[1m"),
        ("{reset}", "\x1b[0m"),
    ];
    let mut out = template.replace("{cwd}", cwd);
    for (placeholder, code) in CODES {
        out = out.replace(placeholder, if color { code } else { "" });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use bsh_core::TestamentId;

    #[test]
    fn prompt_placeholders() {
        assert_eq!(prompt("{cwd} $ ", "/NT/John", false), "/NT/John $ ");
        assert_eq!(prompt("{green}{cwd}{reset}", "/", false), "/");
        assert_eq!(
            prompt("{green}{cwd}{reset}", "/", true),
            "\x1b[32m/\x1b[0m"
        );
    }

    #[test]
    fn root_listing_names_both_testaments() {
        set_color(false);
        let lines = listing(&Listing::Testaments(TestamentId::ALL.to_vec()));
        assert_eq!(
            lines,
            vec![
                "── Bible Root ──".to_string(),
                "OT  (Old Testament)".to_string(),
                "NT  (New Testament)".to_string(),
            ]
        );
    }

    #[test]
    fn verse_numbers_are_right_aligned() {
        set_color(false);
        let verse = Verse {
            number: "7".into(),
            text: "Ask, and it shall be given you".into(),
        };
        assert_eq!(verse_line(&verse), "  7: Ask, and it shall be given you");
    }

    #[test]
    fn empty_bookmark_list() {
        set_color(false);
        assert_eq!(
            bookmarks(std::iter::empty()),
            vec!["══ Saved Bookmarks ══", "  (No bookmarks yet)"]
        );
    }

    #[test]
    fn search_summary_counts() {
        set_color(false);
        assert_eq!(search_summary(0), "No matches.");
        assert_eq!(search_summary(3), "Found 3 matches.");
    }
}
