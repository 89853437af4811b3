use crate::builtins;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};
use std::borrow::Cow;
use std::sync::{Arc, RwLock};

/// Names offered after the command word: the children of the current
/// location and every book name (for teleports and quick reads).
#[derive(Debug, Default, Clone)]
pub struct Candidates {
    pub entries: Vec<String>,
    pub books: Vec<String>,
}

pub struct BshHelper {
    pub candidates: Arc<RwLock<Candidates>>,
}

impl BshHelper {
    pub fn new(candidates: Arc<RwLock<Candidates>>) -> Self {
        Self { candidates }
    }
}

impl Completer for BshHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line_to_cursor = &line[..pos];
        let (start, word) = find_word_start(line_to_cursor);
        let is_first_word = line_to_cursor[..start].trim().is_empty();

        if is_first_word {
            if word.is_empty() {
                return Ok((pos, vec![]));
            }
            let lower = word.to_lowercase();
            let completions = builtins::command_names()
                .filter(|name| name.starts_with(&lower))
                .map(|name| Pair {
                    display: name.to_string(),
                    replacement: name.to_string(),
                })
                .collect();
            return Ok((start, completions));
        }

        let candidates = match self.candidates.read() {
            Ok(guard) => guard.clone(),
            Err(_) => return Ok((pos, vec![])),
        };
        Ok((start, complete_name(&candidates, word)))
    }
}

/// Case-insensitive prefix completion. Entries of the current location come
/// first; book names follow without duplicates.
fn complete_name(candidates: &Candidates, word: &str) -> Vec<Pair> {
    let lower = word.to_lowercase();
    let mut seen = std::collections::HashSet::new();
    candidates
        .entries
        .iter()
        .chain(candidates.books.iter())
        .filter(|name| name.to_lowercase().starts_with(&lower))
        .filter(|name| seen.insert(name.as_str()))
        .map(|name| Pair {
            display: name.clone(),
            replacement: name.clone(),
        })
        .collect()
}

fn find_word_start(line: &str) -> (usize, &str) {
    let mut start = line.len();
    for (i, c) in line.char_indices().rev() {
        if c.is_whitespace() || c == '+' || c == '/' {
            break;
        }
        start = i;
    }
    (start, &line[start..])
}

impl Hinter for BshHelper {
    type Hint = String;

    fn hint(&self, _line: &str, _pos: usize, _ctx: &Context<'_>) -> Option<String> {
        None
    }
}

impl Highlighter for BshHelper {
    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Borrowed(hint)
    }
}

impl Validator for BshHelper {}

impl Helper for BshHelper {}
