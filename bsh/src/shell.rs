//! Shell state and execution engine

use crate::builtins;
use crate::error::ShResult;
use crate::render::colors;
use bsh_core::{Bookmarks, Corpus, Engine};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::Write;
use std::path::Path;

/// Signature shared by every builtin: the shell, the raw argument text and
/// the output context. Returns the exit code.
pub type BuiltinFn = fn(&mut Shell, &str, &mut ExecContext) -> ShResult<i32>;

/// Exit code for a command name that is not a builtin.
pub const EXIT_NOT_FOUND: i32 = 127;

/// Loads the corpus at `path`, or the sample compiled into the binary when
/// no file was given.
pub fn load_corpus(path: Option<&Path>) -> ShResult<Corpus> {
    let corpus = match path {
        Some(path) => {
            let corpus = Corpus::from_file(path)?;
            tracing::info!(path = %path.display(), "corpus loaded");
            corpus
        }
        None => {
            let corpus = Corpus::bundled()?;
            tracing::info!("no corpus file configured, using the bundled sample");
            corpus
        }
    };
    Ok(corpus)
}

pub enum Output {
    Stdout,
    Stderr,
    Buffer(Vec<u8>),
}

impl Output {
    pub fn write(&mut self, data: &[u8]) -> std::io::Result<()> {
        match self {
            Output::Stdout => {
                let mut out = std::io::stdout();
                out.write_all(data)?;
                out.flush()
            }
            Output::Stderr => std::io::stderr().write_all(data),
            Output::Buffer(buf) => {
                buf.extend_from_slice(data);
                Ok(())
            }
        }
    }

    pub fn writeln(&mut self, s: &str) -> std::io::Result<()> {
        self.write(s.as_bytes())?;
        self.write(b"\n")
    }

    fn take_string(&mut self) -> String {
        match self {
            Output::Buffer(buf) => String::from_utf8_lossy(&std::mem::take(buf)).into_owned(),
            Output::Stdout | Output::Stderr => String::new(),
        }
    }
}

pub struct ExecContext {
    pub stdout: Output,
    pub stderr: Output,
}

impl Default for ExecContext {
    fn default() -> Self {
        Self {
            stdout: Output::Stdout,
            stderr: Output::Stderr,
        }
    }
}

impl ExecContext {
    /// Both streams go to in-memory buffers.
    #[must_use]
    pub fn captured() -> Self {
        Self {
            stdout: Output::Buffer(Vec::new()),
            stderr: Output::Buffer(Vec::new()),
        }
    }

    pub fn write_lines<I, S>(&mut self, lines: I) -> std::io::Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            self.stdout.writeln(line.as_ref())?;
        }
        Ok(())
    }

    pub fn write_err(&mut self, msg: &str) {
        let _ = self.stderr.writeln(msg);
    }
}

/// Result of [`Shell::execute_captured`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

pub struct ShellBuilder {
    corpus: Corpus,
    bookmarks: Bookmarks,
    seed: Option<u64>,
}

impl ShellBuilder {
    #[must_use]
    pub fn new(corpus: Corpus) -> Self {
        Self {
            corpus,
            bookmarks: Bookmarks::in_memory(),
            seed: None,
        }
    }

    #[must_use]
    pub fn bookmarks(mut self, bookmarks: Bookmarks) -> Self {
        self.bookmarks = bookmarks;
        self
    }

    /// Makes `manna` reproducible.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn build(self) -> Shell {
        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Shell {
            engine: Engine::new(self.corpus, self.bookmarks),
            rng,
            last_exit_code: 0,
        }
    }
}

pub struct Shell {
    pub engine: Engine,
    pub rng: StdRng,
    pub last_exit_code: i32,
}

impl Shell {
    #[must_use]
    pub fn new(corpus: Corpus, bookmarks: Bookmarks) -> Self {
        ShellBuilder::new(corpus).bookmarks(bookmarks).build()
    }

    /// Current location as shown in the prompt.
    #[must_use]
    pub fn cwd(&self) -> String {
        self.engine.path_string()
    }

    /// Execute input, one command per line, writing to the terminal.
    pub fn execute(&mut self, input: &str) -> ShResult<i32> {
        let mut ctx = ExecContext::default();
        self.execute_with(input, &mut ctx)
    }

    /// Like [`Shell::execute`] but collects everything that would have been
    /// printed.
    pub fn execute_captured(&mut self, input: &str) -> ShResult<CapturedOutput> {
        let mut ctx = ExecContext::captured();
        let exit_code = self.execute_with(input, &mut ctx)?;
        Ok(CapturedOutput {
            stdout: ctx.stdout.take_string(),
            stderr: ctx.stderr.take_string(),
            exit_code,
        })
    }

    pub fn execute_with(&mut self, input: &str, ctx: &mut ExecContext) -> ShResult<i32> {
        let mut last_exit = 0;
        for line in input.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            last_exit = self.execute_line(line, ctx)?;
            self.last_exit_code = last_exit;
        }
        Ok(last_exit)
    }

    fn execute_line(&mut self, line: &str, ctx: &mut ExecContext) -> ShResult<i32> {
        let (name, args) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(name, args)| (name, args.trim()));
        let command = name.to_lowercase();
        tracing::debug!(command = %command, args = %args, "dispatch");

        if let Some(run) = builtins::lookup(&command) {
            return run(self, args, ctx);
        }
        // A bare reference such as `3:16` or `16-18` is a read.
        if line.starts_with(|c: char| c.is_ascii_digit()) {
            return builtins::cmd_cat(self, line, ctx);
        }
        ctx.write_err(&colors::error(&format!("Command '{name}' not found.")).to_string());
        Ok(EXIT_NOT_FOUND)
    }
}
