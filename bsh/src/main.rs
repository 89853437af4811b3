use bsh::completer::{BshHelper, Candidates};
use bsh::{load_corpus, render, ShError, ShResult, Shell};
use bsh_config::{BshConfig, LogFormat};
use bsh_core::{sorted_keys, Bookmarks, Corpus, TestamentId};
use clap::Parser;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

/// bsh - walk the Bible like a filesystem
#[derive(Parser, Debug)]
#[command(name = "bsh", version, about)]
struct Args {
    /// Corpus JSON file (defaults to the bundled sample)
    #[arg(long, env = "BSH_CORPUS")]
    corpus: Option<PathBuf>,

    /// Bookmark store
    #[arg(long, env = "BSH_BOOKMARKS")]
    bookmarks: Option<PathBuf>,

    /// Config file (overrides the search path)
    #[arg(long)]
    config: Option<String>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,

    /// Execute command(s) and exit
    #[arg(short = 'c')]
    command: Option<String>,

    /// Command to run once, e.g. `bsh cat john 3:16`
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    words: Vec<String>,
}

fn main() {
    let args = Args::parse();

    let config = match load_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("bsh: {e}");
            std::process::exit(1);
        }
    };
    init_logging(&config, args.debug);

    let color = config.shell.color && !args.no_color;
    render::set_color(color);

    let corpus_path = args
        .corpus
        .or_else(|| config.corpus.path.as_deref().map(bsh_config::expand_path));
    let corpus = match load_corpus(corpus_path.as_deref()) {
        Ok(corpus) => corpus,
        Err(e) => {
            eprintln!("{}", render::colors::error(&format!("CRITICAL: {e}")));
            std::process::exit(1);
        }
    };

    let bookmarks_path = args
        .bookmarks
        .unwrap_or_else(|| bsh_config::expand_path(&config.shell.bookmarks_file));
    let mut shell = Shell::new(corpus, Bookmarks::load(bookmarks_path));

    let one_shot = args
        .command
        .or_else(|| (!args.words.is_empty()).then(|| args.words.join(" ")));

    let code = match one_shot {
        Some(command) => run_once(&mut shell, &command),
        None => match run_repl(&mut shell, &config, color) {
            Ok(code) => code,
            Err(e) => {
                eprintln!("bsh: {e}");
                1
            }
        },
    };
    std::process::exit(code);
}

fn load_config(explicit: Option<&str>) -> ShResult<BshConfig> {
    let config = match explicit {
        Some(path) => bsh_config::load_from_file(path)?,
        None => bsh_config::load()?,
    };
    Ok(config)
}

fn init_logging(config: &BshConfig, debug: bool) {
    let level = if debug {
        "debug"
    } else {
        config.logging.level.as_str()
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match config.logging.format {
        LogFormat::Pretty => builder.pretty().init(),
        LogFormat::Compact => builder.compact().init(),
    }
}

fn run_once(shell: &mut Shell, command: &str) -> i32 {
    match shell.execute(command) {
        Ok(code) | Err(ShError::Exit(code)) => code,
        Err(e) => {
            eprintln!("bsh: {e}");
            1
        }
    }
}

fn run_repl(shell: &mut Shell, config: &BshConfig, color: bool) -> ShResult<i32> {
    use rustyline::error::ReadlineError;
    use rustyline::{CompletionType, Config, Editor};

    let history = &config.shell.history;
    let rl_config = Config::builder()
        .completion_type(CompletionType::List)
        .max_history_size(history.max_entries)
        .map_err(readline_error)?
        .history_ignore_dups(true)
        .map_err(readline_error)?
        .history_ignore_space(true)
        .build();

    let candidates = Arc::new(RwLock::new(Candidates {
        entries: Vec::new(),
        books: book_names(shell.engine.corpus()),
    }));

    let mut rl = Editor::with_config(rl_config).map_err(readline_error)?;
    rl.set_helper(Some(BshHelper::new(candidates.clone())));

    let history_path = history
        .enabled
        .then(|| bsh_config::expand_path(&history.file));
    if let Some(path) = &history_path {
        if let Err(e) = rl.load_history(path) {
            tracing::debug!(path = %path.display(), error = %e, "no history loaded");
        }
    }

    for line in render::banner() {
        println!("{line}");
    }

    let mut exit_code = 0;
    loop {
        if let Ok(mut guard) = candidates.write() {
            guard.entries = shell.engine.list().entry_names();
        }

        let prompt = render::prompt(&config.shell.prompt, &shell.cwd(), color);
        match rl.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                if history_path.is_some() {
                    let _ = rl.add_history_entry(line);
                }

                match shell.execute(line) {
                    Ok(code) => exit_code = code,
                    Err(ShError::Exit(code)) => {
                        exit_code = code;
                        break;
                    }
                    Err(e) => {
                        eprintln!("bsh: {e}");
                        exit_code = 1;
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
            }
            Err(ReadlineError::Eof) => {
                println!("exit");
                break;
            }
            Err(err) => {
                eprintln!("Error: {err:?}");
                break;
            }
        }
    }

    if let Some(path) = &history_path {
        if let Err(e) = rl.save_history(path) {
            tracing::warn!(path = %path.display(), error = %e, "failed to save history");
        }
    }

    Ok(exit_code)
}

fn book_names(corpus: &Corpus) -> Vec<String> {
    TestamentId::ALL
        .into_iter()
        .flat_map(|t| sorted_keys(corpus.testament(t)))
        .map(str::to_string)
        .collect()
}

fn readline_error(e: rustyline::error::ReadlineError) -> ShError {
    ShError::Io(std::io::Error::other(e.to_string()))
}
