//! Built-in commands

use crate::error::{ShError, ShResult};
use crate::help;
use crate::render::{self, colors};
use crate::shell::{BuiltinFn, ExecContext, Shell};

pub struct Builtin {
    pub names: &'static [&'static str],
    pub run: BuiltinFn,
}

pub const BUILTINS: &[Builtin] = &[
    Builtin { names: &["cd"], run: cmd_cd },
    Builtin { names: &["ls", "ll"], run: cmd_ls },
    Builtin { names: &["pwd"], run: cmd_pwd },
    Builtin { names: &["cat", "read"], run: cmd_cat },
    Builtin { names: &["grep", "search"], run: cmd_grep },
    Builtin { names: &["mark"], run: cmd_mark },
    Builtin { names: &["goto", "jump"], run: cmd_goto },
    Builtin { names: &["marks"], run: cmd_marks },
    Builtin { names: &["manna", "random"], run: cmd_manna },
    Builtin { names: &["help"], run: cmd_help },
    Builtin { names: &["clear", "cls"], run: cmd_clear },
    Builtin { names: &["exit", "quit"], run: cmd_exit },
];

pub fn lookup(name: &str) -> Option<BuiltinFn> {
    BUILTINS
        .iter()
        .find(|b| b.names.contains(&name))
        .map(|b| b.run)
}

/// Every command name and alias, for completion.
pub fn command_names() -> impl Iterator<Item = &'static str> {
    BUILTINS.iter().flat_map(|b| b.names.iter().copied())
}

/// Prints per-command help when `args` asks for it.
fn maybe_help(name: &str, args: &str, ctx: &mut ExecContext) -> ShResult<bool> {
    if !help::wants_help(args) {
        return Ok(false);
    }
    if let Some(cmd) = help::get_help(name) {
        ctx.stdout.write(help::format_help(cmd).as_bytes())?;
    }
    Ok(true)
}

fn usage(ctx: &mut ExecContext, usage: &str) -> i32 {
    ctx.write_err(&format!("Usage: {usage}"));
    2
}

pub(crate) fn cmd_cd(shell: &mut Shell, args: &str, ctx: &mut ExecContext) -> ShResult<i32> {
    if maybe_help("cd", args, ctx)? {
        return Ok(0);
    }
    match shell.engine.change_directory(args) {
        Ok(()) => Ok(0),
        Err(e) => {
            tracing::debug!(arg = %args, error = %e, "cd failed");
            ctx.write_err(&render::nav_error(&e));
            Ok(1)
        }
    }
}

pub(crate) fn cmd_ls(shell: &mut Shell, args: &str, ctx: &mut ExecContext) -> ShResult<i32> {
    if maybe_help("ls", args, ctx)? {
        return Ok(0);
    }
    ctx.write_lines(render::listing(&shell.engine.list()))?;
    Ok(0)
}

pub(crate) fn cmd_pwd(shell: &mut Shell, _args: &str, ctx: &mut ExecContext) -> ShResult<i32> {
    ctx.stdout.writeln(&shell.cwd())?;
    Ok(0)
}

/// Reads references. Problems with individual references are reported
/// inline and do not change the exit code, so `cat a + b` still shows `b`
/// when `a` is bad.
pub(crate) fn cmd_cat(shell: &mut Shell, args: &str, ctx: &mut ExecContext) -> ShResult<i32> {
    if maybe_help("cat", args, ctx)? {
        return Ok(0);
    }
    let events = shell.engine.read(args);
    for event in &events {
        ctx.write_lines(render::read_event(event))?;
    }
    Ok(0)
}

pub(crate) fn cmd_grep(shell: &mut Shell, args: &str, ctx: &mut ExecContext) -> ShResult<i32> {
    if maybe_help("grep", args, ctx)? {
        return Ok(0);
    }
    let query = bsh_core::search::normalize_query(args);
    if query.trim().is_empty() {
        return Ok(usage(ctx, "grep <word>"));
    }
    ctx.stdout
        .writeln(&colors::rule(&format!("Searching for '{query}'...")).to_string())?;
    let hits = shell.engine.search(args);
    for hit in &hits {
        ctx.stdout.writeln(&render::search_hit(hit))?;
    }
    ctx.stdout.writeln(&render::search_summary(hits.len()))?;
    Ok(if hits.is_empty() { 1 } else { 0 })
}

pub(crate) fn cmd_mark(shell: &mut Shell, args: &str, ctx: &mut ExecContext) -> ShResult<i32> {
    if maybe_help("mark", args, ctx)? {
        return Ok(0);
    }
    let name = args.trim();
    if name.is_empty() {
        return Ok(usage(ctx, "mark <name>"));
    }
    match shell.engine.mark(name) {
        Ok(target) => {
            ctx.stdout
                .writeln(&colors::success(&format!("Marked '{name}' at {target}")).to_string())?;
            Ok(0)
        }
        Err(e) => {
            tracing::warn!(bookmark = %name, error = %e, "failed to save bookmark");
            ctx.write_err(&render::bookmark_error(&e));
            Ok(1)
        }
    }
}

pub(crate) fn cmd_goto(shell: &mut Shell, args: &str, ctx: &mut ExecContext) -> ShResult<i32> {
    if maybe_help("goto", args, ctx)? {
        return Ok(0);
    }
    let name = args.trim();
    if name.is_empty() {
        return Ok(usage(ctx, "goto <name>"));
    }
    match shell.engine.goto(name) {
        Ok(()) => Ok(0),
        Err(e) => {
            ctx.write_err(&render::bookmark_error(&e));
            Ok(1)
        }
    }
}

pub(crate) fn cmd_marks(shell: &mut Shell, _args: &str, ctx: &mut ExecContext) -> ShResult<i32> {
    ctx.write_lines(render::bookmarks(shell.engine.bookmarks().iter()))?;
    Ok(0)
}

pub(crate) fn cmd_manna(shell: &mut Shell, _args: &str, ctx: &mut ExecContext) -> ShResult<i32> {
    match shell.engine.random_verse(&mut shell.rng) {
        Some(verse) => {
            ctx.write_lines(render::random_verse(&verse))?;
            Ok(0)
        }
        None => {
            ctx.write_err(&colors::error("The corpus has no verses.").to_string());
            Ok(1)
        }
    }
}

pub(crate) fn cmd_help(_shell: &mut Shell, args: &str, ctx: &mut ExecContext) -> ShResult<i32> {
    let Some(topic) = args.split_whitespace().next() else {
        ctx.stdout.write(help::format_help_list().as_bytes())?;
        return Ok(0);
    };
    match help::get_help(&topic.to_lowercase()) {
        Some(cmd) => {
            ctx.stdout.write(help::format_help(cmd).as_bytes())?;
            Ok(0)
        }
        None => {
            ctx.write_err(&format!("help: no help for '{topic}'"));
            Ok(1)
        }
    }
}

pub(crate) fn cmd_clear(_shell: &mut Shell, _args: &str, ctx: &mut ExecContext) -> ShResult<i32> {
    ctx.stdout.write(b"\x1b[H\x1b[2J")?;
    Ok(0)
}

pub(crate) fn cmd_exit(shell: &mut Shell, args: &str, _ctx: &mut ExecContext) -> ShResult<i32> {
    let code = match args.split_whitespace().next() {
        None => shell.last_exit_code,
        Some(arg) => arg
            .parse()
            .map_err(|_| ShError::InvalidArgument(format!("exit: {arg}: numeric argument required")))?,
    };
    Err(ShError::Exit(code))
}
