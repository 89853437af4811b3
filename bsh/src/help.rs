use crate::render::colors;

pub struct CommandHelp {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub section: &'static str,
    pub summary: &'static str,
    pub usage: &'static str,
    pub examples: &'static [(&'static str, &'static str)],
}

/// Manual sections in display order.
pub const SECTIONS: &[&str] = &["NAVIGATION", "READING", "MEMORY", "TOOLS"];

pub const COMMANDS: &[CommandHelp] = &[
    CommandHelp {
        name: "cd",
        aliases: &[],
        section: "NAVIGATION",
        summary: "Move to a testament, book or chapter",
        usage: "cd [BOOK | CHAPTER | .. | - | /PATH]",
        examples: &[
            ("cd rom", "Teleport to a book by prefix"),
            ("cd 1 cor", "Book names may contain spaces"),
            ("cd 1", "Enter chapter 1 of the current book"),
            ("cd ..", "Go back one level"),
            ("cd -", "Jump to the previous location (undo)"),
            ("cd /NT/John/3", "Absolute path"),
        ],
    },
    CommandHelp {
        name: "ls",
        aliases: &["ll"],
        section: "NAVIGATION",
        summary: "List what is inside the current location",
        usage: "ls",
        examples: &[],
    },
    CommandHelp {
        name: "pwd",
        aliases: &[],
        section: "NAVIGATION",
        summary: "Print the current location",
        usage: "pwd",
        examples: &[],
    },
    CommandHelp {
        name: "cat",
        aliases: &["read"],
        section: "READING",
        summary: "Read chapters and verses",
        usage: "cat [BOOK] [CHAPTER][:VERSES] [+ REFERENCE]...",
        examples: &[
            ("cat 3:16", "Read a verse of the current book"),
            ("cat 16-18, 20", "Ranges and lists inside a chapter"),
            ("cat john 3:16", "Quick read; moves to the book"),
            ("cat gen 1:1 + john 1:1", "Several references at once"),
            ("3:16", "A line starting with a digit is read as well"),
        ],
    },
    CommandHelp {
        name: "mark",
        aliases: &[],
        section: "MEMORY",
        summary: "Save the current location under a name",
        usage: "mark NAME",
        examples: &[],
    },
    CommandHelp {
        name: "goto",
        aliases: &["jump"],
        section: "MEMORY",
        summary: "Jump to a saved location",
        usage: "goto NAME",
        examples: &[],
    },
    CommandHelp {
        name: "marks",
        aliases: &[],
        section: "MEMORY",
        summary: "List all bookmarks",
        usage: "marks",
        examples: &[],
    },
    CommandHelp {
        name: "grep",
        aliases: &["search"],
        section: "TOOLS",
        summary: "Search verse text below the current location",
        usage: "grep WORDS",
        examples: &[("grep \"living water\"", "Quotes are ignored")],
    },
    CommandHelp {
        name: "manna",
        aliases: &["random"],
        section: "TOOLS",
        summary: "Show a random verse",
        usage: "manna",
        examples: &[],
    },
    CommandHelp {
        name: "help",
        aliases: &[],
        section: "TOOLS",
        summary: "Show this manual or help for one command",
        usage: "help [COMMAND]",
        examples: &[],
    },
    CommandHelp {
        name: "clear",
        aliases: &["cls"],
        section: "TOOLS",
        summary: "Clear the screen",
        usage: "clear",
        examples: &[],
    },
    CommandHelp {
        name: "exit",
        aliases: &["quit"],
        section: "TOOLS",
        summary: "Quit the shell",
        usage: "exit [CODE]",
        examples: &[],
    },
];

pub fn get_help(name: &str) -> Option<&'static CommandHelp> {
    COMMANDS
        .iter()
        .find(|c| c.name == name || c.aliases.contains(&name))
}

pub fn format_help(cmd: &CommandHelp) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} - {}\n\n", cmd.name, cmd.summary));
    out.push_str(&format!("Usage: {}\n", cmd.usage));
    if !cmd.aliases.is_empty() {
        out.push_str(&format!("Aliases: {}\n", cmd.aliases.join(", ")));
    }
    if !cmd.examples.is_empty() {
        out.push_str("\nExamples:\n");
        for (example, desc) in cmd.examples {
            out.push_str(&format!("  {example:24} {desc}\n"));
        }
    }
    out
}

pub fn format_help_list() -> String {
    let mut out = String::new();
    out.push('\n');
    out.push_str(&format!(
        "{}\n",
        colors::reference("═══ BIBLE SHELL MANUAL ═══")
    ));

    for section in SECTIONS {
        out.push_str(&format!("\n{}\n", colors::entry(&format!("[ {section} ]"))));
        for cmd in COMMANDS.iter().filter(|c| c.section == *section) {
            out.push_str(&format!(
                "  {} {}\n",
                colors::success(&format!("{:16}", cmd.usage_head())),
                cmd.summary
            ));
        }
    }

    out.push_str("\nUse 'help COMMAND' or 'COMMAND --help' for more information.\n");
    out
}

impl CommandHelp {
    /// Usage line without its optional tail, e.g. `goto NAME`.
    fn usage_head(&self) -> &'static str {
        self.usage
            .split_once(" [")
            .map_or(self.usage, |(head, _)| head)
    }
}

pub fn wants_help(args: &str) -> bool {
    args.split_whitespace().any(|a| a == "--help" || a == "-h")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_resolve_to_their_command() {
        assert_eq!(get_help("read").map(|c| c.name), Some("cat"));
        assert_eq!(get_help("jump").map(|c| c.name), Some("goto"));
        assert!(get_help("rm").is_none());
    }

    #[test]
    fn every_section_has_commands() {
        for section in SECTIONS {
            assert!(COMMANDS.iter().any(|c| c.section == *section), "{section}");
        }
        assert!(COMMANDS.iter().all(|c| SECTIONS.contains(&c.section)));
    }

    #[test]
    fn manual_lists_every_command() {
        crate::render::set_color(false);
        let manual = format_help_list();
        for cmd in COMMANDS {
            assert!(manual.contains(cmd.summary), "{}", cmd.name);
        }
        assert!(manual.contains("[ NAVIGATION ]"));
    }

    #[test]
    fn help_flag_detection() {
        assert!(wants_help("--help"));
        assert!(wants_help("john -h"));
        assert!(!wants_help("john 3:16"));
    }
}
