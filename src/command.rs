//! Chat command parsing
//!
//! A chat line becomes a command when it starts with the configured prefix.
//! Command names are case-insensitive; everything after the name is the argument.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(String),
    Current,
    Lock,
    Results,
    Reset,
    Remove(String),
    MaxVoteCount(String),
    Help,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command '{0}'. Try {1}commands.")]
    Unknown(String, String),
    #[error("Usage: {0}")]
    Usage(String),
}

impl CommandError {
    pub fn code(&self) -> &'static str {
        match self {
            CommandError::Unknown(..) => "UNKNOWN_COMMAND",
            CommandError::Usage(_) => "USAGE",
        }
    }
}

/// Catalogue entry used for help output and usage errors
#[derive(Debug, Clone, Copy)]
pub struct CommandInfo {
    pub usage: &'static str,
    pub description: &'static str,
}

pub const CATALOGUE: &[CommandInfo] = &[
    CommandInfo {
        usage: "add <movie>, <movie>, ...",
        description: "Adds one or more comma-separated movies to the list.",
    },
    CommandInfo {
        usage: "current",
        description: "Shows the current list of movies.",
    },
    CommandInfo {
        usage: "remove <movie>",
        description: "Removes a movie from the list.",
    },
    CommandInfo {
        usage: "maxvotecount <number>",
        description: "Sets how many movies each person may vote for.",
    },
    CommandInfo {
        usage: "lock",
        description: "Locks the movie list and starts voting.",
    },
    CommandInfo {
        usage: "results",
        description: "Shows the current vote tally.",
    },
    CommandInfo {
        usage: "reset",
        description: "Resets the voting poll.",
    },
    CommandInfo {
        usage: "commands",
        description: "Shows this list.",
    },
];

fn usage(prefix: &str, name: &str) -> CommandError {
    let info = CATALOGUE
        .iter()
        .find(|c| c.usage.split_whitespace().next() == Some(name));
    match info {
        Some(info) => CommandError::Usage(format!("{}{}", prefix, info.usage)),
        None => CommandError::Usage(format!("{}{}", prefix, name)),
    }
}

fn required(prefix: &str, name: &str, arg: &str) -> Result<String, CommandError> {
    if arg.is_empty() {
        Err(usage(prefix, name))
    } else {
        Ok(arg.to_string())
    }
}

/// Parse a chat line. Returns `None` for lines that are not commands.
pub fn parse(line: &str, prefix: &str) -> Option<Result<Command, CommandError>> {
    let body = line.trim_start().strip_prefix(prefix)?;
    let body = body.trim();
    if body.is_empty() {
        return None;
    }

    let (name, arg) = match body.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (body, ""),
    };
    let name = name.to_lowercase();

    let command = match name.as_str() {
        "add" => required(prefix, "add", arg).map(Command::Add),
        "current" => Ok(Command::Current),
        "lock" => Ok(Command::Lock),
        "results" => Ok(Command::Results),
        "reset" => Ok(Command::Reset),
        "remove" => required(prefix, "remove", arg).map(Command::Remove),
        "maxvotecount" => required(prefix, "maxvotecount", arg).map(Command::MaxVoteCount),
        "help" | "commands" => Ok(Command::Help),
        _ => Err(CommandError::Unknown(name, prefix.to_string())),
    };
    Some(command)
}
