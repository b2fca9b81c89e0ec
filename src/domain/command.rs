//! Command model and classifier
//!
//! Turns a raw token stream (argv or one REPL line) into a [`Command`].
//! Classification is total: every input yields exactly one command, unknown
//! command words become [`CommandKind::ParseError`].

use std::collections::BTreeSet;
use std::fmt;

/// Selects system scope.
pub const SYSTEM_FLAG: &str = "-s";
/// Forces interactive mode.
pub const INTERACTIVE_FLAG: &str = "-i";
/// Makes `append` compute its value without writing it.
pub const DRY_RUN_FLAG: &str = "-t";

/// Variable scope a command operates on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Scope {
    #[default]
    User,
    System,
}

impl Scope {
    /// The other scope (what `cd` switches to).
    pub fn toggled(self) -> Self {
        match self {
            Scope::User => Scope::System,
            Scope::System => Scope::User,
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::User => f.write_str("User"),
            Scope::System => f.write_str("System"),
        }
    }
}

/// What a command asks the interpreter to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Noop,
    Help,
    ParseError,
    ChangeScope,
    List,
    Get,
    Set,
    Delete,
    Append,
    Quit,
}

impl CommandKind {
    /// Map a command word to its kind. Missing or unknown words are parse errors.
    pub fn from_word(word: Option<&str>) -> Self {
        match word {
            Some("cd") => CommandKind::ChangeScope,
            Some("ls") => CommandKind::List,
            Some("get") => CommandKind::Get,
            Some("set") => CommandKind::Set,
            Some("append") => CommandKind::Append,
            Some("rm") => CommandKind::Delete,
            Some("q") | Some("quit") => CommandKind::Quit,
            Some("h") | Some("help") => CommandKind::Help,
            _ => CommandKind::ParseError,
        }
    }

    /// Canonical command word, used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            CommandKind::ChangeScope => "cd",
            CommandKind::List => "ls",
            CommandKind::Get => "get",
            CommandKind::Set => "set",
            CommandKind::Append => "append",
            CommandKind::Delete => "rm",
            CommandKind::Quit => "q",
            CommandKind::Help => "help",
            CommandKind::Noop | CommandKind::ParseError => "noop",
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A classified command, built fresh from each input and discarded after dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub kind: CommandKind,
    pub scope: Scope,
    /// Positional arguments after the command word
    pub args: Vec<String>,
    /// Raw flag tokens (anything starting with `-`)
    pub flags: BTreeSet<String>,
}

impl Command {
    /// The command a REPL session starts with.
    pub fn noop(scope: Scope) -> Self {
        Self {
            kind: CommandKind::Noop,
            scope,
            args: Vec::new(),
            flags: BTreeSet::new(),
        }
    }

    pub fn has_flag(&self, flag: &str) -> bool {
        self.flags.contains(flag)
    }

    /// True when `-t` was given.
    pub fn is_dry_run(&self) -> bool {
        self.has_flag(DRY_RUN_FLAG)
    }
}

/// Classify a token stream into a [`Command`].
///
/// Tokens starting with `-` are flags; the rest keep their relative order. The
/// first non-flag token is the command word, the remainder are positional
/// arguments. `-s` among the flags selects [`Scope::System`].
pub fn classify<I, S>(tokens: I) -> Command
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut flags = BTreeSet::new();
    let mut clean = Vec::new();
    for token in tokens {
        let token = token.as_ref();
        if token.starts_with('-') {
            flags.insert(token.to_string());
        } else {
            clean.push(token.to_string());
        }
    }

    let scope = if flags.contains(SYSTEM_FLAG) {
        Scope::System
    } else {
        Scope::User
    };

    let mut clean = clean.into_iter();
    let kind = CommandKind::from_word(clean.next().as_deref());

    Command {
        kind,
        scope,
        args: clean.collect(),
        flags,
    }
}
