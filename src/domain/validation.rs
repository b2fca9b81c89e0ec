//! Arity validation
//!
//! Commands are checked structurally before any store access, so the
//! dispatcher never sees malformed input.

use crate::domain::command::{Command, CommandKind};

/// Banner printed in front of validation errors.
pub const INVALID_COMMAND_BANNER: &str = "Invalid command: ";
/// Hint appended after validation errors.
pub const HELP_HINT: &str = "Use 'help' command to get available commands.";

fn wrong_number_of_args(kind: CommandKind) -> String {
    format!("wrong number of arguments provided for `{}` command", kind)
}

/// Check a command's argument count. An empty result means the command is valid.
pub fn validate(cmd: &Command) -> Vec<String> {
    let n = cmd.args.len();
    let ok = match cmd.kind {
        CommandKind::List | CommandKind::ChangeScope => n == 0,
        CommandKind::Get | CommandKind::Delete => n == 1,
        CommandKind::Set | CommandKind::Append => n >= 2,
        CommandKind::ParseError => return vec!["unable to parse command".to_string()],
        CommandKind::Noop | CommandKind::Help | CommandKind::Quit => true,
    };

    if ok {
        Vec::new()
    } else {
        vec![wrong_number_of_args(cmd.kind)]
    }
}

/// Render validation errors for display: banner, newline-joined messages, hint.
pub fn render_errors(errors: &[String]) -> String {
    format!(
        "{}{}\n{}",
        INVALID_COMMAND_BANNER,
        errors.join("\n"),
        HELP_HINT
    )
}
