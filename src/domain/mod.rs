//! Domain layer: command model, classifier and validator
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod command;
pub mod help;
pub mod validation;

pub use command::{
    classify, Command, CommandKind, Scope, DRY_RUN_FLAG, INTERACTIVE_FLAG, SYSTEM_FLAG,
};
pub use help::HELP_TEXT;
pub use validation::{render_errors, validate};

/// Expand `~` and `$VAR` / `${VAR}` in a path-like string.
///
/// Returns the input unchanged if expansion fails.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}
