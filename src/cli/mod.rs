//! CLI layer: argument parsing, terminal I/O and command dispatch

pub mod args;
pub mod commands;
pub mod error;
pub mod output;
pub mod terminal;

pub use args::Cli;
pub use error::{CliError, CliResult};
pub use terminal::ConsoleTerminal;
