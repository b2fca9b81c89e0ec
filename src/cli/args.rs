//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueHint};

use crate::domain::{DRY_RUN_FLAG, SYSTEM_FLAG};

/// Scoped environment variable editor: one-shot commands or an interactive REPL
#[derive(Parser, Debug)]
#[command(name = "envedit")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Commands: ls, get NAME, set NAME VALUE..., append NAME VALUE..., rm NAME, help.\n\
Run without a command (or with only -i) to start the REPL, where `cd` toggles scope and `q` quits.")]
pub struct Cli {
    /// Target system variables (one-shot only, use `cd` in the REPL)
    #[arg(short = 's', long)]
    pub system: bool,

    /// Start the interactive REPL
    #[arg(short = 'i', long)]
    pub interactive: bool,

    /// `append` only: print the new value without writing it
    #[arg(short = 't', long)]
    pub dry_run: bool,

    /// Debug verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub debug: u8,

    /// Config file (default: $XDG_CONFIG_HOME/envedit/envedit.toml)
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Print the effective configuration and exit
    #[arg(long)]
    pub show_config: bool,

    /// Print a commented config file template and exit
    #[arg(long, conflicts_with = "show_config")]
    pub config_template: bool,

    /// Generate shell completions
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completions: Option<clap_complete::Shell>,

    /// Command word and its arguments
    #[arg(
        value_name = "COMMAND",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub tokens: Vec<String>,
}

impl Cli {
    /// No command given: bare invocation or only `-i`.
    pub fn is_interactive(&self) -> bool {
        self.tokens.is_empty() && !self.system && !self.dry_run
    }

    /// Token stream for one-shot classification.
    ///
    /// Flags clap consumed before the command word are put back in front so the
    /// classifier sees the same flags wherever they were typed.
    pub fn command_tokens(&self) -> Vec<String> {
        let mut tokens = Vec::with_capacity(self.tokens.len() + 2);
        if self.system {
            tokens.push(SYSTEM_FLAG.to_string());
        }
        if self.dry_run {
            tokens.push(DRY_RUN_FLAG.to_string());
        }
        tokens.extend(self.tokens.iter().cloned());
        tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{classify, CommandKind, Scope};
    use clap::CommandFactory;

    // https://docs.rs/clap/latest/clap/_derive/_tutorial/index.html#testing
    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn given_no_args_when_parsing_then_interactive() {
        let cli = Cli::try_parse_from(["envedit"]).unwrap();
        assert!(cli.is_interactive());
    }

    #[test]
    fn given_only_interactive_flag_when_parsing_then_interactive() {
        let cli = Cli::try_parse_from(["envedit", "-i"]).unwrap();
        assert!(cli.is_interactive());
    }

    #[test]
    fn given_only_system_flag_when_parsing_then_one_shot_parse_error() {
        let cli = Cli::try_parse_from(["envedit", "-s"]).unwrap();
        assert!(!cli.is_interactive());
        assert_eq!(classify(cli.command_tokens()).kind, CommandKind::ParseError);
    }

    #[test]
    fn given_leading_system_flag_when_parsing_then_reaches_classifier() {
        let cli = Cli::try_parse_from(["envedit", "-s", "get", "PATH"]).unwrap();
        let cmd = classify(cli.command_tokens());
        assert_eq!(cmd.kind, CommandKind::Get);
        assert_eq!(cmd.scope, Scope::System);
        assert_eq!(cmd.args, vec!["PATH"]);
    }

    #[test]
    fn given_trailing_dry_run_flag_when_parsing_then_kept_in_tokens() {
        let cli = Cli::try_parse_from(["envedit", "append", "PATH", ":/opt", "-t"]).unwrap();
        assert!(!cli.dry_run);
        let cmd = classify(cli.command_tokens());
        assert_eq!(cmd.kind, CommandKind::Append);
        assert!(cmd.is_dry_run());
        assert_eq!(cmd.args, vec!["PATH", ":/opt"]);
    }

    #[test]
    fn given_config_template_flag_when_parsing_then_set_and_no_tokens() {
        let cli = Cli::try_parse_from(["envedit", "--config-template"]).unwrap();
        assert!(cli.config_template);
        assert!(cli.tokens.is_empty());

        let both = Cli::try_parse_from(["envedit", "--config-template", "--show-config"]);
        assert!(both.is_err());
    }

    #[test]
    fn given_value_words_when_parsing_then_all_collected() {
        let cli = Cli::try_parse_from(["envedit", "set", "GREETING", "hello", "world"]).unwrap();
        assert_eq!(cli.tokens, vec!["set", "GREETING", "hello", "world"]);
    }
}
