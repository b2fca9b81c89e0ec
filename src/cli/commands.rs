use std::io::{self, Write};

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::cli::args::Cli;
use crate::cli::output;
use crate::cli::terminal::ConsoleTerminal;
use crate::cli::CliResult;
use crate::config::Settings;
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    if let Some(shell) = cli.completions {
        return _completions(shell);
    }

    if cli.config_template {
        output::info(&Settings::template());
        return Ok(());
    }

    let settings = Settings::load(cli.config.as_deref())?;
    debug!("settings: {:?}", settings);
    if cli.show_config {
        output::info(&settings.to_toml()?);
        return Ok(());
    }

    let container = ServiceContainer::new(settings);
    if cli.is_interactive() {
        _repl(&container)
    } else {
        _run(&container, &cli.command_tokens())
    }
}

#[instrument(skip(container))]
fn _run(container: &ServiceContainer, tokens: &[String]) -> CliResult<()> {
    let outcome = container.dispatcher().run_once(tokens)?;
    if let Some(text) = outcome.result {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", text).map_err(|e| InfraError::output("result", e))?;
    }
    Ok(())
}

#[instrument(skip(container))]
fn _repl(container: &ServiceContainer) -> CliResult<()> {
    let mut session = container.session();
    session.run(&ConsoleTerminal)?;
    Ok(())
}

fn _completions(shell: Shell) -> CliResult<()> {
    eprintln!("Generating completion file for {shell:?}...");
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}
