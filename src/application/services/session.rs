//! Interactive session (REPL) state machine
//!
//! The session owns the active scope across iterations. Two rules are part of
//! the interactive contract:
//! - `-s` typed at the prompt never changes the scope, only `cd` does.
//! - bad input never ends the session; unknown commands become a noop with a
//!   warning, validation and store errors are printed and the loop continues.

use tracing::{debug, info, warn};

use crate::application::services::Dispatcher;
use crate::application::{ApplicationResult, IoResultExt};
use crate::domain::{classify, render_errors, validate, Command, CommandKind, Scope, HELP_TEXT};
use crate::infrastructure::traits::Terminal;

/// Warning shown when an interactive line cannot be parsed.
pub const PARSE_WARNING: &str = "unrecognized command, performing noop";

/// REPL session: current scope, pending command and last result.
pub struct Session {
    dispatcher: Dispatcher,
    scope: Scope,
    current: Command,
    last_result: Option<String>,
}

impl Session {
    /// Start in user scope with a noop pending.
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self {
            dispatcher,
            scope: Scope::User,
            current: Command::noop(Scope::User),
            last_result: None,
        }
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn last_result(&self) -> Option<&str> {
        self.last_result.as_deref()
    }

    /// The command that runs on the next iteration.
    pub fn current(&self) -> &Command {
        &self.current
    }

    pub fn prompt(&self) -> String {
        format!("Current scope: {}>", self.scope)
    }

    /// Run until `quit` (or end of input).
    ///
    /// Only terminal I/O failures end the loop with an error.
    pub fn run(&mut self, term: &dyn Terminal) -> ApplicationResult<()> {
        info!("REPL started in {} scope", self.scope);
        let mut first = true;

        while self.current.kind != CommandKind::Quit {
            self.execute_current(term);

            if first && self.current.kind == CommandKind::Noop {
                term.print(HELP_TEXT);
            }
            first = false;

            let prompt = self.prompt();
            match term.read_line(&prompt).with_io_context("read command line")? {
                Some(line) => {
                    self.accept_line(&line, term);
                }
                None => {
                    debug!("end of input, quitting");
                    self.current.kind = CommandKind::Quit;
                }
            }
        }

        info!("REPL finished in {} scope", self.scope);
        Ok(())
    }

    /// Validate and dispatch the pending command, printing its result or errors.
    pub fn execute_current(&mut self, term: &dyn Terminal) {
        let errors = validate(&self.current);
        if !errors.is_empty() {
            debug!("execute_current: invalid {:?}: {:?}", self.current.kind, errors);
            term.error(&render_errors(&errors));
            return;
        }

        match self.dispatcher.dispatch(&self.current, self.scope) {
            Ok(outcome) => {
                self.scope = outcome.scope;
                if let Some(text) = &outcome.result {
                    term.print(text);
                }
                self.last_result = outcome.result;
            }
            Err(e) => {
                warn!("execute_current: {:?} failed: {}", self.current.kind, e);
                term.error(&e.to_string());
            }
        }
    }

    /// Turn one input line into the next pending command.
    pub fn accept_line(&mut self, line: &str, term: &dyn Terminal) -> &Command {
        let mut next = classify(line.split_whitespace());

        if next.kind == CommandKind::ParseError {
            next.kind = CommandKind::Noop;
            term.warn(PARSE_WARNING);
        }

        // cd is the only interactive scope switch
        next.scope = self.scope;

        self.current = next;
        &self.current
    }
}
