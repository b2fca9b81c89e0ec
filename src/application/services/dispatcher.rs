//! Command dispatcher
//!
//! Executes validated commands against the scoped store.

use std::sync::Arc;

use itertools::Itertools;
use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{classify, validate, Command, CommandKind, Scope, HELP_TEXT};
use crate::infrastructure::traits::ScopedStore;

/// Result of dispatching one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Scope in effect after the command (only `cd` changes it)
    pub scope: Scope,
    /// Text to show the user, if any
    pub result: Option<String>,
}

impl Outcome {
    fn new(scope: Scope, result: Option<String>) -> Self {
        Self { scope, result }
    }
}

/// Service executing commands against a [`ScopedStore`].
pub struct Dispatcher {
    store: Arc<dyn ScopedStore>,
}

impl Dispatcher {
    /// Create a new dispatcher.
    pub fn new(store: Arc<dyn ScopedStore>) -> Self {
        Self { store }
    }

    /// Classify, validate and dispatch one invocation.
    ///
    /// The scope comes from `-s` in `tokens`. Validation failures are returned as
    /// [`ApplicationError::InvalidCommand`] before the store is touched.
    pub fn run_once<I, S>(&self, tokens: I) -> ApplicationResult<Outcome>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let cmd = classify(tokens);
        let errors = validate(&cmd);
        if !errors.is_empty() {
            debug!("run_once: rejected {:?}: {:?}", cmd.kind, errors);
            return Err(ApplicationError::InvalidCommand(errors));
        }
        self.dispatch(&cmd, cmd.scope)
    }

    /// Execute `cmd` in `scope`.
    ///
    /// # Panics
    /// If `cmd` did not pass [`validate`]: `get`, `set`, `append` and `rm` index their
    /// arguments without checking the count.
    #[instrument(level = "debug", skip(self), fields(kind = ?cmd.kind))]
    pub fn dispatch(&self, cmd: &Command, scope: Scope) -> ApplicationResult<Outcome> {
        let outcome = match cmd.kind {
            CommandKind::ChangeScope => Outcome::new(scope.toggled(), None),
            CommandKind::List => Outcome::new(scope, Some(self.list(scope)?)),
            CommandKind::Get => Outcome::new(scope, self.get(scope, &cmd.args[0])?),
            CommandKind::Set => {
                let value = cmd.args[1..].join(" ");
                Outcome::new(scope, self.write(scope, &cmd.args[0], Some(&value))?)
            }
            CommandKind::Append => {
                Outcome::new(scope, self.append(scope, &cmd.args, cmd.is_dry_run())?)
            }
            CommandKind::Delete => Outcome::new(scope, self.write(scope, &cmd.args[0], None)?),
            CommandKind::Help => Outcome::new(scope, Some(HELP_TEXT.to_string())),
            CommandKind::Quit | CommandKind::Noop | CommandKind::ParseError => {
                Outcome::new(scope, None)
            }
        };
        debug!("dispatch: scope={} result={:?}", outcome.scope, outcome.result);
        Ok(outcome)
    }

    fn list(&self, scope: Scope) -> ApplicationResult<String> {
        let keys = self.store.list(scope)?;
        Ok(keys.into_iter().sorted().join("\n"))
    }

    fn get(&self, scope: Scope, key: &str) -> ApplicationResult<Option<String>> {
        Ok(self.store.get(scope, key)?)
    }

    /// Write then re-read, so the caller sees what the store actually holds.
    fn write(&self, scope: Scope, key: &str, value: Option<&str>) -> ApplicationResult<Option<String>> {
        debug!("write: {}[{}] = {:?}", scope, key, value);
        self.store.set(scope, key, value)?;
        self.get(scope, key)
    }

    /// Concatenate the joined value onto the current one, no separator.
    fn append(&self, scope: Scope, args: &[String], dry_run: bool) -> ApplicationResult<Option<String>> {
        let key = &args[0];
        let old = self.get(scope, key)?.unwrap_or_default();
        let new_value = format!("{}{}", old, args[1..].join(" "));
        if dry_run {
            debug!("append: dry run, not writing {}", key);
            return Ok(Some(new_value));
        }
        self.write(scope, key, Some(&new_value))
    }
}
