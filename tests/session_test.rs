//! Tests for the interactive Session (REPL state machine)

use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex};

use envedit::application::services::{Dispatcher, Session, PARSE_WARNING};
use envedit::domain::{CommandKind, Scope, HELP_TEXT};
use envedit::infrastructure::traits::Terminal;
use envedit::infrastructure::MemoryStore;
use envedit::util::testing::init_test_setup;

/// Terminal fed from a script that records everything shown to the user
#[derive(Default)]
struct ScriptedTerminal {
    input: Mutex<VecDeque<String>>,
    prompts: Mutex<Vec<String>>,
    printed: Mutex<Vec<String>>,
    warnings: Mutex<Vec<String>>,
    errors: Mutex<Vec<String>>,
    broken: bool,
}

impl ScriptedTerminal {
    fn new(lines: &[&str]) -> Self {
        Self {
            input: Mutex::new(lines.iter().map(|l| l.to_string()).collect()),
            ..Default::default()
        }
    }

    fn broken() -> Self {
        Self {
            broken: true,
            ..Default::default()
        }
    }

    fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    fn printed(&self) -> Vec<String> {
        self.printed.lock().unwrap().clone()
    }

    fn warnings(&self) -> Vec<String> {
        self.warnings.lock().unwrap().clone()
    }

    fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }
}

impl Terminal for ScriptedTerminal {
    fn read_line(&self, prompt: &str) -> io::Result<Option<String>> {
        if self.broken {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "stdin closed"));
        }
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(self.input.lock().unwrap().pop_front())
    }

    fn print(&self, text: &str) {
        self.printed.lock().unwrap().push(text.to_string());
    }

    fn warn(&self, text: &str) {
        self.warnings.lock().unwrap().push(text.to_string());
    }

    fn error(&self, text: &str) {
        self.errors.lock().unwrap().push(text.to_string());
    }
}

fn session_with(store: MemoryStore) -> (Arc<MemoryStore>, Session) {
    init_test_setup();
    let store = Arc::new(store);
    let session = Session::new(Dispatcher::new(store.clone()));
    (store, session)
}

#[test]
fn given_new_session_then_user_scope_and_noop_pending() {
    let (_, session) = session_with(MemoryStore::new());

    assert_eq!(session.scope(), Scope::User);
    assert_eq!(session.current().kind, CommandKind::Noop);
    assert_eq!(session.last_result(), None);
    assert_eq!(session.prompt(), "Current scope: User>");
}

#[test]
fn given_quit_when_running_then_help_shown_once_and_loop_ends() {
    let (_, mut session) = session_with(MemoryStore::new());
    let term = ScriptedTerminal::new(&["q"]);

    session.run(&term).unwrap();

    assert_eq!(term.printed(), vec![HELP_TEXT.to_string()]);
    assert_eq!(term.prompts(), vec!["Current scope: User>".to_string()]);
}

#[test]
fn given_bogus_input_when_running_then_warns_and_keeps_going() {
    let (_, mut session) = session_with(MemoryStore::new());
    let term = ScriptedTerminal::new(&["bogus", "", "also bogus", "quit"]);

    session.run(&term).unwrap();

    assert_eq!(term.warnings(), vec![PARSE_WARNING.to_string(); 3]);
    assert_eq!(term.prompts().len(), 4);
    assert!(term.errors().is_empty());
    // help only for the very first noop
    assert_eq!(
        term.printed().iter().filter(|p| p.as_str() == HELP_TEXT).count(),
        1
    );
}

#[test]
fn given_cd_twice_when_running_then_scope_returns_to_user() {
    let (_, mut session) = session_with(MemoryStore::new());
    let term = ScriptedTerminal::new(&["cd", "cd", "q"]);

    session.run(&term).unwrap();

    assert_eq!(session.scope(), Scope::User);
    assert_eq!(
        term.prompts(),
        vec![
            "Current scope: User>".to_string(),
            "Current scope: System>".to_string(),
            "Current scope: User>".to_string(),
        ]
    );
    // cd prints nothing
    assert_eq!(term.printed(), vec![HELP_TEXT.to_string()]);
}

#[test]
fn given_interactive_system_flag_when_running_then_scope_unchanged() {
    let (store, mut session) = session_with(
        MemoryStore::new()
            .with_vars(Scope::User, [("X", "user-value")])
            .with_vars(Scope::System, [("X", "system-value")]),
    );
    let term = ScriptedTerminal::new(&["get X -s", "-s set Y 1", "q"]);

    session.run(&term).unwrap();

    assert_eq!(session.scope(), Scope::User);
    assert!(term.printed().contains(&"user-value".to_string()));
    assert!(!term.printed().contains(&"system-value".to_string()));
    assert!(store.snapshot(Scope::User).contains_key("Y"));
    assert!(!store.snapshot(Scope::System).contains_key("Y"));
}

#[test]
fn given_cd_when_running_then_commands_target_system_scope() {
    let (store, mut session) = session_with(MemoryStore::new());
    let term = ScriptedTerminal::new(&["cd", "set GREETING hello world", "q"]);

    session.run(&term).unwrap();

    assert_eq!(session.scope(), Scope::System);
    assert_eq!(
        store.snapshot(Scope::System).get("GREETING").map(String::as_str),
        Some("hello world")
    );
    assert_eq!(session.last_result(), Some("hello world"));
}

#[test]
fn given_wrong_arity_when_running_then_error_printed_and_session_continues() {
    let (_, mut session) = session_with(MemoryStore::new().with_vars(Scope::User, [("A", "1")]));
    let term = ScriptedTerminal::new(&["get", "ls extra", "ls", "q"]);

    session.run(&term).unwrap();

    let errors = term.errors();
    assert_eq!(errors.len(), 2);
    assert!(errors[0].contains("`get`"));
    assert!(errors[1].contains("`ls`"));
    assert!(errors.iter().all(|e| e.starts_with("Invalid command: ")));
    assert!(term.printed().contains(&"A".to_string()));
}

#[test]
fn given_store_denies_write_when_running_then_error_printed_and_session_continues() {
    let (store, mut session) = session_with(
        MemoryStore::new()
            .with_vars(Scope::System, [("PATH", "/bin")])
            .read_only(Scope::System),
    );
    let term = ScriptedTerminal::new(&["cd", "set PATH /tmp", "get PATH", "q"]);

    session.run(&term).unwrap();

    let errors = term.errors();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("denied"));
    assert!(term.printed().contains(&"/bin".to_string()));
    assert_eq!(store.snapshot(Scope::System).get("PATH").map(String::as_str), Some("/bin"));
}

#[test]
fn given_dry_run_append_when_running_then_prints_without_writing() {
    let (store, mut session) = session_with(MemoryStore::new().with_vars(Scope::User, [("P", "/bin")]));
    let term = ScriptedTerminal::new(&["append P :/opt -t", "q"]);

    session.run(&term).unwrap();

    assert!(term.printed().contains(&"/bin:/opt".to_string()));
    assert_eq!(store.snapshot(Scope::User).get("P").map(String::as_str), Some("/bin"));
}

#[test]
fn given_help_command_when_running_then_help_printed_again() {
    let (_, mut session) = session_with(MemoryStore::new());
    let term = ScriptedTerminal::new(&["h", "q"]);

    session.run(&term).unwrap();

    assert_eq!(
        term.printed().iter().filter(|p| p.as_str() == HELP_TEXT).count(),
        2
    );
}

#[test]
fn given_end_of_input_when_running_then_session_ends() {
    let (_, mut session) = session_with(MemoryStore::new());
    let term = ScriptedTerminal::new(&["cd"]);

    session.run(&term).unwrap();

    assert_eq!(term.prompts().len(), 2);
    assert_eq!(session.scope(), Scope::System);
    assert_eq!(session.current().kind, CommandKind::Quit);
}

#[test]
fn given_broken_terminal_when_running_then_error_returned() {
    let (_, mut session) = session_with(MemoryStore::new());

    let err = session.run(&ScriptedTerminal::broken()).unwrap_err();

    assert!(err.to_string().contains("read command line"));
}

#[test]
fn given_line_when_accepting_then_session_scope_forced_and_parse_error_coerced() {
    let (_, mut session) = session_with(MemoryStore::new());
    let term = ScriptedTerminal::default();

    let cmd = session.accept_line("-s ls", &term).clone();
    assert_eq!(cmd.kind, CommandKind::List);
    assert_eq!(cmd.scope, Scope::User);
    assert!(cmd.has_flag("-s"));

    let cmd = session.accept_line("nonsense here", &term).clone();
    assert_eq!(cmd.kind, CommandKind::Noop);
    assert_eq!(term.warnings(), vec![PARSE_WARNING.to_string()]);
}
