//! envedit: read and mutate named string variables in a user and a system scope,
//! either one command per invocation or through an interactive REPL.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
