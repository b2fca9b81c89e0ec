//! Console implementation of the REPL terminal

use std::io::{self, BufRead};

use crate::cli::output;
use crate::infrastructure::traits::Terminal;

/// Terminal reading from stdin and writing through [`output`].
#[derive(Debug, Default)]
pub struct ConsoleTerminal;

impl Terminal for ConsoleTerminal {
    fn read_line(&self, prompt: &str) -> io::Result<Option<String>> {
        output::prompt(prompt);
        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            // keep the shell prompt off our prompt line after Ctrl-D
            println!();
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn print(&self, text: &str) {
        output::info(text);
    }

    fn warn(&self, text: &str) {
        output::warning(text);
    }

    fn error(&self, text: &str) {
        output::error(text);
    }
}
