//! Terminal input for READ.
//!
//! When standard input is a terminal, READ lines come through rustyline so
//! the user gets line editing and history while a program waits for input.

use ippcode_foundation::{Error, ErrorKind, Result};
use ippcode_language::InputSource;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{Config, Editor};

const HISTORY_SIZE: usize = 500;

/// Rustyline-backed [`InputSource`].
pub struct EditorInput {
    editor: Editor<(), DefaultHistory>,
}

impl EditorInput {
    /// Creates an editor reading from the controlling terminal.
    ///
    /// # Errors
    ///
    /// Returns an error if rustyline initialization fails.
    pub fn new() -> Result<Self> {
        let config = Config::builder()
            .auto_add_history(true)
            .max_history_size(HISTORY_SIZE)
            .map_err(|e| Error::new(ErrorKind::Internal(e.to_string())))?
            .build();

        let editor = Editor::with_config(config)
            .map_err(|e| Error::new(ErrorKind::Internal(e.to_string())))?;

        Ok(Self { editor })
    }
}

impl InputSource for EditorInput {
    fn read_line(&mut self) -> Result<Option<String>> {
        match self.editor.readline("") {
            Ok(line) => Ok(Some(line)),
            // Ctrl+C and Ctrl+D both end the input; READ then yields nil.
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => Ok(None),
            Err(e) => Err(Error::new(ErrorKind::Internal(e.to_string()))),
        }
    }

    fn describe(&self) -> &'static str {
        "terminal"
    }
}
