//! One interpreter run, from command-line configuration to exit code.
//!
//! A [`Session`] loads the program (text or image), optionally saves an
//! image, picks the READ input source, executes, and writes the
//! statistics report.

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, IsTerminal, Read};
use std::path::{Path, PathBuf};

use ippcode_debug::{Statistics, StatsConfig};
use ippcode_foundation::{Error, ErrorKind, Result};
use ippcode_language::{InputSource, Instruction, LineInput, Program, Vm, parse};
use tracing::info;

use crate::editor::EditorInput;
use crate::serialize::{self, IMAGE_EXTENSION};

/// What a session should run and report.
///
/// `None` for `source` or `input` means standard input.
#[derive(Clone, Debug, Default)]
pub struct SessionConfig {
    /// Program file: IPPcode20 text, or an image ending in `.ippc`.
    pub source: Option<PathBuf>,
    /// File supplying READ lines.
    pub input: Option<PathBuf>,
    /// Statistics report destination and contents.
    pub stats: Option<(PathBuf, StatsConfig)>,
    /// Where to save a program image before running.
    pub compile: Option<PathBuf>,
}

impl SessionConfig {
    /// Creates a configuration reading everything from standard input.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the program file.
    #[must_use]
    pub fn with_source(mut self, path: impl Into<PathBuf>) -> Self {
        self.source = Some(path.into());
        self
    }

    /// Builder method to set the READ input file.
    #[must_use]
    pub fn with_input(mut self, path: impl Into<PathBuf>) -> Self {
        self.input = Some(path.into());
        self
    }

    /// Builder method to request a statistics report.
    #[must_use]
    pub fn with_stats(mut self, path: impl Into<PathBuf>, config: StatsConfig) -> Self {
        self.stats = Some((path.into(), config));
        self
    }

    /// Builder method to save a program image.
    #[must_use]
    pub fn with_compile(mut self, path: impl Into<PathBuf>) -> Self {
        self.compile = Some(path.into());
        self
    }
}

/// A configured interpreter run.
pub struct Session {
    config: SessionConfig,
}

impl Session {
    /// Creates a session.
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        Self { config }
    }

    /// The session configuration.
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Loads and validates the program, saving an image if requested.
    ///
    /// # Errors
    ///
    /// Returns `CannotOpenInput` if the program cannot be read,
    /// `CannotOpenOutput` if the image cannot be written, and the
    /// front end's errors for invalid programs.
    pub fn load(&self) -> Result<Program> {
        let records = self.read_records()?;
        if let Some(path) = &self.config.compile {
            serialize::save_to_file(&records, path)?;
            info!(path = %path.display(), "saved program image");
        }
        Program::new(records)
    }

    /// Runs the program to completion and returns its exit code.
    ///
    /// # Errors
    ///
    /// Returns the first error from loading, executing, or writing the
    /// statistics report.
    pub fn run(&self) -> Result<u8> {
        let program = self.load()?;
        let input = self.open_input()?;
        let mut vm = Vm::new(input);

        let Some((path, config)) = &self.config.stats else {
            return vm.execute(&program);
        };

        let mut stats = Statistics::new(config.clone());
        let code = vm.execute_observed(&program, &mut stats)?;
        write_stats(&stats, path)?;
        Ok(code)
    }

    fn read_records(&self) -> Result<Vec<Instruction>> {
        match &self.config.source {
            Some(path) if is_image(path) => {
                info!(path = %path.display(), "loading program image");
                serialize::load_from_file(path)
            }
            Some(path) => {
                info!(path = %path.display(), "loading program source");
                let text = fs::read_to_string(path).map_err(|e| cannot_open_input(path, &e))?;
                parse(&text)
            }
            None => {
                info!("loading program source from standard input");
                let mut text = String::new();
                io::stdin()
                    .read_to_string(&mut text)
                    .map_err(|e| Error::new(ErrorKind::CannotOpenInput(format!("standard input: {e}"))))?;
                parse(&text)
            }
        }
    }

    fn open_input(&self) -> Result<Box<dyn InputSource>> {
        if let Some(path) = &self.config.input {
            let file = File::open(path).map_err(|e| cannot_open_input(path, &e))?;
            return Ok(Box::new(LineInput::new(BufReader::new(file)).described_as("file")));
        }
        let stdin = io::stdin();
        if stdin.is_terminal() {
            Ok(Box::new(EditorInput::new()?))
        } else {
            Ok(Box::new(LineInput::new(stdin.lock()).described_as("stdin")))
        }
    }
}

fn is_image(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == IMAGE_EXTENSION)
}

fn cannot_open_input(path: &Path, err: &io::Error) -> Error {
    Error::new(ErrorKind::CannotOpenInput(format!("'{}': {err}", path.display())))
}

fn write_stats(stats: &Statistics, path: &Path) -> Result<()> {
    let cannot_write =
        |e: io::Error| Error::new(ErrorKind::CannotOpenOutput(format!("'{}': {e}", path.display())));
    let file = File::create(path).map_err(cannot_write)?;
    stats.write_report(BufWriter::new(file)).map_err(cannot_write)?;
    info!(
        path = %path.display(),
        insts = stats.instructions(),
        vars = stats.max_vars(),
        "wrote statistics"
    );
    Ok(())
}
