//! Collaborators the VM talks to while running.
//!
//! The engine reads READ lines through an [`InputSource`] and reports
//! every executed instruction to an [`ExecutionObserver`]. Neither can
//! influence control flow.

use std::collections::VecDeque;
use std::io::BufRead;

use ippcode_foundation::Result;
use ippcode_storage::FrameStore;
use tracing::debug;

use crate::opcode::Opcode;

// =============================================================================
// Input
// =============================================================================

/// A line-oriented source of READ input.
pub trait InputSource {
    /// Reads the next line without its line terminator.
    ///
    /// Returns `Ok(None)` at end of input, and for a line that is not
    /// text; READ stores nil either way.
    fn read_line(&mut self) -> Result<Option<String>>;

    /// Short description for BREAK output.
    fn describe(&self) -> &'static str {
        "input"
    }
}

/// Reads lines from any buffered reader (files, piped standard input).
pub struct LineInput<R> {
    reader: R,
    kind: &'static str,
}

impl<R: BufRead> LineInput<R> {
    /// Wraps a reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            kind: "stream",
        }
    }

    /// Sets the description shown by BREAK.
    #[must_use]
    pub fn described_as(mut self, kind: &'static str) -> Self {
        self.kind = kind;
        self
    }
}

impl<R: BufRead> InputSource for LineInput<R> {
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut bytes = Vec::new();
        if self.reader.read_until(b'\n', &mut bytes)? == 0 {
            return Ok(None);
        }
        let Ok(mut line) = String::from_utf8(bytes) else {
            debug!(source = self.kind, "skipping input line that is not UTF-8");
            return Ok(None);
        };
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(Some(line))
    }

    fn describe(&self) -> &'static str {
        self.kind
    }
}

/// Pre-split input lines.
#[derive(Clone, Debug, Default)]
pub struct ScriptedInput {
    lines: VecDeque<String>,
}

impl ScriptedInput {
    /// Creates a source yielding `lines` in order, then end of input.
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// An already exhausted source.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }
}

impl InputSource for ScriptedInput {
    fn read_line(&mut self) -> Result<Option<String>> {
        Ok(self.lines.pop_front())
    }

    fn describe(&self) -> &'static str {
        "scripted"
    }
}

// =============================================================================
// Observation
// =============================================================================

/// Hook called after every successfully executed instruction.
pub trait ExecutionObserver {
    /// Sees the instruction that just ran and the frames it left behind.
    fn after_instruction(&mut self, opcode: &Opcode, frames: &FrameStore);
}

/// Observer that ignores everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoObserver;

impl ExecutionObserver for NoObserver {
    fn after_instruction(&mut self, _opcode: &Opcode, _frames: &FrameStore) {}
}
