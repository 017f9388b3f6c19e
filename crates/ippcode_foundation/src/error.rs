//! Error types for the IPPcode20 interpreter.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.
//! Every failure is fatal; the [`ErrorKind`] decides the process exit code.

use std::fmt;

use thiserror::Error;

use crate::types::DataType;

/// The main error type for interpreter operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    ///
    /// Context that is already present wins, so the innermost
    /// location is the one reported.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        if self.context.is_none() {
            self.context = Some(context);
        }
        self
    }

    /// The process exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        self.kind.exit_code()
    }

    /// Creates a type mismatch error.
    #[must_use]
    pub fn type_mismatch(expected: impl Into<String>, actual: DataType) -> Self {
        Self::new(ErrorKind::InvalidDataType {
            expected: expected.into(),
            actual: actual.name().to_string(),
        })
    }

    /// Creates a type mismatch error for two operands of different kinds.
    #[must_use]
    pub fn operand_mismatch(left: DataType, right: DataType) -> Self {
        Self::new(ErrorKind::InvalidDataType {
            expected: format!("operands of the same type, {left} on the left"),
            actual: right.name().to_string(),
        })
    }

    /// Creates an undefined variable error.
    #[must_use]
    pub fn undefined_variable(name: impl fmt::Display) -> Self {
        Self::new(ErrorKind::UndefinedVariable(name.to_string()))
    }

    /// Creates a missing frame error.
    #[must_use]
    pub fn invalid_frame(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidFrame(message.into()))
    }

    /// Creates a missing value error.
    #[must_use]
    pub fn undefined_value(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::UndefinedValue(message.into()))
    }

    /// Creates an out-of-range operand error.
    #[must_use]
    pub fn invalid_operand(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidOperandValue(message.into()))
    }

    /// Creates an invalid string operation error.
    #[must_use]
    pub fn invalid_string(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidStringOperation(message.into()))
    }

    /// Creates a semantic error.
    #[must_use]
    pub fn semantic(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Semantic(message.into()))
    }

    /// Creates a malformed program error at a source line.
    #[must_use]
    pub fn malformed(message: impl Into<String>, line: u32) -> Self {
        Self::new(ErrorKind::MalformedProgram {
            message: message.into(),
            line,
        })
    }

    /// Creates a structural program error.
    #[must_use]
    pub fn structure(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidStructure(message.into()))
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal(message.into()))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::internal(format!("i/o failure: {err}"))
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// Bad command line.
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    /// An input file could not be opened or read.
    #[error("cannot open input: {0}")]
    CannotOpenInput(String),

    /// An output file could not be created or written.
    #[error("cannot open output: {0}")]
    CannotOpenOutput(String),

    /// The program text is not well formed.
    #[error("malformed program at line {line}: {message}")]
    MalformedProgram {
        /// Description of the problem.
        message: String,
        /// Line number (1-indexed, 0 when unknown).
        line: u32,
    },

    /// The program is well formed but structurally invalid
    /// (unknown opcode, wrong operands, bad ordering).
    #[error("invalid program structure: {0}")]
    InvalidStructure(String),

    /// Label redefinition, unknown jump target, or variable redeclaration.
    #[error("semantic error: {0}")]
    Semantic(String),

    /// Operand of the wrong kind for the operation.
    #[error("invalid operand type: expected {expected}, got {actual}")]
    InvalidDataType {
        /// Description of the accepted kinds.
        expected: String,
        /// The kind encountered.
        actual: String,
    },

    /// Access to a variable that was never declared.
    #[error("undefined variable: {0}")]
    UndefinedVariable(String),

    /// Access to a local or temporary frame that does not exist.
    #[error("invalid frame: {0}")]
    InvalidFrame(String),

    /// Read of an unbound variable, or a pop from an empty stack.
    #[error("missing value: {0}")]
    UndefinedValue(String),

    /// Operand of the right kind but an unusable value.
    #[error("invalid operand value: {0}")]
    InvalidOperandValue(String),

    /// String index or code point out of range.
    #[error("invalid string operation: {0}")]
    InvalidStringOperation(String),

    /// Internal error (output failures, corrupt images).
    #[error("internal error: {0}")]
    Internal(String),
}

impl ErrorKind {
    /// The process exit code identifying this kind of failure.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::InvalidArguments(_) => 10,
            Self::CannotOpenInput(_) => 11,
            Self::CannotOpenOutput(_) => 12,
            Self::MalformedProgram { .. } => 31,
            Self::InvalidStructure(_) => 32,
            Self::Semantic(_) => 52,
            Self::InvalidDataType { .. } => 53,
            Self::UndefinedVariable(_) => 54,
            Self::InvalidFrame(_) => 55,
            Self::UndefinedValue(_) => 56,
            Self::InvalidOperandValue(_) => 57,
            Self::InvalidStringOperation(_) => 58,
            Self::Internal(_) => 99,
        }
    }
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorContext {
    /// The `order` of the failing instruction.
    pub order: Option<u32>,
    /// The mnemonic of the failing instruction.
    pub opcode: Option<&'static str>,
    /// Source line of the failing instruction.
    pub line: Option<u32>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the instruction order and mnemonic.
    #[must_use]
    pub fn with_instruction(mut self, order: u32, opcode: &'static str) -> Self {
        self.order = Some(order);
        self.opcode = Some(opcode);
        self
    }

    /// Sets the source line.
    #[must_use]
    pub fn with_line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.opcode, self.order) {
            (Some(op), Some(order)) => write!(f, "in {op} (instruction {order})")?,
            (Some(op), None) => write!(f, "in {op}")?,
            (None, Some(order)) => write!(f, "at instruction {order}")?,
            (None, None) => {}
        }
        if let Some(line) = self.line {
            write!(f, " on line {line}")?;
        }
        Ok(())
    }
}
