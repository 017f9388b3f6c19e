//! Values, data types, and the error taxonomy for the IPPcode20 interpreter.
//!
//! This crate provides:
//! - [`Value`] - The typed scalar every instruction operates on
//! - [`DataType`] and [`FrameKind`] - Kind tags for values and variable scopes
//! - [`float`] - The hexadecimal float text form used for output and input
//! - [`Error`] - Fatal error kinds, each mapped to a process exit code

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod float;
pub mod types;
pub mod value;

pub use error::{Error, ErrorContext, ErrorKind};
pub use types::{DataType, FrameKind};
pub use value::Value;

/// Result type alias using the interpreter [`Error`] type.
pub type Result<T> = std::result::Result<T, Error>;
