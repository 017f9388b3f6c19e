//! Session driver, terminal input, and program images for IPPcode20.
//!
//! This crate provides:
//! - [`Session`] - One interpreter run configured by [`SessionConfig`]
//! - [`EditorInput`] - READ input from an interactive terminal
//! - Program image serialization and deserialization
//! - The `ippcode` command-line binary

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod editor;
pub mod serialize;
pub mod session;

pub use editor::EditorInput;
pub use session::{Session, SessionConfig};

use tracing_subscriber::{EnvFilter, fmt};

/// Initialize logging with a default filter.
///
/// Use the `RUST_LOG` environment variable to override the default `warn`.
/// Log lines go to standard error so program output stays clean.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
