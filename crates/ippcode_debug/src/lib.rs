//! Execution statistics for the IPPcode20 interpreter.
//!
//! This crate provides:
//! - `StatsConfig` - which statistics to report, and in which order
//! - `Statistics` - an observer counting instructions and declared variables

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod stats;

pub use config::{StatsConfig, StatsItem};
pub use stats::Statistics;
