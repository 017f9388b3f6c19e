//! Variable frame storage for the IPPcode20 interpreter.
//!
//! This crate provides:
//! - [`Frame`] - A single scope of declared and bound variables
//! - [`FrameStore`] - Global frame, local frame stack, and pending temporary frame

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod frame;

pub use frame::{Frame, FrameStore};
