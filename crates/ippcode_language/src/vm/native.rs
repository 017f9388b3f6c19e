//! Value-level semantics of the instruction families.
//!
//! Handlers in the VM resolve operands and store results; everything in
//! here is a pure function from values to a value or an error:
//! - `arithmetic`: arithmetic, ordering, equality, and boolean logic
//! - `string`: string operations and conversions
//! - `io`: READ conversion and TYPE names

mod arithmetic;
mod io;
mod string;

#[allow(clippy::wildcard_imports)]
pub(crate) use arithmetic::*;
#[allow(clippy::wildcard_imports)]
pub(crate) use io::*;
#[allow(clippy::wildcard_imports)]
pub(crate) use string::*;
