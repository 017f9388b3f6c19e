//! IPPcode20 - Interpreter for a frame/stack instruction set
//!
//! This crate re-exports all layers of the interpreter for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 4: ippcode_runtime    - Session driver, CLI, program images
//! Layer 3: ippcode_debug      - Execution statistics
//! Layer 2: ippcode_language   - Instruction model, front end, VM
//! Layer 1: ippcode_storage    - Global, local, and temporary frames
//! Layer 0: ippcode_foundation - Core types (Value, DataType, Error)
//! ```

pub use ippcode_debug as debug;
pub use ippcode_foundation as foundation;
pub use ippcode_language as language;
pub use ippcode_runtime as runtime;
pub use ippcode_storage as storage;
