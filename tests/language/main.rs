//! Integration tests for Layer 2: Language
//!
//! Tests for the front end, program construction, and the VM.

mod front_end;
mod program;
mod vm;
