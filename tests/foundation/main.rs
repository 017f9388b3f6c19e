//! Integration tests for Layer 0: Foundation
//!
//! Tests for core types: Value, DataType, float text, and Error.

mod errors;
mod float_text;
mod values;
