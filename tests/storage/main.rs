//! Integration tests for Layer 1: Storage
//!
//! Tests for the frame store: declaration, binding, and frame rotation.

mod frames;
