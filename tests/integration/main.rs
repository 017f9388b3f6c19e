//! Cross-layer integration tests
//!
//! Whole programs through the front end, the VM, statistics, and images.

mod calls;
mod images;
mod scenarios;
mod statistics;
