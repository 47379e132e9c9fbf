// src/error_handling/mod.rs
//! Error handling for the optimistic rollup core
//!
//! This module provides the error type shared by all rollup components.

pub mod error_types;

// Re-export common types
pub use error_types::RollupError;
