//! Reusable operations for schema discovery and wrapper generation
//!
//! These functions are used by multiple commands to avoid code duplication
//! and ensure consistent behavior across the CLI.

pub mod generate;
pub mod schemas;
