//! Command implementations for the CLI.

/// Collects, groups and concatenates the fragments of one target directory.
pub mod concat;
