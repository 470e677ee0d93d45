//! Cross-module tests for the core crate.
