//! limbswitch CLI library.
//!
//! Command implementations for the `limbswitch` binary. Scenes are JSON
//! documents loaded into a [`limbswitch_rig::memory::MemoryScene`]; rig
//! settings are optional JSON files.

pub mod commands;
pub mod input;
pub mod logging;
pub mod prompt;
