//! Settings command implementation
//!
//! Prints the effective rig settings, or writes them to a file as a
//! starting point for a custom rig.

use std::fs;
use std::process::ExitCode;

use anyhow::{Context, Result};
use colored::Colorize;

use crate::input::load_settings;

/// Run the settings command
///
/// # Arguments
/// * `settings_path` - Settings to load (default: built-in defaults)
/// * `output` - File to write (default: stdout)
pub fn run(settings_path: Option<&str>, output: Option<&str>) -> Result<ExitCode> {
    let settings = load_settings(settings_path)?;
    let json = settings.to_json_pretty()?;
    match output {
        Some(path) => {
            fs::write(path, &json).with_context(|| format!("Failed to write to: {}", path))?;
            println!("{} Settings written to: {}", "SUCCESS".green().bold(), path);
        }
        None => println!("{}", json),
    }
    Ok(ExitCode::SUCCESS)
}
