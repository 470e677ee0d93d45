//! Pole command implementation
//!
//! Computes a pole-vector position from three joint positions without a
//! scene.

use std::process::ExitCode;

use anyhow::{Context, Result};
use colored::Colorize;
use limbswitch_core::{LimbKind, PoleVector};
use serde_json::json;

use super::format_vec3;
use crate::input::{load_settings, parse_vec3};

/// Run the pole command
///
/// # Arguments
/// * `root`, `mid`, `end` - Joint positions as `x,y,z`
/// * `limb` - Limb kind, selects the amplitude scale
/// * `amplitude` - Overrides the configured base amplitude
/// * `settings_path` - Optional settings file
/// * `json` - Print JSON
pub fn run(
    root: &str,
    mid: &str,
    end: &str,
    limb: &str,
    amplitude: Option<f64>,
    settings_path: Option<&str>,
    json: bool,
) -> Result<ExitCode> {
    let mut settings = load_settings(settings_path)?;
    if let Some(amplitude) = amplitude {
        settings.pole.amplitude = amplitude;
    }
    settings.pole.validate()?;
    let kind = limb.parse::<LimbKind>()?;
    let root = parse_vec3(root).context("Invalid --root")?;
    let mid = parse_vec3(mid).context("Invalid --mid")?;
    let end = parse_vec3(end).context("Invalid --end")?;

    let pole = settings.pole.reconstruct(kind, root, mid, end);
    if json {
        println!("{}", serde_json::to_string_pretty(&pole_json(&pole))?);
    } else {
        println!(
            "{} {}",
            "Pole:".cyan().bold(),
            format_vec3(pole.position)
        );
        println!(
            "  {} {:.4} ({})",
            "offset".dimmed(),
            pole.offset_length(),
            format_vec3(pole.offset)
        );
        if pole.degenerate {
            println!(
                "{} chain is nearly straight; the pole direction is unreliable",
                "WARNING".yellow().bold()
            );
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn pole_json(pole: &PoleVector) -> serde_json::Value {
    json!({
        "position": pole.position,
        "offset": pole.offset,
        "offset_length": pole.offset_length(),
        "degenerate": pole.degenerate,
    })
}
