//! Bake command implementation
//!
//! Matches and keys a limb on every frame of a range.

use std::process::ExitCode;

use anyhow::{bail, Result};
use colored::Colorize;
use limbswitch_rig::{bake, Confirm, Direction, ReconcileOptions, TimelineReader};

use super::reconcile::{LimbArgs, SceneArgs};
use super::report_rig_error;
use crate::input::limb_from_args;

/// Run the bake command
///
/// # Arguments
/// * `io` - Scene and settings paths
/// * `limb` - Limb to bake
/// * `direction` - `fk-to-ik` or `ik-to-fk`
/// * `options` - Stump and parent-space handling (keying is always on)
/// * `range` - `(start, end)` overriding the scene's selected range
/// * `confirm` - Answers the parent-space question
pub fn run(
    io: &SceneArgs,
    limb: &LimbArgs,
    direction: &str,
    options: &ReconcileOptions,
    range: Option<(f64, f64)>,
    confirm: &mut dyn Confirm,
) -> Result<ExitCode> {
    let direction = direction.parse::<Direction>()?;
    let limb = limb_from_args(&limb.limb, limb.side.as_deref(), limb.namespace.as_deref())?;
    let (mut scene, settings) = io.load()?;
    if let Some((start, end)) = range {
        if !(start.is_finite() && end.is_finite()) {
            bail!("frame range must be finite, got {}..{}", start, end);
        }
        scene.timeline.selected = Some([start, end]);
    }

    match scene.selected_range() {
        Some((start, end)) => println!(
            "{} {} ({}) over frames {}..{}",
            "Baking:".cyan().bold(),
            limb,
            direction,
            start,
            end
        ),
        None => println!("{} {} ({})", "Baking:".cyan().bold(), limb, direction),
    }

    let report = match bake(&mut scene, &limb, direction, options, &settings, confirm) {
        Ok(report) => report,
        Err(err) => return Ok(report_rig_error(&err)),
    };
    println!("  {} {}", "frames".dimmed(), report.frames.len());

    io.save(&scene)?;
    Ok(ExitCode::SUCCESS)
}
