//! Toggle command implementations
//!
//! Flips a limb (or every selected limb) between IK and FK.

use std::process::ExitCode;

use anyhow::Result;
use colored::Colorize;
use limbswitch_rig::{toggle, toggle_selected, Confirm, ToggleOutcome};

use super::reconcile::{LimbArgs, SceneArgs};
use super::{format_vec3, print_rig_error, report_rig_error};
use crate::input::limb_from_args;

fn print_outcome(outcome: &ToggleOutcome) {
    println!(
        "  {} {} -> {}",
        outcome.limb,
        format!("{:.2}", outcome.previous_blend).dimmed(),
        outcome.mode.to_string().to_uppercase().bold()
    );
    if let Some(pole) = outcome.pole {
        println!("    {} {}", "pole".dimmed(), format_vec3(pole));
    }
    if outcome.degenerate_pole {
        println!(
            "    {} chain is nearly straight; check the pole control",
            "WARNING".yellow().bold()
        );
    }
}

/// Run the toggle command for one limb.
pub fn run(io: &SceneArgs, limb: &LimbArgs, confirm: &mut dyn Confirm) -> Result<ExitCode> {
    let limb = limb_from_args(&limb.limb, limb.side.as_deref(), limb.namespace.as_deref())?;
    let (mut scene, settings) = io.load()?;

    println!("{} {}", "Toggling:".cyan().bold(), limb);
    match toggle(&mut scene, &limb, &settings, confirm) {
        Ok(outcome) => print_outcome(&outcome),
        Err(err) => return Ok(report_rig_error(&err)),
    }

    io.save(&scene)?;
    Ok(ExitCode::SUCCESS)
}

/// Run the toggle-selected command.
///
/// The scene is saved when at least one limb toggled; the exit code is 1
/// if any limb failed or nothing was selected.
pub fn run_selected(io: &SceneArgs, confirm: &mut dyn Confirm) -> Result<ExitCode> {
    let (mut scene, settings) = io.load()?;

    println!("{} selection", "Toggling:".cyan().bold());
    let results = toggle_selected(&mut scene, &settings, confirm);
    if results.is_empty() {
        println!(
            "{} no limb controls in the selection",
            "WARNING".yellow().bold()
        );
        return Ok(ExitCode::from(1));
    }

    let mut failed = 0;
    for (limb, result) in &results {
        match result {
            Ok(outcome) => print_outcome(outcome),
            Err(err) => {
                eprint!("  {}: ", limb);
                print_rig_error(err);
                failed += 1;
            }
        }
    }

    if failed < results.len() {
        io.save(&scene)?;
    }
    if failed > 0 {
        Ok(ExitCode::from(1))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
