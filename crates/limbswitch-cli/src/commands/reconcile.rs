//! Match command implementation
//!
//! Matches one chain of a limb onto the other in a scene document and
//! writes the updated scene.

use std::process::ExitCode;

use anyhow::Result;
use colored::Colorize;
use limbswitch_core::RigSettings;
use limbswitch_rig::memory::MemoryScene;
use limbswitch_rig::{reconcile, Confirm, Direction, ReconcileOptions, TimelineReader};

use super::{format_vec3, report_rig_error};
use crate::input::{limb_from_args, load_scene, load_settings, save_scene};

/// Limb selection shared by the scene commands.
#[derive(Debug, Clone, Default)]
pub struct LimbArgs {
    /// Limb kind.
    pub limb: String,
    /// Side token.
    pub side: Option<String>,
    /// Namespace of the rig instance.
    pub namespace: Option<String>,
}

/// Scene input and output shared by the scene commands.
#[derive(Debug, Clone, Default)]
pub struct SceneArgs {
    /// Scene document to read.
    pub scene: String,
    /// Where to write the result (default: overwrite `scene`).
    pub out: Option<String>,
    /// Settings file.
    pub settings: Option<String>,
}

impl SceneArgs {
    pub(crate) fn load(&self) -> Result<(MemoryScene, RigSettings)> {
        let settings = load_settings(self.settings.as_deref())?;
        let scene = load_scene(&self.scene)?;
        Ok((scene, settings))
    }

    pub(crate) fn save(&self, scene: &MemoryScene) -> Result<()> {
        let path = self.out.as_deref().unwrap_or(&self.scene);
        save_scene(scene, path)?;
        println!("{} Wrote {}", "SUCCESS".green().bold(), path);
        Ok(())
    }
}

/// Run the match command
///
/// # Arguments
/// * `io` - Scene and settings paths
/// * `limb` - Limb to match
/// * `direction` - `fk-to-ik` or `ik-to-fk`
/// * `options` - Keying, stump and parent-space handling
/// * `at` - Frame to match on (default: the scene's current frame)
/// * `confirm` - Answers the parent-space question
pub fn run(
    io: &SceneArgs,
    limb: &LimbArgs,
    direction: &str,
    options: &ReconcileOptions,
    at: Option<f64>,
    confirm: &mut dyn Confirm,
) -> Result<ExitCode> {
    let direction = direction.parse::<Direction>()?;
    let limb = limb_from_args(&limb.limb, limb.side.as_deref(), limb.namespace.as_deref())?;
    let (mut scene, settings) = io.load()?;
    if let Some(time) = at {
        scene.set_current_time(time);
    }

    println!(
        "{} {} ({}) at frame {}",
        "Matching:".cyan().bold(),
        limb,
        direction,
        scene.current_time()
    );

    let plan = match reconcile(&mut scene, &limb, direction, options, &settings, confirm) {
        Ok(plan) => plan,
        Err(err) => return Ok(report_rig_error(&err)),
    };

    println!("  {} {}", "writes".dimmed(), plan.writes.len());
    if !plan.keys.is_empty() {
        println!("  {} {}", "keys".dimmed(), plan.keys.len());
    }
    if let Some(pole) = plan.pole {
        println!("  {} {}", "pole".dimmed(), format_vec3(pole.position));
        if pole.degenerate {
            println!(
                "{} chain is nearly straight; check the pole control",
                "WARNING".yellow().bold()
            );
        }
    }

    io.save(&scene)?;
    Ok(ExitCode::SUCCESS)
}
