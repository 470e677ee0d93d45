//! Resolve command implementation
//!
//! Prints the concrete node names a limb resolves to.

use std::process::ExitCode;

use anyhow::{Context, Result};
use colored::Colorize;
use limbswitch_core::naming::{resolve_limb, settings_control};
use limbswitch_core::{LimbId, ResolvedNames, RigSettings};
use serde::Serialize;

use crate::input::{limb_from_args, load_settings};

/// Every table resolved for one limb.
#[derive(Debug, Serialize)]
pub struct ResolvedLimb {
    pub limb: LimbId,
    pub fk_joints: ResolvedNames,
    pub ik_joints: ResolvedNames,
    pub fk_controls: ResolvedNames,
    pub ik_controls: ResolvedNames,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings_control: Option<String>,
}

/// Resolves the limb's roles in every table.
pub fn resolve_all(limb: &LimbId, settings: &RigSettings) -> ResolvedLimb {
    let naming = &settings.naming;
    let kind = limb.kind;
    let mut control_roles = vec![kind.pole_role()];
    control_roles.extend(kind.targets());
    control_roles.extend_from_slice(kind.terminal_roles());
    ResolvedLimb {
        limb: limb.clone(),
        fk_joints: resolve_limb(&naming.fk_joints.only(&kind.targets()), limb, &naming.side_tokens),
        ik_joints: resolve_limb(&naming.ik_joints.only(&kind.targets()), limb, &naming.side_tokens),
        fk_controls: resolve_limb(&naming.fk_controls.only(&kind.targets()), limb, &naming.side_tokens),
        ik_controls: resolve_limb(&naming.ik_controls.only(&control_roles), limb, &naming.side_tokens),
        settings_control: settings_control(naming, limb),
    }
}

/// Run the resolve command
///
/// # Arguments
/// * `limb` - Limb kind (`arm` or `leg`)
/// * `side` - Optional side token (`L`, `right`, ...)
/// * `namespace` - Optional namespace
/// * `settings_path` - Optional settings file
/// * `json` - Print JSON instead of a table
pub fn run(
    limb: &str,
    side: Option<&str>,
    namespace: Option<&str>,
    settings_path: Option<&str>,
    json: bool,
) -> Result<ExitCode> {
    let settings = load_settings(settings_path)?;
    let limb = limb_from_args(limb, side, namespace)?;
    let resolved = resolve_all(&limb, &settings);

    if json {
        let out = serde_json::to_string_pretty(&resolved).context("Failed to serialize names")?;
        println!("{}", out);
        return Ok(ExitCode::SUCCESS);
    }

    println!("{} {}", "Limb:".cyan().bold(), limb);
    let tables = [
        ("fk joints", &resolved.fk_joints),
        ("ik joints", &resolved.ik_joints),
        ("fk controls", &resolved.fk_controls),
        ("ik controls", &resolved.ik_controls),
    ];
    for (title, names) in tables {
        println!("  {}", title.bold());
        for (role, name) in names.iter() {
            println!("    {:<10} {}", role.as_str().dimmed(), name);
        }
    }
    if let Some(control) = &resolved.settings_control {
        println!("  {} {}", "settings".bold(), control);
    }
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use limbswitch_core::{LimbKind, Namespace, Role, Side};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_resolve_all_leg() {
        let limb = LimbId::new(LimbKind::Leg, Some(Side::Left)).with_namespace(Namespace::new("rig"));
        let resolved = resolve_all(&limb, &RigSettings::default());
        assert_eq!(resolved.fk_joints.get(Role::Knee), Some("rig:L_legLwrFK_drv"));
        assert_eq!(resolved.ik_controls.get(Role::Heel), Some("rig:L_heel_CTRL"));
        assert!(!resolved.ik_controls.contains(Role::Shoulder));
        assert_eq!(resolved.settings_control.as_deref(), Some("rig:L_LegSetting_CTRL"));
    }

    #[test]
    fn test_run_rejects_bad_side() {
        assert!(run("arm", Some("up"), None, None, true).is_err());
        assert_eq!(run("arm", Some("L"), None, None, true).unwrap(), ExitCode::SUCCESS);
    }
}
