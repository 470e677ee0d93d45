//! Loading and saving command inputs.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use limbswitch_core::{LimbId, Namespace, RigSettings, Vec3};
use limbswitch_rig::memory::MemoryScene;

/// Loads rig settings from a JSON file, or the defaults when no path is given.
pub fn load_settings(path: Option<&str>) -> Result<RigSettings> {
    let Some(path) = path else {
        return Ok(RigSettings::default());
    };
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings file: {}", path))?;
    RigSettings::from_json(&content).with_context(|| format!("Invalid settings file: {}", path))
}

/// Loads a scene document.
pub fn load_scene(path: &str) -> Result<MemoryScene> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read scene file: {}", path))?;
    MemoryScene::from_json(&content).with_context(|| format!("Failed to parse scene: {}", path))
}

/// Writes a scene document, creating parent directories as needed.
pub fn save_scene(scene: &MemoryScene, path: &str) -> Result<()> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
    }
    let json = scene.to_json_pretty().context("Failed to serialize scene")?;
    fs::write(path, json).with_context(|| format!("Failed to write scene: {}", path))
}

/// Builds a limb id from command-line strings.
pub fn limb_from_args(limb: &str, side: Option<&str>, namespace: Option<&str>) -> Result<LimbId> {
    let id = LimbId::parse(limb, side)?;
    Ok(match namespace {
        Some(ns) => id.with_namespace(Namespace::new(ns)),
        None => id,
    })
}

/// Parses `x,y,z`.
pub fn parse_vec3(value: &str) -> Result<Vec3> {
    let parts: Vec<&str> = value.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        bail!("expected three comma-separated numbers, got '{}'", value);
    }
    let mut out = [0.0; 3];
    for (slot, part) in out.iter_mut().zip(&parts) {
        *slot = part
            .parse::<f64>()
            .with_context(|| format!("invalid number '{}' in '{}'", part, value))?;
    }
    Ok(out)
}
