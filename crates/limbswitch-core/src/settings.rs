//! Serializable rig settings.
//!
//! Every field has a default matching the standard biped rig, so an empty
//! JSON object is a complete settings document.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::geometry::Vec3;
use crate::limb::LimbKind;
use crate::naming::{RigNaming, Side};
use crate::pole::PoleSettings;

/// Current settings document version.
pub const SETTINGS_VERSION: u32 = 1;

// =============================================================================
// Foot Compensation
// =============================================================================

/// Relative rotation applied to the IK foot control after snapping it to the
/// FK ankle.
///
/// The IK foot control is world-aligned while the FK ankle carries the
/// joint-orient of the skeleton, so a fixed correction is added afterwards.
/// Mirrored skeletons flip the joint-orient of the right side, which the
/// mirror terms account for. The defaults suit one joint-orient convention;
/// rigs oriented differently must override them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FootCompensation {
    /// Apply compensation at all.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Correction for the left (and centre) side, in degrees.
    #[serde(default = "default_foot_offset")]
    pub offset: Vec3,
    /// Added to X for the right side.
    #[serde(default = "default_mirror_x_offset")]
    pub mirror_x_offset: f64,
    /// Z of the right side is wrapped into `[0, mirror_z_wrap)`; 0 disables.
    #[serde(default = "default_mirror_z_wrap")]
    pub mirror_z_wrap: f64,
}

fn default_true() -> bool {
    true
}

fn default_foot_offset() -> Vec3 {
    [0.0, 0.0, 90.0]
}

fn default_mirror_x_offset() -> f64 {
    -180.0
}

fn default_mirror_z_wrap() -> f64 {
    360.0
}

impl Default for FootCompensation {
    fn default() -> Self {
        Self {
            enabled: true,
            offset: default_foot_offset(),
            mirror_x_offset: default_mirror_x_offset(),
            mirror_z_wrap: default_mirror_z_wrap(),
        }
    }
}

impl FootCompensation {
    /// Compensation disabled.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Sets the left-side correction.
    pub fn with_offset(mut self, offset: Vec3) -> Self {
        self.offset = offset;
        self
    }

    /// Correction for a side, or `None` when disabled.
    pub fn for_side(&self, side: Option<Side>) -> Option<Vec3> {
        if !self.enabled {
            return None;
        }
        let [x, y, z] = self.offset;
        match side {
            Some(Side::Right) => {
                let z = if self.mirror_z_wrap > 0.0 {
                    z.rem_euclid(self.mirror_z_wrap)
                } else {
                    z
                };
                Some([x + self.mirror_x_offset, y, z])
            }
            _ => Some(self.offset),
        }
    }
}

// =============================================================================
// Space Settings
// =============================================================================

/// Parent-space attributes checked before an IK match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SpaceSettings {
    /// Attribute that enables the hand/foot control space, per limb kind.
    #[serde(default = "default_parent_space_attributes")]
    pub parent_space_attributes: BTreeMap<LimbKind, String>,
    /// Attribute values above this count as "enabled".
    #[serde(default = "default_space_threshold")]
    pub threshold: f64,
}

fn default_parent_space_attributes() -> BTreeMap<LimbKind, String> {
    BTreeMap::from([
        (LimbKind::Arm, "handSpace".to_string()),
        (LimbKind::Leg, "footSpace".to_string()),
    ])
}

fn default_space_threshold() -> f64 {
    0.5
}

impl Default for SpaceSettings {
    fn default() -> Self {
        Self {
            parent_space_attributes: default_parent_space_attributes(),
            threshold: default_space_threshold(),
        }
    }
}

impl SpaceSettings {
    /// Attribute to check for a limb kind, if any.
    pub fn attribute_for(&self, kind: LimbKind) -> Option<&str> {
        self.parent_space_attributes.get(&kind).map(String::as_str)
    }
}

// =============================================================================
// Selection Markers
// =============================================================================

/// Substrings used to infer a limb from a selected control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SelectionMarkers {
    /// Selected nodes must contain this to count as controls.
    #[serde(default = "default_control_marker")]
    pub control_marker: String,
    /// Substring of the long (path) name identifying each limb kind.
    #[serde(default = "default_part_markers")]
    pub part_markers: BTreeMap<LimbKind, String>,
}

fn default_control_marker() -> String {
    "CTRL".to_string()
}

fn default_part_markers() -> BTreeMap<LimbKind, String> {
    BTreeMap::from([
        (LimbKind::Arm, "Arm_null".to_string()),
        (LimbKind::Leg, "Leg_null".to_string()),
    ])
}

impl Default for SelectionMarkers {
    fn default() -> Self {
        Self {
            control_marker: default_control_marker(),
            part_markers: default_part_markers(),
        }
    }
}

impl SelectionMarkers {
    /// Limb kind whose part marker occurs in `long_name`.
    pub fn kind_for(&self, long_name: &str) -> Option<LimbKind> {
        self.part_markers
            .iter()
            .find(|(_, marker)| !marker.is_empty() && long_name.contains(marker.as_str()))
            .map(|(kind, _)| *kind)
    }
}

// =============================================================================
// Rig Settings
// =============================================================================

/// Everything the switcher needs to know about a rig.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RigSettings {
    /// Settings document version.
    #[serde(default = "default_version")]
    pub version: u32,
    /// Node naming.
    #[serde(default)]
    pub naming: RigNaming,
    /// Pole reconstruction.
    #[serde(default)]
    pub pole: PoleSettings,
    /// Foot orientation compensation.
    #[serde(default)]
    pub foot: FootCompensation,
    /// Parent-space safety check.
    #[serde(default)]
    pub spaces: SpaceSettings,
    /// Selection-driven toggling.
    #[serde(default)]
    pub selection: SelectionMarkers,
}

fn default_version() -> u32 {
    SETTINGS_VERSION
}

impl Default for RigSettings {
    fn default() -> Self {
        Self {
            version: SETTINGS_VERSION,
            naming: RigNaming::default(),
            pole: PoleSettings::default(),
            foot: FootCompensation::default(),
            spaces: SpaceSettings::default(),
            selection: SelectionMarkers::default(),
        }
    }
}

impl RigSettings {
    /// Parses and validates a settings document.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let settings: RigSettings = serde_json::from_str(json).map_err(CoreError::ParseSettings)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Serializes to pretty JSON.
    pub fn to_json_pretty(&self) -> CoreResult<String> {
        serde_json::to_string_pretty(self).map_err(CoreError::ParseSettings)
    }

    /// Validates every section.
    pub fn validate(&self) -> CoreResult<()> {
        if self.version != SETTINGS_VERSION {
            return Err(CoreError::UnsupportedSettingsVersion {
                found: self.version,
                expected: SETTINGS_VERSION,
            });
        }
        self.naming.validate()?;
        self.pole.validate()?;
        if !self.foot.offset.iter().all(|v| v.is_finite()) {
            return Err(CoreError::invalid_setting(
                "foot.offset",
                "must contain finite angles",
            ));
        }
        if !(0.0..=1.0).contains(&self.spaces.threshold) {
            return Err(CoreError::invalid_setting(
                "spaces.threshold",
                format!("must be in [0, 1], got {}", self.spaces.threshold),
            ));
        }
        Ok(())
    }
}
