//! Role maps and the default rig name tables.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::side::SideTokens;
use crate::error::CoreError;
use crate::limb::{LimbKind, Role};

// =============================================================================
// Default Name Tables
// =============================================================================

/// FK driver joints (read when matching IK controls onto the FK pose).
pub const DEFAULT_FK_JOINTS: &[(Role, &str)] = &[
    (Role::Shoulder, "armUprFK_drv"),
    (Role::Elbow, "armLwrFK_drv"),
    (Role::Wrist, "armWristFK_drv"),
    (Role::Hip, "legUprFK_drv"),
    (Role::Knee, "legLwrFK_drv"),
    (Role::Ankle, "legAnkleFK_drv"),
];

/// IK driver joints (read when matching FK controls onto the IK pose).
pub const DEFAULT_IK_JOINTS: &[(Role, &str)] = &[
    (Role::Shoulder, "armUprIK_drv"),
    (Role::Elbow, "armLwrIK_drv"),
    (Role::Wrist, "armWristIK_drv"),
    (Role::Hip, "legUprIK_drv"),
    (Role::Knee, "legLwrIK_drv"),
    (Role::Ankle, "legAnkleIK_drv"),
];

/// FK animation controls.
pub const DEFAULT_FK_CONTROLS: &[(Role, &str)] = &[
    (Role::Shoulder, "ArmUprFK_CTRL"),
    (Role::Elbow, "ArmLwrFK_CTRL"),
    (Role::Wrist, "ArmWristFK_CTRL"),
    (Role::Hip, "LegUprFK_CTRL"),
    (Role::Knee, "LegLwrFK_CTRL"),
    (Role::Ankle, "LegAnkleFK_CTRL"),
];

/// IK animation controls, including pole vectors and foot controls.
pub const DEFAULT_IK_CONTROLS: &[(Role, &str)] = &[
    (Role::Shoulder, "ArmUprIK_CTRL"),
    (Role::Elbow, "ArmElbow_CTRL"),
    (Role::ElbowPv, "ArmPV_CTRL"),
    (Role::Wrist, "ArmWristIK_CTRL"),
    (Role::Hip, "LegUprIK_CTRL"),
    (Role::Knee, "LegKnee_CTRL"),
    (Role::KneePv, "LegPV_CTRL"),
    (Role::Ankle, "LegAnkleIK_CTRL"),
    (Role::Toe, "toe_CTRL"),
    (Role::Ball, "ball_CTRL"),
    (Role::Heel, "heel_CTRL"),
];

/// Settings controls carrying the blend attribute.
pub const DEFAULT_SETTINGS_CONTROLS: &[(LimbKind, &str)] = &[
    (LimbKind::Arm, "ArmSetting_CTRL"),
    (LimbKind::Leg, "LegSetting_CTRL"),
];

/// Blend attribute name on the settings controls.
pub const DEFAULT_BLEND_ATTRIBUTE: &str = "ikBlend";

// =============================================================================
// Role Map
// =============================================================================

/// Mapping from abstract role to a node name template.
///
/// Always owned: building one from the default tables copies them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleMap(BTreeMap<Role, String>);

impl RoleMap {
    /// Creates an empty role map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an owned map from a static table.
    pub fn from_pairs(pairs: &[(Role, &str)]) -> Self {
        Self(
            pairs
                .iter()
                .map(|(role, name)| (*role, (*name).to_string()))
                .collect(),
        )
    }

    /// Adds or replaces a role entry.
    pub fn with(mut self, role: Role, name: impl Into<String>) -> Self {
        self.0.insert(role, name.into());
        self
    }

    /// Adds or replaces a role entry in place.
    pub fn insert(&mut self, role: Role, name: impl Into<String>) -> Option<String> {
        self.0.insert(role, name.into())
    }

    /// Looks up the template for a role.
    pub fn get(&self, role: Role) -> Option<&str> {
        self.0.get(&role).map(String::as_str)
    }

    /// Whether a role is present.
    pub fn contains(&self, role: Role) -> bool {
        self.0.contains_key(&role)
    }

    /// Copy of this map without the given roles.
    pub fn without(&self, roles: &[Role]) -> RoleMap {
        Self(
            self.0
                .iter()
                .filter(|(role, _)| !roles.contains(role))
                .map(|(role, name)| (*role, name.clone()))
                .collect(),
        )
    }

    /// Copy of this map restricted to the given roles.
    pub fn only(&self, roles: &[Role]) -> RoleMap {
        Self(
            self.0
                .iter()
                .filter(|(role, _)| roles.contains(role))
                .map(|(role, name)| (*role, name.clone()))
                .collect(),
        )
    }

    /// Iterates entries in role order.
    pub fn iter(&self) -> impl Iterator<Item = (Role, &str)> {
        self.0.iter().map(|(role, name)| (*role, name.as_str()))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the map is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// =============================================================================
// Rig Naming
// =============================================================================

/// Complete naming configuration of a rig.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RigNaming {
    /// FK driver joints.
    #[serde(default = "default_fk_joints")]
    pub fk_joints: RoleMap,
    /// IK driver joints.
    #[serde(default = "default_ik_joints")]
    pub ik_joints: RoleMap,
    /// FK controls.
    #[serde(default = "default_fk_controls")]
    pub fk_controls: RoleMap,
    /// IK controls.
    #[serde(default = "default_ik_controls")]
    pub ik_controls: RoleMap,
    /// Settings control per limb kind.
    #[serde(default = "default_settings_controls")]
    pub settings_controls: BTreeMap<LimbKind, String>,
    /// Blend attribute on the settings control.
    #[serde(default = "default_blend_attribute")]
    pub blend_attribute: String,
    /// Side tokens.
    #[serde(default)]
    pub side_tokens: SideTokens,
}

fn default_fk_joints() -> RoleMap {
    RoleMap::from_pairs(DEFAULT_FK_JOINTS)
}

fn default_ik_joints() -> RoleMap {
    RoleMap::from_pairs(DEFAULT_IK_JOINTS)
}

fn default_fk_controls() -> RoleMap {
    RoleMap::from_pairs(DEFAULT_FK_CONTROLS)
}

fn default_ik_controls() -> RoleMap {
    RoleMap::from_pairs(DEFAULT_IK_CONTROLS)
}

fn default_settings_controls() -> BTreeMap<LimbKind, String> {
    DEFAULT_SETTINGS_CONTROLS
        .iter()
        .map(|(kind, name)| (*kind, (*name).to_string()))
        .collect()
}

fn default_blend_attribute() -> String {
    DEFAULT_BLEND_ATTRIBUTE.to_string()
}

impl Default for RigNaming {
    fn default() -> Self {
        Self {
            fk_joints: default_fk_joints(),
            ik_joints: default_ik_joints(),
            fk_controls: default_fk_controls(),
            ik_controls: default_ik_controls(),
            settings_controls: default_settings_controls(),
            blend_attribute: default_blend_attribute(),
            side_tokens: SideTokens::default(),
        }
    }
}

impl RigNaming {
    /// Checks that every limb kind can be resolved by these tables.
    ///
    /// Terminal foot roles are optional and not checked.
    pub fn validate(&self) -> Result<(), CoreError> {
        for kind in [LimbKind::Arm, LimbKind::Leg] {
            let chain = kind.targets();
            let tables: [(&'static str, &RoleMap); 4] = [
                ("naming.fk_joints", &self.fk_joints),
                ("naming.ik_joints", &self.ik_joints),
                ("naming.fk_controls", &self.fk_controls),
                ("naming.ik_controls", &self.ik_controls),
            ];
            for (field, table) in tables {
                if let Some(role) = chain.iter().find(|role| !table.contains(**role)) {
                    return Err(CoreError::invalid_setting(
                        field,
                        format!("missing {} role '{}'", kind, role),
                    ));
                }
            }
            if !self.ik_controls.contains(kind.pole_role()) {
                return Err(CoreError::invalid_setting(
                    "naming.ik_controls",
                    format!("missing {} role '{}'", kind, kind.pole_role()),
                ));
            }
            if !self.settings_controls.contains_key(&kind) {
                return Err(CoreError::invalid_setting(
                    "naming.settings_controls",
                    format!("missing settings control for {}", kind),
                ));
            }
        }
        if self.blend_attribute.is_empty() {
            return Err(CoreError::invalid_setting(
                "naming.blend_attribute",
                "cannot be empty",
            ));
        }
        Ok(())
    }
}
