//! Limb kinds, joint roles and limb identity.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::naming::{Namespace, Side};

// =============================================================================
// Roles
// =============================================================================

/// Abstract role a node plays in a limb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Arm root.
    Shoulder,
    /// Arm middle joint.
    Elbow,
    /// Arm end.
    Wrist,
    /// Leg root.
    Hip,
    /// Leg middle joint.
    Knee,
    /// Leg end.
    Ankle,
    /// Arm pole-vector control (IK only).
    ElbowPv,
    /// Leg pole-vector control (IK only).
    KneePv,
    /// Toe control (legs, IK only).
    Toe,
    /// Ball control (legs, IK only).
    Ball,
    /// Heel control (legs, IK only).
    Heel,
}

impl Role {
    /// Every role in declaration order.
    pub const ALL: [Role; 11] = [
        Role::Shoulder,
        Role::Elbow,
        Role::Wrist,
        Role::Hip,
        Role::Knee,
        Role::Ankle,
        Role::ElbowPv,
        Role::KneePv,
        Role::Toe,
        Role::Ball,
        Role::Heel,
    ];

    /// Returns the role as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Shoulder => "shoulder",
            Role::Elbow => "elbow",
            Role::Wrist => "wrist",
            Role::Hip => "hip",
            Role::Knee => "knee",
            Role::Ankle => "ankle",
            Role::ElbowPv => "elbow_pv",
            Role::KneePv => "knee_pv",
            Role::Toe => "toe",
            Role::Ball => "ball",
            Role::Heel => "heel",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| CoreError::InvalidRole {
                value: s.to_string(),
            })
    }
}

// =============================================================================
// Limb Kinds
// =============================================================================

/// The kind of limb being switched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LimbKind {
    /// Shoulder -> elbow -> wrist.
    Arm,
    /// Hip -> knee -> ankle, with optional toe/ball/heel controls.
    Leg,
}

impl LimbKind {
    /// Returns the limb kind as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            LimbKind::Arm => "arm",
            LimbKind::Leg => "leg",
        }
    }

    /// Ordered chain roles: root, mid, end.
    pub fn targets(&self) -> [Role; 3] {
        match self {
            LimbKind::Arm => [Role::Shoulder, Role::Elbow, Role::Wrist],
            LimbKind::Leg => [Role::Hip, Role::Knee, Role::Ankle],
        }
    }

    /// Root role of the chain.
    pub fn root(&self) -> Role {
        self.targets()[0]
    }

    /// Middle role of the chain.
    pub fn mid(&self) -> Role {
        self.targets()[1]
    }

    /// End role of the chain.
    pub fn end(&self) -> Role {
        self.targets()[2]
    }

    /// Pole-vector control role.
    pub fn pole_role(&self) -> Role {
        match self {
            LimbKind::Arm => Role::ElbowPv,
            LimbKind::Leg => Role::KneePv,
        }
    }

    /// Terminal controls outside the IK chain (legs only).
    pub fn terminal_roles(&self) -> &'static [Role] {
        match self {
            LimbKind::Arm => &[],
            LimbKind::Leg => &[Role::Toe, Role::Ball, Role::Heel],
        }
    }

    /// Whether the end control needs foot orientation compensation.
    pub fn compensates_end_rotation(&self) -> bool {
        matches!(self, LimbKind::Leg)
    }
}

impl fmt::Display for LimbKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LimbKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "arm" => Ok(LimbKind::Arm),
            "leg" => Ok(LimbKind::Leg),
            _ => Err(CoreError::InvalidLimb {
                value: s.to_string(),
            }),
        }
    }
}

// =============================================================================
// Limb Identity
// =============================================================================

/// Identifies one limb of one rig instance.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LimbId {
    /// Arm or leg.
    pub kind: LimbKind,
    /// Side of the body; `None` for a centre/asymmetrical limb.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub side: Option<Side>,
    /// Namespace of the rig instance.
    #[serde(default, skip_serializing_if = "Namespace::is_empty")]
    pub namespace: Namespace,
}

impl LimbId {
    /// Creates a limb id with no namespace.
    pub fn new(kind: LimbKind, side: Option<Side>) -> Self {
        Self {
            kind,
            side,
            namespace: Namespace::default(),
        }
    }

    /// Parses a limb id from user-facing strings.
    ///
    /// Validates both tokens before returning anything.
    pub fn parse(kind: &str, side: Option<&str>) -> Result<Self, CoreError> {
        let kind = kind.parse::<LimbKind>()?;
        let side = side.map(Side::parse).transpose()?;
        Ok(Self::new(kind, side))
    }

    /// Sets the namespace.
    pub fn with_namespace(mut self, namespace: Namespace) -> Self {
        self.namespace = namespace;
        self
    }
}

impl fmt::Display for LimbId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = self.side.map(|s| s.as_str()).unwrap_or("none");
        write!(f, "{}{}/{}", self.namespace, self.kind, side)
    }
}
