//! Body sides, side tokens and namespaces.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// =============================================================================
// Side
// =============================================================================

/// Side of the body a limb belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// Character left.
    Left,
    /// Character right.
    Right,
    /// Centre line or asymmetrical limb.
    Centre,
}

const LEFT_ALIASES: &[&str] = &["l", "left", "l_", "lft", "lt"];
const RIGHT_ALIASES: &[&str] = &["r", "right", "r_", "rgt", "rt"];
const CENTRE_ALIASES: &[&str] = &["c", "centre", "center", "c_", "ctr", "mid"];

impl Side {
    /// Parses a side flag, case-insensitively.
    ///
    /// Accepts the usual rigger shorthands (`l`, `LEFT`, `L_`, `lft`, ...).
    /// Anything else is rejected rather than treated as "no side".
    pub fn parse(value: &str) -> Result<Side, CoreError> {
        let lowered = value.trim().to_ascii_lowercase();
        let lowered = lowered.as_str();
        if LEFT_ALIASES.contains(&lowered) {
            Ok(Side::Left)
        } else if RIGHT_ALIASES.contains(&lowered) {
            Ok(Side::Right)
        } else if CENTRE_ALIASES.contains(&lowered) {
            Ok(Side::Centre)
        } else {
            Err(CoreError::InvalidSide {
                value: value.to_string(),
            })
        }
    }

    /// Returns the side as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
            Side::Centre => "centre",
        }
    }

    /// The opposite side. Centre mirrors onto itself.
    pub fn mirrored(&self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
            Side::Centre => Side::Centre,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Naming tokens prefixed to node names for each side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SideTokens {
    /// Token for the left side.
    #[serde(default = "default_left_token")]
    pub left: String,
    /// Token for the right side.
    #[serde(default = "default_right_token")]
    pub right: String,
    /// Token for centre limbs.
    #[serde(default)]
    pub centre: String,
}

fn default_left_token() -> String {
    "L_".to_string()
}

fn default_right_token() -> String {
    "R_".to_string()
}

impl Default for SideTokens {
    fn default() -> Self {
        Self {
            left: default_left_token(),
            right: default_right_token(),
            centre: String::new(),
        }
    }
}

impl SideTokens {
    /// Token for a side. No side resolves to the empty token.
    pub fn token(&self, side: Option<Side>) -> &str {
        match side {
            Some(Side::Left) => &self.left,
            Some(Side::Right) => &self.right,
            Some(Side::Centre) => &self.centre,
            None => "",
        }
    }

    /// Detects the side from a node's short name (namespace already removed).
    ///
    /// Only non-empty left/right tokens are considered.
    pub fn detect(&self, short_name: &str) -> Option<Side> {
        [(Side::Left, &self.left), (Side::Right, &self.right)]
            .into_iter()
            .find(|(_, token)| !token.is_empty() && short_name.starts_with(token.as_str()))
            .map(|(side, _)| side)
    }
}

// =============================================================================
// Namespace
// =============================================================================

/// Namespace prefix of a rig instance, stored with its `:` separator.
///
/// `Namespace::new("hero")` and `Namespace::new("hero:")` are equal; an empty
/// namespace renders as nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Namespace(String);

impl Namespace {
    /// Creates a namespace, normalizing the trailing separator.
    pub fn new(value: impl AsRef<str>) -> Self {
        let trimmed = value.as_ref().trim().trim_end_matches(':');
        if trimmed.is_empty() {
            Self(String::new())
        } else {
            Self(format!("{}:", trimmed))
        }
    }

    /// Returns the prefix including its separator (empty if none).
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the root namespace.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Splits a node name into its namespace and short name.
    pub fn split(name: &str) -> (Namespace, &str) {
        match name.rfind(':') {
            Some(idx) => (Namespace::new(&name[..idx]), &name[idx + 1..]),
            None => (Namespace::default(), name),
        }
    }
}

impl From<String> for Namespace {
    fn from(value: String) -> Self {
        Namespace::new(value)
    }
}

impl From<&str> for Namespace {
    fn from(value: &str) -> Self {
        Namespace::new(value)
    }
}

impl From<Namespace> for String {
    fn from(value: Namespace) -> Self {
        value.0
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
