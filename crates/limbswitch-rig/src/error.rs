//! Error types for the rig engine.

use limbswitch_core::{CodedError, CoreError, GeometryError, Role};
use thiserror::Error;

/// Result type for rig operations.
pub type RigResult<T> = Result<T, RigError>;

/// Failures reported by a host scene implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    /// The node does not exist (or no longer exists).
    #[error("node '{name}' not found in scene")]
    NodeNotFound { name: String },

    /// The node exists but has no such attribute.
    #[error("attribute '{node}.{attribute}' not found")]
    AttributeNotFound { node: String, attribute: String },

    /// The host refused the operation (locked channel, read-only node, ...).
    #[error("host rejected operation on '{node}': {message}")]
    Rejected { node: String, message: String },
}

impl HostError {
    /// Creates a new node-not-found error.
    pub fn node_not_found(name: impl Into<String>) -> Self {
        Self::NodeNotFound { name: name.into() }
    }

    /// Creates a new attribute-not-found error.
    pub fn attribute_not_found(node: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::AttributeNotFound {
            node: node.into(),
            attribute: attribute.into(),
        }
    }
}

/// Errors that can occur while matching, baking or toggling a limb.
#[derive(Debug, Error)]
pub enum RigError {
    /// Bad side, limb, axis pair, blend value or naming table.
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    /// A role required by the limb does not resolve to a scene node.
    #[error("{limb}: required {role} node '{name}' does not exist")]
    MissingNode {
        limb: String,
        role: Role,
        name: String,
    },

    /// Aim/pole directions are parallel or zero length.
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(#[source] GeometryError),

    /// A control is in a non-default parent space and the user declined to
    /// match anyway.
    #[error("{limb}: '{node}' is in hand/foot space ({attribute} is on); match declined")]
    AmbiguousSpace {
        limb: String,
        node: String,
        attribute: String,
    },

    /// Bake requested without a frame range wider than one frame.
    #[error("no frame range selected (select at least two frames on the timeline)")]
    NoFrameRangeSelected,

    /// The host scene failed.
    #[error(transparent)]
    Host(#[from] HostError),
}

impl RigError {
    /// Creates a new invalid argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}

impl From<GeometryError> for RigError {
    fn from(err: GeometryError) -> Self {
        match err {
            GeometryError::SameAxis { .. } => RigError::invalid_argument(err.to_string()),
            other => RigError::DegenerateGeometry(other),
        }
    }
}

impl From<CoreError> for RigError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Geometry(geometry) => geometry.into(),
            other => RigError::invalid_argument(other.to_string()),
        }
    }
}

impl CodedError for RigError {
    fn code(&self) -> &'static str {
        match self {
            RigError::InvalidArgument { .. } => "RIG_001",
            RigError::MissingNode { .. } => "RIG_002",
            RigError::DegenerateGeometry(_) => "RIG_003",
            RigError::AmbiguousSpace { .. } => "RIG_004",
            RigError::NoFrameRangeSelected => "RIG_005",
            RigError::Host(_) => "RIG_006",
        }
    }

    fn category(&self) -> &'static str {
        "rig"
    }
}
