//! Error types for limb naming, geometry and settings.

use thiserror::Error;

use crate::geometry::Axis;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// An error that carries a stable code for programmatic handling.
///
/// Implemented by the error types of every limbswitch crate so callers can
/// report failures uniformly.
pub trait CodedError: std::error::Error {
    /// Get the error code for reporting.
    ///
    /// Returns a static string like "CORE_001" or "RIG_004". These codes are
    /// stable across releases.
    fn code(&self) -> &'static str;

    /// Get a human-readable message describing the error.
    fn message(&self) -> String {
        self.to_string()
    }

    /// Get the error category for grouping related errors.
    fn category(&self) -> &'static str;
}

/// Errors raised by the geometry kernel.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    /// Aim and pole were assigned to the same local axis.
    #[error("aim axis and pole axis cannot both be {axis}")]
    SameAxis { axis: Axis },

    /// A direction vector has zero length.
    #[error("{what} direction has zero length")]
    ZeroVector { what: &'static str },

    /// The aim and pole directions are parallel, so no pole plane exists.
    #[error("aim and pole directions are parallel")]
    ParallelVectors,
}

/// Errors raised by the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Side token string is not one of the recognized aliases.
    #[error("unrecognized side '{value}' (expected l/left or r/right or c/centre)")]
    InvalidSide { value: String },

    /// Limb kind string is not `arm` or `leg`.
    #[error("unrecognized limb '{value}' (expected 'arm' or 'leg')")]
    InvalidLimb { value: String },

    /// Role name is not part of the role vocabulary.
    #[error("unrecognized role '{value}'")]
    InvalidRole { value: String },

    /// Invalid geometric configuration.
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// Settings document could not be parsed.
    #[error("failed to parse rig settings: {0}")]
    ParseSettings(#[source] serde_json::Error),

    /// Settings document declares a version this build does not understand.
    #[error("unsupported settings version {found} (expected {expected})")]
    UnsupportedSettingsVersion { found: u32, expected: u32 },

    /// A settings value is outside its valid range.
    #[error("invalid setting '{field}': {reason}")]
    InvalidSetting { field: &'static str, reason: String },
}

impl CoreError {
    /// Creates a new invalid setting error.
    pub fn invalid_setting(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidSetting {
            field,
            reason: reason.into(),
        }
    }
}

impl CodedError for CoreError {
    fn code(&self) -> &'static str {
        match self {
            CoreError::InvalidSide { .. } => "CORE_001",
            CoreError::InvalidLimb { .. } => "CORE_002",
            CoreError::InvalidRole { .. } => "CORE_003",
            CoreError::Geometry(GeometryError::SameAxis { .. }) => "CORE_004",
            CoreError::Geometry(GeometryError::ZeroVector { .. }) => "CORE_005",
            CoreError::Geometry(GeometryError::ParallelVectors) => "CORE_006",
            CoreError::ParseSettings(_) => "CORE_007",
            CoreError::UnsupportedSettingsVersion { .. } => "CORE_008",
            CoreError::InvalidSetting { .. } => "CORE_009",
        }
    }

    fn category(&self) -> &'static str {
        "core"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::InvalidSide {
            value: "up".into(),
        };
        assert!(err.to_string().contains("'up'"));

        let err = CoreError::from(GeometryError::SameAxis { axis: Axis::Y });
        assert_eq!(err.to_string(), "aim axis and pole axis cannot both be Y");

        let err = CoreError::invalid_setting("pole.amplitude", "must be positive");
        assert!(err.to_string().contains("pole.amplitude"));
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            CoreError::InvalidLimb {
                value: "tail".into()
            }
            .code(),
            "CORE_002"
        );
        assert_eq!(
            CoreError::from(GeometryError::ParallelVectors).code(),
            "CORE_006"
        );
        assert_eq!(CoreError::InvalidRole { value: "x".into() }.category(), "core");
    }
}
