//! Pole-vector reconstruction from an FK chain.
//!
//! An FK chain has no pole vector, so one is estimated: starting at the
//! middle joint, step away from both neighbouring joints by `amplitude`
//! along each unit direction. The result lies in the bend plane on the
//! outside of the bend, which keeps the IK solution where the FK pose left
//! it. This is a heuristic; many pole positions produce the same solve.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::geometry::{add, distance, length, normalize, scale, subtract, Vec3};
use crate::limb::LimbKind;

/// Segments shorter than this make the chain degenerate.
const MIN_SEGMENT_LENGTH: f64 = 1e-9;

/// Reconstructed pole-vector target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoleVector {
    /// World position for the pole control.
    pub position: Vec3,
    /// Offset from the middle joint to `position`.
    pub offset: Vec3,
    /// The chain is straight (or has a zero-length segment), so the offset
    /// is tiny and the IK solve may flip.
    pub degenerate: bool,
}

impl PoleVector {
    /// Distance between the pole and the middle joint.
    pub fn offset_length(&self) -> f64 {
        length(self.offset)
    }
}

/// Reconstructs a pole position from root, middle and end joint positions.
///
/// `|offset| = 2 * amplitude * cos(θ / 2)` where θ is the joint angle at
/// `mid`. A straight chain cancels the two directions and yields `mid`
/// itself; that result is flagged `degenerate` using a ratio of 0.01.
pub fn reconstruct_pole(root: Vec3, mid: Vec3, end: Vec3, amplitude: f64) -> PoleVector {
    reconstruct_pole_with_ratio(root, mid, end, amplitude, default_min_offset_ratio())
}

/// Like [`reconstruct_pole`] with an explicit degeneracy ratio.
pub fn reconstruct_pole_with_ratio(
    root: Vec3,
    mid: Vec3,
    end: Vec3,
    amplitude: f64,
    min_offset_ratio: f64,
) -> PoleVector {
    let line_a = normalize(subtract(end, mid));
    let line_b = normalize(subtract(root, mid));
    let offset = scale(add(scale(line_a, amplitude), scale(line_b, amplitude)), -1.0);
    let position = add(mid, offset);

    let short_segment =
        distance(end, mid) < MIN_SEGMENT_LENGTH || distance(root, mid) < MIN_SEGMENT_LENGTH;
    let degenerate = short_segment || length(offset) < min_offset_ratio * amplitude.abs();

    PoleVector {
        position,
        offset,
        degenerate,
    }
}

// =============================================================================
// Pole Settings
// =============================================================================

/// Tuning for pole-vector reconstruction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PoleSettings {
    /// Throw distance for arms, in scene units.
    #[serde(default = "default_amplitude")]
    pub amplitude: f64,
    /// Multiplier applied to `amplitude` for legs (feet need a longer throw).
    #[serde(default = "default_leg_scale")]
    pub leg_scale: f64,
    /// Offsets shorter than `amplitude * min_offset_ratio` are degenerate.
    #[serde(default = "default_min_offset_ratio")]
    pub min_offset_ratio: f64,
}

fn default_amplitude() -> f64 {
    40.0
}

fn default_leg_scale() -> f64 {
    1.2
}

fn default_min_offset_ratio() -> f64 {
    0.01
}

impl Default for PoleSettings {
    fn default() -> Self {
        Self {
            amplitude: default_amplitude(),
            leg_scale: default_leg_scale(),
            min_offset_ratio: default_min_offset_ratio(),
        }
    }
}

impl PoleSettings {
    /// Sets the base amplitude.
    pub fn with_amplitude(mut self, amplitude: f64) -> Self {
        self.amplitude = amplitude;
        self
    }

    /// Amplitude used for a limb kind.
    pub fn amplitude_for(&self, kind: LimbKind) -> f64 {
        match kind {
            LimbKind::Arm => self.amplitude,
            LimbKind::Leg => self.amplitude * self.leg_scale,
        }
    }

    /// Reconstructs the pole for a limb kind using these settings.
    pub fn reconstruct(&self, kind: LimbKind, root: Vec3, mid: Vec3, end: Vec3) -> PoleVector {
        reconstruct_pole_with_ratio(
            root,
            mid,
            end,
            self.amplitude_for(kind),
            self.min_offset_ratio,
        )
    }

    /// Validates the settings.
    pub fn validate(&self) -> Result<(), CoreError> {
        if !(self.amplitude.is_finite() && self.amplitude > 0.0) {
            return Err(CoreError::invalid_setting(
                "pole.amplitude",
                format!("must be a positive number, got {}", self.amplitude),
            ));
        }
        if !(self.leg_scale.is_finite() && self.leg_scale > 0.0) {
            return Err(CoreError::invalid_setting(
                "pole.leg_scale",
                format!("must be a positive number, got {}", self.leg_scale),
            ));
        }
        if !(0.0..1.0).contains(&self.min_offset_ratio) {
            return Err(CoreError::invalid_setting(
                "pole.min_offset_ratio",
                format!("must be in [0, 1), got {}", self.min_offset_ratio),
            ));
        }
        Ok(())
    }
}
