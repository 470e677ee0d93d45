//! Baking a match over the selected frame range.

use limbswitch_core::{LimbId, RigSettings};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{RigError, RigResult};
use crate::host::{Confirm, Scene};
use crate::reconcile::{reconcile, Direction, ReconcileOptions, SpacePolicy};

/// Frames keyed by a bake.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BakeReport {
    /// Limb baked.
    pub limb: LimbId,
    /// Match direction.
    pub direction: Direction,
    /// Frames matched and keyed, in order.
    pub frames: Vec<f64>,
}

/// Matches and keys a limb on every frame of the selected range.
///
/// The range end is exclusive and the playhead is left on it. The
/// parent-space question is asked at most once, on the first frame. A
/// failing frame stops the bake with the playhead on that frame; frames
/// already keyed stay keyed.
pub fn bake<S, C>(
    scene: &mut S,
    limb: &LimbId,
    direction: Direction,
    options: &ReconcileOptions,
    settings: &RigSettings,
    confirm: &mut C,
) -> RigResult<BakeReport>
where
    S: Scene + ?Sized,
    C: Confirm + ?Sized,
{
    let (start, end) = match scene.selected_range() {
        Some((start, end)) if end - start > 1.0 => (start, end),
        _ => return Err(RigError::NoFrameRangeSelected),
    };

    let mut options = options.clone().with_key(true);
    let mut frames = Vec::new();
    let mut current = start;
    scene.set_current_time(current);
    while current < end {
        reconcile(scene, limb, direction, &options, settings, confirm)?;
        options.space_policy = SpacePolicy::Proceed;
        debug!(limb = %limb, frame = current, "baked frame");
        frames.push(current);
        current += 1.0;
        scene.set_current_time(current);
        scene.refresh();
    }

    info!(limb = %limb, %direction, start, end, frames = frames.len(), "bake complete");
    Ok(BakeReport {
        limb: limb.clone(),
        direction,
        frames,
    })
}

/// Bakes the IK controls onto the FK animation.
pub fn bake_ik_to_fk<S, C>(
    scene: &mut S,
    limb: &LimbId,
    options: &ReconcileOptions,
    settings: &RigSettings,
    confirm: &mut C,
) -> RigResult<BakeReport>
where
    S: Scene + ?Sized,
    C: Confirm + ?Sized,
{
    bake(scene, limb, Direction::IkToFk, options, settings, confirm)
}

/// Bakes the FK controls onto the IK animation.
pub fn bake_fk_to_ik<S, C>(
    scene: &mut S,
    limb: &LimbId,
    options: &ReconcileOptions,
    settings: &RigSettings,
    confirm: &mut C,
) -> RigResult<BakeReport>
where
    S: Scene + ?Sized,
    C: Confirm + ?Sized,
{
    bake(scene, limb, Direction::FkToIk, options, settings, confirm)
}
