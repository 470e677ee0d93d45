//! Pose snapshots and single-node helpers.

use limbswitch_core::geometry::{aim_matrix, degrees3, euler_from_matrix, subtract};
use limbswitch_core::{Axis, Vec3};
use tracing::debug;

use crate::error::{HostError, RigResult};
use crate::host::{Channels, Keyer, NodeHandle, TimelineReader, TransformProvider};

/// World transform of one node at capture time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseSnapshot {
    /// World translation.
    pub translation: Vec3,
    /// World rotation (degrees).
    pub rotation: Vec3,
    /// World rotate pivot.
    pub pivot: Vec3,
}

impl PoseSnapshot {
    /// Reads a node's world transform.
    pub fn capture<S>(scene: &S, node: &NodeHandle) -> Result<Self, HostError>
    where
        S: TransformProvider + ?Sized,
    {
        Ok(Self {
            translation: scene.world_translation(node)?,
            rotation: scene.world_rotation(node)?,
            pivot: scene.world_pivot(node)?,
        })
    }
}

/// Snaps a node to a world position and keys its transform at the current
/// frame.
pub fn match_and_key<S>(scene: &mut S, node: &NodeHandle, position: Vec3) -> RigResult<()>
where
    S: TransformProvider + Keyer + TimelineReader + ?Sized,
{
    scene.set_world_translation(node, position)?;
    let time = scene.current_time();
    scene.set_keyframe(node, Channels::TRANSFORM, time)?;
    debug!(node = %node, ?position, time, "matched and keyed");
    Ok(())
}

/// What an aim points at.
#[derive(Debug, Clone, PartialEq)]
pub enum AimTarget {
    /// The world position of another node.
    Node(NodeHandle),
    /// A world-space direction.
    Direction(Vec3),
}

/// Orients `node` so `aim_axis` points at `target` and `pole_axis` leans
/// towards `pole_dir`.
///
/// Returns the rotation written, in degrees. Nothing is written when the
/// directions are degenerate.
pub fn aim_at<S>(
    scene: &mut S,
    node: &NodeHandle,
    target: &AimTarget,
    pole_dir: Vec3,
    aim_axis: Axis,
    pole_axis: Axis,
) -> RigResult<Vec3>
where
    S: TransformProvider + ?Sized,
{
    let position = scene.world_translation(node)?;
    let aim_dir = match target {
        AimTarget::Node(other) => subtract(scene.world_translation(other)?, position),
        AimTarget::Direction(dir) => *dir,
    };
    let matrix = aim_matrix(position, aim_dir, pole_dir, aim_axis, pole_axis)?;
    let rotation = degrees3(euler_from_matrix(&matrix));
    scene.set_world_rotation(node, rotation, false)?;
    debug!(node = %node, ?rotation, %aim_axis, %pole_axis, "aimed");
    Ok(rotation)
}
