//! Capability traits implemented by the host scene.
//!
//! The engine never talks to a scene graph directly. Everything it reads or
//! writes goes through these traits, so a DCC plugin, a test double or the
//! bundled [`MemoryScene`](crate::memory::MemoryScene) can drive it.
//!
//! Rotations are XYZ-order Euler angles in degrees. Times are frames.

use limbswitch_core::Vec3;

use crate::error::HostError;

/// Handle to a resolved scene node.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeHandle(String);

impl NodeHandle {
    /// Creates a handle for a node name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Full node name.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NodeHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Channels to key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Channels {
    /// Translate X/Y/Z.
    pub translate: bool,
    /// Rotate X/Y/Z.
    pub rotate: bool,
}

impl Channels {
    /// Translation only.
    pub const TRANSLATE: Channels = Channels {
        translate: true,
        rotate: false,
    };
    /// Rotation only.
    pub const ROTATE: Channels = Channels {
        translate: false,
        rotate: true,
    };
    /// Translation and rotation.
    pub const TRANSFORM: Channels = Channels {
        translate: true,
        rotate: true,
    };
}

/// What `match_transform` copies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MatchChannels {
    /// World position.
    pub position: bool,
    /// World rotation.
    pub rotation: bool,
    /// Rotate pivot.
    pub pivot: bool,
}

impl MatchChannels {
    /// Position, rotation and pivot.
    pub const ALL: MatchChannels = MatchChannels {
        position: true,
        rotation: true,
        pivot: true,
    };
    /// Position and pivot.
    pub const POSITION_PIVOT: MatchChannels = MatchChannels {
        position: true,
        rotation: false,
        pivot: true,
    };
}

// =============================================================================
// Capabilities
// =============================================================================

/// Looks nodes up by name.
pub trait NodeResolver {
    /// Whether a node with this exact name exists.
    fn exists(&self, name: &str) -> bool;

    /// Handle for an existing node.
    fn resolve(&self, name: &str) -> Option<NodeHandle>;
}

/// Reads and writes world transforms.
pub trait TransformProvider {
    /// World-space translation.
    fn world_translation(&self, node: &NodeHandle) -> Result<Vec3, HostError>;

    /// World-space rotation.
    fn world_rotation(&self, node: &NodeHandle) -> Result<Vec3, HostError>;

    /// World-space rotate pivot.
    fn world_pivot(&self, node: &NodeHandle) -> Result<Vec3, HostError>;

    /// Moves the node to a world-space position.
    fn set_world_translation(&mut self, node: &NodeHandle, value: Vec3) -> Result<(), HostError>;

    /// Sets the world rotation, or adds `value` to it when `relative`.
    fn set_world_rotation(
        &mut self,
        node: &NodeHandle,
        value: Vec3,
        relative: bool,
    ) -> Result<(), HostError>;

    /// Moves the rotate pivot to a world-space position.
    fn set_world_pivot(&mut self, node: &NodeHandle, value: Vec3) -> Result<(), HostError>;

    /// Sets the parent-relative translation.
    fn set_local_translation(&mut self, node: &NodeHandle, value: Vec3) -> Result<(), HostError>;

    /// Sets the parent-relative rotation.
    fn set_local_rotation(&mut self, node: &NodeHandle, value: Vec3) -> Result<(), HostError>;

    /// Copies the selected world transform channels of `source` onto `target`.
    fn match_transform(
        &mut self,
        target: &NodeHandle,
        source: &NodeHandle,
        channels: MatchChannels,
    ) -> Result<(), HostError> {
        if channels.position {
            let value = self.world_translation(source)?;
            self.set_world_translation(target, value)?;
        }
        if channels.rotation {
            let value = self.world_rotation(source)?;
            self.set_world_rotation(target, value, false)?;
        }
        if channels.pivot {
            let value = self.world_pivot(source)?;
            self.set_world_pivot(target, value)?;
        }
        Ok(())
    }
}

/// Commits keyframes.
pub trait Keyer {
    /// Keys the given channels of a node at `time`.
    fn set_keyframe(&mut self, node: &NodeHandle, channels: Channels, time: f64)
        -> Result<(), HostError>;
}

/// Reads and drives the timeline.
pub trait TimelineReader {
    /// Current frame.
    fn current_time(&self) -> f64;

    /// Moves the playhead.
    fn set_current_time(&mut self, time: f64);

    /// Range highlighted by the user, if any.
    fn selected_range(&self) -> Option<(f64, f64)>;

    /// Forces the host to re-evaluate and redraw after a time change.
    fn refresh(&mut self) {}
}

/// Scalar attributes on nodes.
pub trait AttributeStore {
    /// Value of an attribute, or `None` if the node has no such attribute.
    fn get_attr(&self, node: &NodeHandle, attribute: &str) -> Option<f64>;

    /// Sets an existing attribute.
    fn set_attr(&mut self, node: &NodeHandle, attribute: &str, value: f64)
        -> Result<(), HostError>;
}

/// The user's current selection.
pub trait Selection {
    /// Selected node names, in selection order.
    fn selected(&self) -> Vec<String>;

    /// Full path name of a node (including its parents).
    fn long_name(&self, name: &str) -> String;
}

/// Everything the reconciler needs from a host.
pub trait Scene: NodeResolver + TransformProvider + Keyer + TimelineReader + AttributeStore {}

impl<T> Scene for T where T: NodeResolver + TransformProvider + Keyer + TimelineReader + AttributeStore
{}

// =============================================================================
// Confirmation
// =============================================================================

/// Asks the user a yes/no question.
pub trait Confirm {
    /// Returns `true` to proceed.
    fn confirm(&mut self, prompt: &str) -> bool;
}

/// Answers yes to everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysConfirm;

impl Confirm for AlwaysConfirm {
    fn confirm(&mut self, _prompt: &str) -> bool {
        true
    }
}

/// Answers no to everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverConfirm;

impl Confirm for NeverConfirm {
    fn confirm(&mut self, _prompt: &str) -> bool {
        false
    }
}

/// Adapts a closure into a [`Confirm`].
pub struct FnConfirm<F>(pub F);

impl<F> Confirm for FnConfirm<F>
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, prompt: &str) -> bool {
        (self.0)(prompt)
    }
}
