//! limbswitch rig engine
//!
//! Matches IK and FK limb chains onto each other, bakes matches over a frame
//! range and toggles a limb's IK/FK blend without popping. All scene access
//! goes through the capability traits in [`host`]; [`memory::MemoryScene`]
//! implements them in memory for tests and the command line tool.
//!
//! # Example
//!
//! ```
//! use limbswitch_core::{LimbId, LimbKind, RigSettings, Side};
//! use limbswitch_rig::memory::{MemoryNode, MemoryScene};
//! use limbswitch_rig::{ik_to_fk, AlwaysConfirm, ReconcileOptions};
//!
//! let mut scene = MemoryScene::new()
//!     .with_node("L_armUprFK_drv", MemoryNode::at([0.0, 0.0, 0.0]))
//!     .with_node("L_armLwrFK_drv", MemoryNode::at([0.0, -10.0, 0.0]))
//!     .with_node("L_armWristFK_drv", MemoryNode::at([0.0, -20.0, -5.0]))
//!     .with_node("L_ArmUprIK_CTRL", MemoryNode::default())
//!     .with_node("L_ArmElbow_CTRL", MemoryNode::default())
//!     .with_node("L_ArmWristIK_CTRL", MemoryNode::default())
//!     .with_node("L_ArmPV_CTRL", MemoryNode::default());
//!
//! let limb = LimbId::new(LimbKind::Arm, Some(Side::Left));
//! let plan = ik_to_fk(
//!     &mut scene,
//!     &limb,
//!     &ReconcileOptions::default(),
//!     &RigSettings::default(),
//!     &mut AlwaysConfirm,
//! )
//! .unwrap();
//! assert!(plan.pole.unwrap().position[2] > 0.0);
//! ```
//!
//! # Modules
//!
//! - [`host`]: Capability traits and confirmation
//! - [`memory`]: In-memory scene
//! - [`pose`]: Pose snapshots, match-and-key and aim helpers
//! - [`reconcile`]: FK→IK and IK→FK matching
//! - [`bake`]: Frame-range baking
//! - [`blend`]: Blend attribute access and toggling

pub mod bake;
pub mod blend;
pub mod error;
pub mod host;
pub mod memory;
pub mod pose;
pub mod reconcile;

pub use bake::{bake, bake_fk_to_ik, bake_ik_to_fk, BakeReport};
pub use blend::{
    get_blend, selection_limbs, set_blend, toggle, toggle_selected, IkFkMode, Switch,
    ToggleOutcome,
};
pub use error::{HostError, RigError, RigResult};
pub use host::{
    AlwaysConfirm, AttributeStore, Channels, Confirm, FnConfirm, Keyer, MatchChannels,
    NeverConfirm, NodeHandle, NodeResolver, Scene, Selection, TimelineReader, TransformProvider,
};
pub use pose::{aim_at, match_and_key, AimTarget, PoseSnapshot};
pub use reconcile::{
    capture_fk_to_ik, capture_ik_to_fk, fk_to_ik, ik_to_fk, reconcile, Direction, MatchPlan,
    ReconcileOptions, SpacePolicy, Write,
};

#[cfg(test)]
mod tests;
