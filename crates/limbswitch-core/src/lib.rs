//! limbswitch core library
//!
//! This crate provides the pure parts of the IK/FK limb switcher: the limb
//! role vocabulary, name tables and name resolution, the geometry kernel and
//! the pole-vector reconstruction heuristic. Nothing here touches a scene.
//!
//! # Overview
//!
//! A limb is identified by its kind (`arm` or `leg`), a [`Side`] and an
//! optional [`Namespace`]. Abstract roles (`shoulder`, `elbow`, `wrist`, ...)
//! are mapped to concrete node names through [`RoleMap`] tables and
//! [`resolve`]:
//!
//! ```
//! use limbswitch_core::{resolve, Namespace, RigNaming, Role, Side};
//!
//! let naming = RigNaming::default();
//! let names = resolve(
//!     &naming.ik_controls,
//!     Some(Side::Left),
//!     &Namespace::new("hero"),
//!     &naming.side_tokens,
//! );
//! assert_eq!(names.get(Role::Shoulder), Some("hero:L_ArmUprIK_CTRL"));
//! ```
//!
//! The pole-vector heuristic derives a pole target from three FK joint
//! positions:
//!
//! ```
//! use limbswitch_core::pole::reconstruct_pole;
//!
//! let pole = reconstruct_pole([0.0, 0.0, 0.0], [0.0, -10.0, 0.0], [0.0, -20.0, -5.0], 40.0);
//! assert!(!pole.degenerate);
//! assert!(pole.position[2] > 0.0);
//! ```
//!
//! # Modules
//!
//! - [`error`]: Error types and stable error codes
//! - [`geometry`]: Vector and matrix primitives, aim matrices, Euler extraction
//! - [`limb`]: Limb kinds, roles and limb identity
//! - [`naming`]: Sides, namespaces, role maps and name resolution
//! - [`pole`]: Pole-vector reconstruction
//! - [`settings`]: Serializable rig settings

pub mod error;
pub mod geometry;
pub mod limb;
pub mod naming;
pub mod pole;
pub mod settings;

// Re-export commonly used types at the crate root
pub use error::{CodedError, CoreError, CoreResult, GeometryError};
pub use geometry::{Axis, Mat4, Vec3};
pub use limb::{LimbId, LimbKind, Role};
pub use naming::{resolve, Namespace, ResolvedNames, RigNaming, RoleMap, Side, SideTokens};
pub use pole::{reconstruct_pole, PoleSettings, PoleVector};
pub use settings::{
    FootCompensation, RigSettings, SelectionMarkers, SpaceSettings, SETTINGS_VERSION,
};

#[cfg(test)]
mod tests;
