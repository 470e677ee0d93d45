//! Limb reconciliation: matching one chain's controls onto the other
//! chain's pose.
//!
//! Every match runs in two phases. Capture validates the limb, checks that
//! every required node exists, asks any confirmation and reads the source
//! pose, producing a [`MatchPlan`]. Apply performs the plan's writes and
//! keys. Nothing is written during capture, so a failed capture leaves the
//! scene untouched.

use std::fmt;
use std::str::FromStr;

use limbswitch_core::naming::resolve_limb;
use limbswitch_core::{LimbId, PoleVector, ResolvedNames, RigSettings, Role, Vec3};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{RigError, RigResult};
use crate::host::{
    AttributeStore, Channels, Confirm, Keyer, NodeHandle, NodeResolver, Scene, TimelineReader,
    TransformProvider,
};
use crate::pose::PoseSnapshot;

// =============================================================================
// Options
// =============================================================================

/// Which chain is matched onto which.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// FK controls follow the IK pose.
    FkToIk,
    /// IK controls follow the FK pose.
    IkToFk,
}

impl Direction {
    /// Returns the direction as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::FkToIk => "fk_to_ik",
            Direction::IkToFk => "ik_to_fk",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = RigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "fk_to_ik" | "fk2ik" => Ok(Direction::FkToIk),
            "ik_to_fk" | "ik2fk" => Ok(Direction::IkToFk),
            _ => Err(RigError::invalid_argument(format!(
                "unknown direction '{}' (expected fk-to-ik or ik-to-fk)",
                s
            ))),
        }
    }
}

/// What to do when an IK control is in a non-default parent space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpacePolicy {
    /// Ask the [`Confirm`] implementation.
    #[default]
    Ask,
    /// Match without asking.
    Proceed,
}

/// Options for a single match.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReconcileOptions {
    /// Key the matched controls at the current frame.
    pub key: bool,
    /// The limb has no foot; toe/ball/heel are ignored entirely.
    pub stump: bool,
    /// Parent-space handling.
    pub space_policy: SpacePolicy,
}

impl ReconcileOptions {
    /// Enables or disables keying.
    pub fn with_key(mut self, key: bool) -> Self {
        self.key = key;
        self
    }

    /// Marks the limb as a stump.
    pub fn with_stump(mut self, stump: bool) -> Self {
        self.stump = stump;
        self
    }

    /// Sets the parent-space policy.
    pub fn with_space_policy(mut self, policy: SpacePolicy) -> Self {
        self.space_policy = policy;
        self
    }
}

// =============================================================================
// Match Plan
// =============================================================================

/// One scene write.
#[derive(Debug, Clone, PartialEq)]
pub enum Write {
    /// Set world translation.
    Translate { node: NodeHandle, value: Vec3 },
    /// Set world rotation.
    Rotate { node: NodeHandle, value: Vec3 },
    /// Add to the world rotation.
    RotateBy { node: NodeHandle, value: Vec3 },
    /// Set world rotate pivot.
    Pivot { node: NodeHandle, value: Vec3 },
    /// Reset local translation and rotation.
    ZeroLocal { node: NodeHandle },
}

impl Write {
    /// Node written.
    pub fn node(&self) -> &NodeHandle {
        match self {
            Write::Translate { node, .. }
            | Write::Rotate { node, .. }
            | Write::RotateBy { node, .. }
            | Write::Pivot { node, .. }
            | Write::ZeroLocal { node } => node,
        }
    }

    fn apply<S>(&self, scene: &mut S) -> RigResult<()>
    where
        S: TransformProvider + ?Sized,
    {
        match self {
            Write::Translate { node, value } => scene.set_world_translation(node, *value)?,
            Write::Rotate { node, value } => scene.set_world_rotation(node, *value, false)?,
            Write::RotateBy { node, value } => scene.set_world_rotation(node, *value, true)?,
            Write::Pivot { node, value } => scene.set_world_pivot(node, *value)?,
            Write::ZeroLocal { node } => {
                scene.set_local_translation(node, [0.0; 3])?;
                scene.set_local_rotation(node, [0.0; 3])?;
            }
        }
        debug!(write = ?self, "applied");
        Ok(())
    }
}

/// Writes and keys computed from a captured pose.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchPlan {
    /// Limb matched.
    pub limb: LimbId,
    /// Match direction.
    pub direction: Direction,
    /// Writes, in application order.
    pub writes: Vec<Write>,
    /// Keys committed after the writes, at the current frame.
    pub keys: Vec<(NodeHandle, Channels)>,
    /// Reconstructed pole vector (IK matches only).
    pub pole: Option<PoleVector>,
}

impl MatchPlan {
    /// Performs every write, then every key.
    pub fn apply<S>(&self, scene: &mut S) -> RigResult<()>
    where
        S: TransformProvider + Keyer + TimelineReader + ?Sized,
    {
        for write in &self.writes {
            write.apply(scene)?;
        }
        if !self.keys.is_empty() {
            let time = scene.current_time();
            for (node, channels) in &self.keys {
                scene.set_keyframe(node, *channels, time)?;
            }
            debug!(limb = %self.limb, time, keys = self.keys.len(), "keyed");
        }
        Ok(())
    }

    /// Whether the plan writes to a node.
    pub fn writes_to(&self, name: &str) -> bool {
        self.writes.iter().any(|w| w.node().name() == name)
    }
}

// =============================================================================
// Capture
// =============================================================================

fn require<S>(scene: &S, limb: &LimbId, names: &ResolvedNames, role: Role) -> RigResult<NodeHandle>
where
    S: NodeResolver + ?Sized,
{
    let name = names.get(role).ok_or_else(|| {
        RigError::invalid_argument(format!("naming table has no '{}' entry for {}", role, limb))
    })?;
    scene.resolve(name).ok_or_else(|| RigError::MissingNode {
        limb: limb.to_string(),
        role,
        name: name.to_string(),
    })
}

/// Captures a match of the FK controls onto the IK driver joints.
pub fn capture_fk_to_ik<S>(
    scene: &S,
    limb: &LimbId,
    options: &ReconcileOptions,
    settings: &RigSettings,
) -> RigResult<MatchPlan>
where
    S: NodeResolver + TransformProvider + ?Sized,
{
    let naming = &settings.naming;
    let roles = limb.kind.targets();
    let sources = resolve_limb(&naming.ik_joints.only(&roles), limb, &naming.side_tokens);
    let targets = resolve_limb(&naming.fk_controls.only(&roles), limb, &naming.side_tokens);

    let mut pairs = Vec::with_capacity(roles.len());
    for role in roles {
        pairs.push((
            require(scene, limb, &sources, role)?,
            require(scene, limb, &targets, role)?,
        ));
    }

    let mut writes = Vec::with_capacity(pairs.len() * 3);
    let mut keys = Vec::new();
    for (source, target) in pairs {
        let pose = PoseSnapshot::capture(scene, &source)?;
        writes.push(Write::Translate {
            node: target.clone(),
            value: pose.translation,
        });
        writes.push(Write::Rotate {
            node: target.clone(),
            value: pose.rotation,
        });
        writes.push(Write::Pivot {
            node: target.clone(),
            value: pose.pivot,
        });
        if options.key {
            keys.push((target, Channels::TRANSFORM));
        }
    }

    Ok(MatchPlan {
        limb: limb.clone(),
        direction: Direction::FkToIk,
        writes,
        keys,
        pole: None,
    })
}

/// Captures a match of the IK controls onto the FK driver joints.
///
/// Stump limbs drop toe, ball and heel before resolution, so those names
/// are never looked up. The parent-space check runs here, before the plan
/// exists.
pub fn capture_ik_to_fk<S, C>(
    scene: &S,
    limb: &LimbId,
    options: &ReconcileOptions,
    settings: &RigSettings,
    confirm: &mut C,
) -> RigResult<MatchPlan>
where
    S: NodeResolver + TransformProvider + AttributeStore + ?Sized,
    C: Confirm + ?Sized,
{
    let naming = &settings.naming;
    let kind = limb.kind;
    let [root_role, mid_role, end_role] = kind.targets();
    let pole_role = kind.pole_role();

    let mut control_roles = vec![root_role, mid_role, end_role, pole_role];
    if !options.stump {
        control_roles.extend_from_slice(kind.terminal_roles());
    }
    let joints = resolve_limb(&naming.fk_joints.only(&kind.targets()), limb, &naming.side_tokens);
    let controls = resolve_limb(&naming.ik_controls.only(&control_roles), limb, &naming.side_tokens);

    let root_joint = require(scene, limb, &joints, root_role)?;
    let mid_joint = require(scene, limb, &joints, mid_role)?;
    let end_joint = require(scene, limb, &joints, end_role)?;
    let root_ctrl = require(scene, limb, &controls, root_role)?;
    let mid_ctrl = require(scene, limb, &controls, mid_role)?;
    let end_ctrl = require(scene, limb, &controls, end_role)?;
    let pole_ctrl = require(scene, limb, &controls, pole_role)?;

    let mut terminals = Vec::new();
    if !options.stump {
        for &role in kind.terminal_roles() {
            let Some(name) = controls.get(role) else {
                continue;
            };
            match scene.resolve(name) {
                Some(node) => terminals.push(node),
                None => warn!(limb = %limb, %role, name, "terminal control missing, skipped"),
            }
        }
    }

    check_parent_space(scene, limb, options, settings, &[&pole_ctrl, &end_ctrl], confirm)?;

    let root = PoseSnapshot::capture(scene, &root_joint)?;
    let mid = PoseSnapshot::capture(scene, &mid_joint)?;
    let end = PoseSnapshot::capture(scene, &end_joint)?;

    let pole = settings
        .pole
        .reconstruct(kind, root.translation, mid.translation, end.translation);
    if pole.degenerate {
        warn!(
            limb = %limb,
            offset = pole.offset_length(),
            "chain is nearly straight; pole vector may flip the IK solve"
        );
    }

    let mut writes = vec![
        Write::Translate {
            node: root_ctrl.clone(),
            value: root.translation,
        },
        Write::Pivot {
            node: root_ctrl,
            value: root.pivot,
        },
        Write::Translate {
            node: pole_ctrl.clone(),
            value: pole.position,
        },
        Write::Translate {
            node: end_ctrl.clone(),
            value: end.translation,
        },
        Write::Rotate {
            node: end_ctrl.clone(),
            value: end.rotation,
        },
        Write::Pivot {
            node: end_ctrl.clone(),
            value: end.pivot,
        },
    ];
    if kind.compensates_end_rotation() {
        if let Some(offset) = settings.foot.for_side(limb.side) {
            writes.push(Write::RotateBy {
                node: end_ctrl.clone(),
                value: offset,
            });
        }
    }
    writes.extend(terminals.into_iter().map(|node| Write::ZeroLocal { node }));
    writes.push(Write::Rotate {
        node: mid_ctrl,
        value: mid.rotation,
    });

    let keys = if options.key {
        vec![(pole_ctrl, Channels::TRANSLATE), (end_ctrl, Channels::TRANSFORM)]
    } else {
        Vec::new()
    };

    Ok(MatchPlan {
        limb: limb.clone(),
        direction: Direction::IkToFk,
        writes,
        keys,
        pole: Some(pole),
    })
}

fn check_parent_space<S, C>(
    scene: &S,
    limb: &LimbId,
    options: &ReconcileOptions,
    settings: &RigSettings,
    nodes: &[&NodeHandle],
    confirm: &mut C,
) -> RigResult<()>
where
    S: AttributeStore + ?Sized,
    C: Confirm + ?Sized,
{
    let Some(attribute) = settings.spaces.attribute_for(limb.kind) else {
        return Ok(());
    };
    let threshold = settings.spaces.threshold;
    let Some(node) = nodes.iter().find(|node| {
        scene
            .get_attr(node, attribute)
            .is_some_and(|value| value > threshold)
    }) else {
        return Ok(());
    };

    warn!(limb = %limb, node = %node, attribute, "control is in a non-default parent space");
    if options.space_policy == SpacePolicy::Proceed {
        return Ok(());
    }
    let prompt = format!(
        "{} has {} enabled; the match may not line up. Match anyway?",
        node, attribute
    );
    if confirm.confirm(&prompt) {
        Ok(())
    } else {
        Err(RigError::AmbiguousSpace {
            limb: limb.to_string(),
            node: node.to_string(),
            attribute: attribute.to_string(),
        })
    }
}

// =============================================================================
// Entry Points
// =============================================================================

/// Matches the FK controls onto the IK pose.
pub fn fk_to_ik<S>(
    scene: &mut S,
    limb: &LimbId,
    options: &ReconcileOptions,
    settings: &RigSettings,
) -> RigResult<MatchPlan>
where
    S: Scene + ?Sized,
{
    let plan = capture_fk_to_ik(scene, limb, options, settings)?;
    plan.apply(scene)?;
    info!(limb = %limb, key = options.key, writes = plan.writes.len(), "matched FK to IK");
    Ok(plan)
}

/// Matches the IK controls onto the FK pose.
pub fn ik_to_fk<S, C>(
    scene: &mut S,
    limb: &LimbId,
    options: &ReconcileOptions,
    settings: &RigSettings,
    confirm: &mut C,
) -> RigResult<MatchPlan>
where
    S: Scene + ?Sized,
    C: Confirm + ?Sized,
{
    let plan = capture_ik_to_fk(scene, limb, options, settings, confirm)?;
    plan.apply(scene)?;
    info!(
        limb = %limb,
        key = options.key,
        stump = options.stump,
        writes = plan.writes.len(),
        "matched IK to FK"
    );
    Ok(plan)
}

/// Matches in either direction.
pub fn reconcile<S, C>(
    scene: &mut S,
    limb: &LimbId,
    direction: Direction,
    options: &ReconcileOptions,
    settings: &RigSettings,
    confirm: &mut C,
) -> RigResult<MatchPlan>
where
    S: Scene + ?Sized,
    C: Confirm + ?Sized,
{
    match direction {
        Direction::FkToIk => fk_to_ik(scene, limb, options, settings),
        Direction::IkToFk => ik_to_fk(scene, limb, options, settings, confirm),
    }
}
