//! IK/FK blend state and toggling.
//!
//! The blend attribute lives on the limb's settings control: `1.0` is fully
//! IK, `0.0` fully FK. A toggle flips it and matches the chain being
//! switched to onto the pose of the chain being left, so the limb does not
//! pop.

use std::fmt;

use limbswitch_core::naming::settings_control;
use limbswitch_core::{LimbId, Namespace, PoleVector, RigSettings};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{HostError, RigError, RigResult};
use crate::host::{AttributeStore, Confirm, NodeHandle, NodeResolver, Scene, Selection};
use crate::reconcile::{capture_fk_to_ik, capture_ik_to_fk, MatchPlan, ReconcileOptions};

/// Blend values at or above this are IK.
const IK_THRESHOLD: f64 = 0.5;

/// Which chain drives the limb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IkFkMode {
    /// IK drives the limb.
    Ik,
    /// FK drives the limb.
    Fk,
}

impl IkFkMode {
    /// Mode for a blend value.
    pub fn from_blend(value: f64) -> Self {
        if value < IK_THRESHOLD {
            IkFkMode::Fk
        } else {
            IkFkMode::Ik
        }
    }

    /// Blend value committed for this mode.
    pub fn blend_value(&self) -> f64 {
        match self {
            IkFkMode::Ik => 1.0,
            IkFkMode::Fk => 0.0,
        }
    }

    /// Returns the mode as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            IkFkMode::Ik => "ik",
            IkFkMode::Fk => "fk",
        }
    }
}

impl fmt::Display for IkFkMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn blend_node<S>(scene: &S, limb: &LimbId, settings: &RigSettings) -> RigResult<NodeHandle>
where
    S: NodeResolver + ?Sized,
{
    let name = settings_control(&settings.naming, limb).ok_or_else(|| {
        RigError::invalid_argument(format!("no settings control configured for {}", limb.kind))
    })?;
    scene
        .resolve(&name)
        .ok_or_else(|| HostError::node_not_found(name).into())
}

/// Current blend value of a limb.
pub fn get_blend<S>(scene: &S, limb: &LimbId, settings: &RigSettings) -> RigResult<f64>
where
    S: NodeResolver + AttributeStore + ?Sized,
{
    let node = blend_node(scene, limb, settings)?;
    let attribute = &settings.naming.blend_attribute;
    scene
        .get_attr(&node, attribute)
        .ok_or_else(|| HostError::attribute_not_found(node.name(), attribute.as_str()).into())
}

/// Sets a limb's blend value, which must lie in `[0, 1]`.
pub fn set_blend<S>(scene: &mut S, limb: &LimbId, settings: &RigSettings, value: f64) -> RigResult<()>
where
    S: NodeResolver + AttributeStore + ?Sized,
{
    if !(0.0..=1.0).contains(&value) {
        return Err(RigError::invalid_argument(format!(
            "blend value must be in [0, 1], got {}",
            value
        )));
    }
    let node = blend_node(scene, limb, settings)?;
    scene.set_attr(&node, &settings.naming.blend_attribute, value)?;
    debug!(limb = %limb, value, "blend set");
    Ok(())
}

// =============================================================================
// Switch
// =============================================================================

/// A captured toggle, ready to commit.
///
/// Created by [`Switch::capture_source_pose`]; nothing has been written yet.
#[derive(Debug, Clone)]
pub struct Switch {
    limb: LimbId,
    blend_node: NodeHandle,
    previous_blend: f64,
    mode: IkFkMode,
    plan: MatchPlan,
}

/// Result of a toggle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToggleOutcome {
    /// Limb toggled.
    pub limb: LimbId,
    /// Blend value before the toggle.
    pub previous_blend: f64,
    /// Mode after the toggle.
    pub mode: IkFkMode,
    /// Pole position written when switching to IK.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pole: Option<[f64; 3]>,
    /// The pole came from a nearly straight chain.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub degenerate_pole: bool,
}

impl Switch {
    /// Reads the blend value and captures the pose of the chain being left.
    ///
    /// `new = 1 - old`; below 0.5 the limb goes to FK and the FK controls
    /// are matched to the IK pose, otherwise it goes to IK and the IK
    /// controls are matched to the FK pose.
    pub fn capture_source_pose<S, C>(
        scene: &S,
        limb: &LimbId,
        settings: &RigSettings,
        confirm: &mut C,
    ) -> RigResult<Self>
    where
        S: Scene + ?Sized,
        C: Confirm + ?Sized,
    {
        let blend_node = blend_node(scene, limb, settings)?;
        let previous_blend = get_blend(scene, limb, settings)?;
        let mode = IkFkMode::from_blend(1.0 - previous_blend);
        let options = ReconcileOptions::default();
        let plan = match mode {
            IkFkMode::Fk => capture_fk_to_ik(scene, limb, &options, settings)?,
            IkFkMode::Ik => capture_ik_to_fk(scene, limb, &options, settings, confirm)?,
        };
        Ok(Self {
            limb: limb.clone(),
            blend_node,
            previous_blend,
            mode,
            plan,
        })
    }

    /// Mode the limb is switching to.
    pub fn mode(&self) -> IkFkMode {
        self.mode
    }

    /// Captured match.
    pub fn plan(&self) -> &MatchPlan {
        &self.plan
    }

    /// Writes the new blend value.
    pub fn commit_blend<S>(&self, scene: &mut S, settings: &RigSettings) -> RigResult<()>
    where
        S: AttributeStore + ?Sized,
    {
        scene.set_attr(
            &self.blend_node,
            &settings.naming.blend_attribute,
            self.mode.blend_value(),
        )?;
        Ok(())
    }

    /// Applies the captured match.
    pub fn apply_target_pose<S>(&self, scene: &mut S) -> RigResult<()>
    where
        S: Scene + ?Sized,
    {
        self.plan.apply(scene)
    }

    /// Runs the remaining phases in the order the mode requires.
    ///
    /// Going to FK, the FK controls are matched while IK still drives the
    /// limb and the blend flips afterwards. Going to IK, the blend flips
    /// first and the IK controls are placed from the captured FK pose.
    pub fn finish<S>(self, scene: &mut S, settings: &RigSettings) -> RigResult<ToggleOutcome>
    where
        S: Scene + ?Sized,
    {
        match self.mode {
            IkFkMode::Fk => {
                self.apply_target_pose(scene)?;
                self.commit_blend(scene, settings)?;
            }
            IkFkMode::Ik => {
                self.commit_blend(scene, settings)?;
                self.apply_target_pose(scene)?;
            }
        }
        info!(limb = %self.limb, mode = %self.mode, previous = self.previous_blend, "toggled");
        Ok(ToggleOutcome {
            limb: self.limb,
            previous_blend: self.previous_blend,
            mode: self.mode,
            pole: self.plan.pole.map(|p: PoleVector| p.position),
            degenerate_pole: self.plan.pole.is_some_and(|p| p.degenerate),
        })
    }
}

/// Flips a limb between IK and FK without popping. Does not key.
pub fn toggle<S, C>(
    scene: &mut S,
    limb: &LimbId,
    settings: &RigSettings,
    confirm: &mut C,
) -> RigResult<ToggleOutcome>
where
    S: Scene + ?Sized,
    C: Confirm + ?Sized,
{
    Switch::capture_source_pose(scene, limb, settings, confirm)?.finish(scene, settings)
}

// =============================================================================
// Selection
// =============================================================================

/// Limbs implied by the selected controls, in first-selected order.
///
/// A selected node counts when its short name starts with the left or right
/// side token and contains the control marker; the limb kind comes from the
/// part marker in its long name. Each limb appears once.
pub fn selection_limbs<S>(scene: &S, settings: &RigSettings) -> Vec<LimbId>
where
    S: Selection + ?Sized,
{
    let markers = &settings.selection;
    let mut limbs: Vec<LimbId> = Vec::new();
    for name in scene.selected() {
        let (namespace, short) = Namespace::split(&name);
        let Some(side) = settings.naming.side_tokens.detect(short) else {
            continue;
        };
        if !short.contains(markers.control_marker.as_str()) {
            continue;
        }
        let long_name = scene.long_name(&name);
        let Some(kind) = markers.kind_for(&long_name) else {
            debug!(node = %name, "selected control belongs to no limb");
            continue;
        };
        let limb = LimbId::new(kind, Some(side)).with_namespace(namespace);
        if !limbs.contains(&limb) {
            limbs.push(limb);
        }
    }
    limbs
}

/// Toggles every limb implied by the selection.
///
/// Each limb succeeds or fails on its own.
pub fn toggle_selected<S, C>(
    scene: &mut S,
    settings: &RigSettings,
    confirm: &mut C,
) -> Vec<(LimbId, RigResult<ToggleOutcome>)>
where
    S: Scene + Selection + ?Sized,
    C: Confirm + ?Sized,
{
    let limbs = selection_limbs(scene, settings);
    if limbs.is_empty() {
        warn!("no limb controls selected");
    }
    limbs
        .into_iter()
        .map(|limb| {
            let result = toggle(scene, &limb, settings, confirm);
            if let Err(err) = &result {
                warn!(limb = %limb, error = %err, "toggle failed");
            }
            (limb, result)
        })
        .collect()
}
