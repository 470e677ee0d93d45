//! Test fixture utilities for building complete in-memory rigs.

use limbswitch_core::naming::{resolve_limb, settings_control};
use limbswitch_core::{LimbId, LimbKind, RigSettings, Role, Vec3};
use limbswitch_rig::memory::{MemoryNode, MemoryScene};

/// Asserts two vectors match component-wise.
pub fn assert_vec3_close(actual: Vec3, expected: Vec3, eps: f64) {
    for i in 0..3 {
        assert!(
            (actual[i] - expected[i]).abs() < eps,
            "component {}: {:?} != {:?} (eps {})",
            i,
            actual,
            expected,
            eps
        );
    }
}

/// A single limb of a rig whose FK and IK chains agree.
///
/// FK joints, IK joints and FK controls all sit on `chain`; IK controls,
/// the pole control and foot controls start at the origin. Controls are
/// parented under the limb's part-marker node so selection toggles work.
#[derive(Debug, Clone)]
pub struct RigFixture {
    limb: LimbId,
    chain: [Vec3; 3],
    rotations: [Vec3; 3],
    foot: bool,
    blend: f64,
    settings: RigSettings,
}

impl RigFixture {
    /// Creates a fixture with a bent default chain for the limb kind.
    pub fn new(limb: LimbId) -> Self {
        let chain = match limb.kind {
            LimbKind::Arm => [[0.0, 0.0, 0.0], [0.0, -10.0, 0.0], [0.0, -20.0, -5.0]],
            LimbKind::Leg => [[0.0, 100.0, 0.0], [0.0, 55.0, 8.0], [0.0, 10.0, 0.0]],
        };
        Self {
            limb,
            chain,
            rotations: [[0.0; 3]; 3],
            foot: true,
            blend: 1.0,
            settings: RigSettings::default(),
        }
    }

    /// Sets root, mid and end positions.
    pub fn with_chain(mut self, chain: [Vec3; 3]) -> Self {
        self.chain = chain;
        self
    }

    /// Sets root, mid and end rotations (degrees).
    pub fn with_rotations(mut self, rotations: [Vec3; 3]) -> Self {
        self.rotations = rotations;
        self
    }

    /// Adds or omits toe/ball/heel controls (legs only).
    pub fn with_foot(mut self, foot: bool) -> Self {
        self.foot = foot;
        self
    }

    /// Sets the initial blend value.
    pub fn with_blend(mut self, blend: f64) -> Self {
        self.blend = blend;
        self
    }

    /// Uses custom settings for naming.
    pub fn with_settings(mut self, settings: RigSettings) -> Self {
        self.settings = settings;
        self
    }

    /// The limb this fixture builds.
    pub fn limb(&self) -> &LimbId {
        &self.limb
    }

    /// Settings used for naming.
    pub fn settings(&self) -> &RigSettings {
        &self.settings
    }

    /// Concrete IK control name for a role.
    pub fn ik_control(&self, role: Role) -> String {
        self.name(&self.settings.naming.ik_controls, role)
    }

    /// Concrete FK control name for a role.
    pub fn fk_control(&self, role: Role) -> String {
        self.name(&self.settings.naming.fk_controls, role)
    }

    /// Concrete FK joint name for a role.
    pub fn fk_joint(&self, role: Role) -> String {
        self.name(&self.settings.naming.fk_joints, role)
    }

    /// Settings control carrying the blend attribute.
    pub fn settings_control(&self) -> String {
        settings_control(&self.settings.naming, &self.limb).expect("settings control configured")
    }

    fn name(&self, map: &limbswitch_core::RoleMap, role: Role) -> String {
        resolve_limb(map, &self.limb, &self.settings.naming.side_tokens)
            .get(role)
            .map(str::to_string)
            .unwrap_or_else(|| panic!("no {} entry", role))
    }

    /// Builds a scene containing just this limb.
    pub fn build(&self) -> MemoryScene {
        let mut scene = MemoryScene::new();
        self.add_to(&mut scene);
        scene
    }

    /// Adds this limb's nodes to an existing scene.
    pub fn add_to(&self, scene: &mut MemoryScene) {
        let naming = &self.settings.naming;
        let kind = self.limb.kind;
        let marker = &self.settings.selection.part_markers[&kind];
        let null = format!(
            "{}{}{}",
            self.limb.namespace,
            naming.side_tokens.token(self.limb.side),
            marker
        );
        scene.insert(null.clone(), MemoryNode::default());
        let control = |node: MemoryNode| node.with_parent(null.clone());

        for (i, role) in kind.targets().into_iter().enumerate() {
            let posed = MemoryNode::at(self.chain[i]).with_rotation(self.rotations[i]);
            scene.insert(self.fk_joint(role), posed.clone());
            scene.insert(self.name(&naming.ik_joints, role), posed.clone());
            scene.insert(self.fk_control(role), control(posed));
            scene.insert(self.ik_control(role), control(MemoryNode::default()));
        }

        let space = self.settings.spaces.attribute_for(kind).unwrap_or("space");
        scene.insert(
            self.ik_control(kind.pole_role()),
            control(MemoryNode::default().with_attr(space, 0.0)),
        );
        if let Some(end) = scene.node_mut(&self.ik_control(kind.end())) {
            end.attributes.insert(space.to_string(), 0.0);
        }

        if self.foot {
            for &role in kind.terminal_roles() {
                scene.insert(
                    self.ik_control(role),
                    control(MemoryNode::at([1.0, 0.0, 2.0]).with_rotation([0.0, 15.0, 0.0])),
                );
            }
        }

        scene.insert(
            self.settings_control(),
            MemoryNode::default().with_attr(naming.blend_attribute.clone(), self.blend),
        );
    }
}
