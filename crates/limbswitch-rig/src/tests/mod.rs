//! Cross-module tests for the rig engine.


use limbswitch_core::Vec3;

use crate::memory::{MemoryNode, MemoryScene};

/// FK joint positions of the bent-arm example.
pub(crate) const ARM_ROOT: Vec3 = [0.0, 0.0, 0.0];
pub(crate) const ARM_MID: Vec3 = [0.0, -10.0, 0.0];
pub(crate) const ARM_END: Vec3 = [0.0, -20.0, -5.0];

pub(crate) fn assert_close(actual: Vec3, expected: Vec3, eps: f64) {
    for i in 0..3 {
        assert!(
            (actual[i] - expected[i]).abs() < eps,
            "{:?} != {:?} (eps {})",
            actual,
            expected,
            eps
        );
    }
}

/// A left arm whose FK and IK chains agree, with every control on its joint.
pub(crate) fn arm_rig(prefix: &str) -> MemoryScene {
    let p = |name: &str| format!("{}{}", prefix, name);
    let wrist_rot = [10.0, 20.0, 30.0];
    let elbow_rot = [0.0, 0.0, -15.0];
    MemoryScene::new()
        .with_node(p("armUprFK_drv"), MemoryNode::at(ARM_ROOT))
        .with_node(p("armLwrFK_drv"), MemoryNode::at(ARM_MID).with_rotation(elbow_rot))
        .with_node(p("armWristFK_drv"), MemoryNode::at(ARM_END).with_rotation(wrist_rot))
        .with_node(p("armUprIK_drv"), MemoryNode::at(ARM_ROOT))
        .with_node(p("armLwrIK_drv"), MemoryNode::at(ARM_MID).with_rotation(elbow_rot))
        .with_node(p("armWristIK_drv"), MemoryNode::at(ARM_END).with_rotation(wrist_rot))
        .with_node(p("ArmUprFK_CTRL"), MemoryNode::at(ARM_ROOT))
        .with_node(p("ArmLwrFK_CTRL"), MemoryNode::at(ARM_MID).with_rotation(elbow_rot))
        .with_node(p("ArmWristFK_CTRL"), MemoryNode::at(ARM_END).with_rotation(wrist_rot))
        .with_node(p("ArmUprIK_CTRL"), MemoryNode::default())
        .with_node(p("ArmElbow_CTRL"), MemoryNode::default())
        .with_node(p("ArmWristIK_CTRL"), MemoryNode::default())
        .with_node(p("ArmPV_CTRL"), MemoryNode::default().with_attr("handSpace", 0.0))
        .with_node(p("ArmSetting_CTRL"), MemoryNode::default().with_attr("ikBlend", 1.0))
}

/// A leg with foot controls, FK pose bent forward at the knee.
pub(crate) fn leg_rig(side_token: &str, with_foot: bool) -> MemoryScene {
    let p = |name: &str| format!("{}{}", side_token, name);
    let ankle_rot = [5.0, -10.0, 0.0];
    let mut scene = MemoryScene::new()
        .with_node(p("legUprFK_drv"), MemoryNode::at([0.0, 100.0, 0.0]))
        .with_node(p("legLwrFK_drv"), MemoryNode::at([0.0, 55.0, 8.0]))
        .with_node(p("legAnkleFK_drv"), MemoryNode::at([0.0, 10.0, 0.0]).with_rotation(ankle_rot))
        .with_node(p("legUprIK_drv"), MemoryNode::at([0.0, 100.0, 0.0]))
        .with_node(p("legLwrIK_drv"), MemoryNode::at([0.0, 55.0, 8.0]))
        .with_node(p("legAnkleIK_drv"), MemoryNode::at([0.0, 10.0, 0.0]).with_rotation(ankle_rot))
        .with_node(p("LegUprFK_CTRL"), MemoryNode::default())
        .with_node(p("LegLwrFK_CTRL"), MemoryNode::default())
        .with_node(p("LegAnkleFK_CTRL"), MemoryNode::default())
        .with_node(p("LegUprIK_CTRL"), MemoryNode::default())
        .with_node(p("LegKnee_CTRL"), MemoryNode::default())
        .with_node(p("LegAnkleIK_CTRL"), MemoryNode::default().with_attr("footSpace", 0.0))
        .with_node(p("LegPV_CTRL"), MemoryNode::default())
        .with_node(p("LegSetting_CTRL"), MemoryNode::default().with_attr("ikBlend", 0.0));
    if with_foot {
        for name in ["toe_CTRL", "ball_CTRL", "heel_CTRL"] {
            scene.insert(
                p(name),
                MemoryNode::at([1.0, 2.0, 3.0]).with_rotation([4.0, 5.0, 6.0]),
            );
        }
    }
    scene
}
