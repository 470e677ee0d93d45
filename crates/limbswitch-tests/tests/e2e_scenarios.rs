//! End-to-end scenarios against complete in-memory rigs.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p limbswitch-tests --test e2e_scenarios
//! ```

use limbswitch_core::{LimbId, LimbKind, Namespace, RigSettings, Role, Side};
use limbswitch_rig::{
    bake_ik_to_fk, fk_to_ik, get_blend, ik_to_fk, toggle, toggle_selected, AlwaysConfirm,
    IkFkMode, NeverConfirm, ReconcileOptions, RigError, TimelineReader,
};
use limbswitch_tests::{assert_vec3_close, RigFixture};
use pretty_assertions::assert_eq;

fn limb(kind: LimbKind, side: Side) -> LimbId {
    LimbId::new(kind, Some(side))
}

// ============================================================================
// 1. Bent Arm
// ============================================================================

#[test]
fn bent_arm_pole_lands_on_positive_z() {
    let fixture = RigFixture::new(limb(LimbKind::Arm, Side::Left));
    let mut scene = fixture.build();
    ik_to_fk(
        &mut scene,
        fixture.limb(),
        &ReconcileOptions::default(),
        fixture.settings(),
        &mut AlwaysConfirm,
    )
    .unwrap();

    let pv = scene.node(&fixture.ik_control(Role::ElbowPv)).unwrap();
    let inv_sqrt5 = 1.0 / 5.0_f64.sqrt();
    assert_vec3_close(
        pv.translation,
        [0.0, -10.0 - 40.0 * (1.0 - 2.0 * inv_sqrt5), 40.0 * inv_sqrt5],
        1e-9,
    );
    // The pole sits on the opposite side of the bend from the wrist.
    assert!(pv.translation[2] > 0.0);
}

// ============================================================================
// 2. Round Trips
// ============================================================================

#[test]
fn ik_fk_round_trip_on_every_limb() {
    for kind in [LimbKind::Arm, LimbKind::Leg] {
        for side in [Side::Left, Side::Right] {
            let fixture = RigFixture::new(limb(kind, side)).with_rotations([
                [5.0, 0.0, 0.0],
                [0.0, 0.0, -30.0],
                [10.0, 20.0, 30.0],
            ]);
            let mut scene = fixture.build();
            let options = ReconcileOptions::default();
            ik_to_fk(&mut scene, fixture.limb(), &options, fixture.settings(), &mut AlwaysConfirm)
                .unwrap();
            fk_to_ik(&mut scene, fixture.limb(), &options, fixture.settings()).unwrap();

            let fresh = fixture.build();
            for role in kind.targets() {
                let name = fixture.fk_control(role);
                let before = fresh.node(&name).unwrap();
                let after = scene.node(&name).unwrap();
                assert_vec3_close(after.translation, before.translation, 1e-5);
                assert_vec3_close(after.rotation, before.rotation, 1e-5);
            }
        }
    }
}

#[test]
fn toggle_round_trip_restores_blend() {
    let fixture = RigFixture::new(limb(LimbKind::Leg, Side::Right)).with_blend(0.0);
    let mut scene = fixture.build();

    let first = toggle(&mut scene, fixture.limb(), fixture.settings(), &mut AlwaysConfirm).unwrap();
    assert_eq!(first.mode, IkFkMode::Ik);
    let second = toggle(&mut scene, fixture.limb(), fixture.settings(), &mut AlwaysConfirm).unwrap();
    assert_eq!(second.mode, IkFkMode::Fk);
    assert_eq!(get_blend(&scene, fixture.limb(), fixture.settings()).unwrap(), 0.0);
}

// ============================================================================
// 3. Legs
// ============================================================================

#[test]
fn stump_leg_never_touches_foot_controls() {
    let fixture = RigFixture::new(limb(LimbKind::Leg, Side::Left));
    let mut scene = fixture.build();
    ik_to_fk(
        &mut scene,
        fixture.limb(),
        &ReconcileOptions::default().with_stump(true).with_key(true),
        fixture.settings(),
        &mut AlwaysConfirm,
    )
    .unwrap();

    let calls = scene.calls();
    for role in LimbKind::Leg.terminal_roles() {
        let name = fixture.ik_control(*role);
        assert!(
            !calls.iter().any(|call| call.ends_with(&format!(":{}", name))),
            "{} was touched",
            name
        );
    }
}

#[test]
fn mirrored_feet_differ_by_half_turn_in_x() {
    let ankle = [12.0, -7.0, 3.0];
    let rotations = [[0.0; 3], [0.0; 3], ankle];
    let settings = RigSettings::default();
    let options = ReconcileOptions::default();

    let left = RigFixture::new(limb(LimbKind::Leg, Side::Left)).with_rotations(rotations);
    let right = RigFixture::new(limb(LimbKind::Leg, Side::Right)).with_rotations(rotations);
    let mut scene = left.build();
    right.add_to(&mut scene);

    ik_to_fk(&mut scene, left.limb(), &options, &settings, &mut AlwaysConfirm).unwrap();
    ik_to_fk(&mut scene, right.limb(), &options, &settings, &mut AlwaysConfirm).unwrap();

    let l = scene.node(&left.ik_control(Role::Ankle)).unwrap().rotation;
    let r = scene.node(&right.ik_control(Role::Ankle)).unwrap().rotation;
    assert_vec3_close([r[0] - l[0], r[1] - l[1], r[2] - l[2]], [-180.0, 0.0, 0.0], 1e-9);
}

// ============================================================================
// 4. Bake
// ============================================================================

#[test]
fn bake_covers_half_open_range() {
    let fixture = RigFixture::new(limb(LimbKind::Arm, Side::Right));
    let mut scene = fixture.build().with_range(10.0, 15.0);
    let report = bake_ik_to_fk(
        &mut scene,
        fixture.limb(),
        &ReconcileOptions::default(),
        fixture.settings(),
        &mut AlwaysConfirm,
    )
    .unwrap();

    assert_eq!(report.frames, vec![10.0, 11.0, 12.0, 13.0, 14.0]);
    assert_eq!(scene.current_time(), 15.0);
    let end_keys: Vec<f64> = scene
        .keys_for(&fixture.ik_control(Role::Wrist))
        .map(|k| k.time)
        .collect();
    assert_eq!(end_keys, report.frames);
}

#[test]
fn bake_without_range_changes_nothing() {
    let fixture = RigFixture::new(limb(LimbKind::Arm, Side::Right));
    let mut scene = fixture.build();
    let err = bake_ik_to_fk(
        &mut scene,
        fixture.limb(),
        &ReconcileOptions::default(),
        fixture.settings(),
        &mut AlwaysConfirm,
    )
    .unwrap_err();
    assert!(matches!(err, RigError::NoFrameRangeSelected));
    assert!(scene.keys.is_empty());
}

// ============================================================================
// 5. Safety
// ============================================================================

#[test]
fn declined_space_and_missing_nodes_leave_scene_untouched() {
    let fixture = RigFixture::new(limb(LimbKind::Leg, Side::Left));

    let mut scene = fixture.build();
    let end = fixture.ik_control(Role::Ankle);
    scene
        .node_mut(&end)
        .unwrap()
        .attributes
        .insert("footSpace".into(), 1.0);
    let snapshot = scene.nodes.clone();
    let err = ik_to_fk(
        &mut scene,
        fixture.limb(),
        &ReconcileOptions::default(),
        fixture.settings(),
        &mut NeverConfirm,
    )
    .unwrap_err();
    assert!(matches!(err, RigError::AmbiguousSpace { .. }));
    assert_eq!(scene.nodes, snapshot);

    let mut scene = fixture.build();
    scene.nodes.remove(&fixture.fk_joint(Role::Knee));
    let snapshot = scene.nodes.clone();
    let err = ik_to_fk(
        &mut scene,
        fixture.limb(),
        &ReconcileOptions::default(),
        fixture.settings(),
        &mut AlwaysConfirm,
    )
    .unwrap_err();
    assert!(matches!(err, RigError::MissingNode { role: Role::Knee, .. }));
    assert_eq!(scene.nodes, snapshot);
}

// ============================================================================
// 6. Selection
// ============================================================================

#[test]
fn toggle_selected_across_namespaces() {
    let hero = RigFixture::new(
        limb(LimbKind::Arm, Side::Left).with_namespace(Namespace::new("hero")),
    );
    let extra = RigFixture::new(
        limb(LimbKind::Leg, Side::Right).with_namespace(Namespace::new("extra")),
    )
    .with_blend(0.0);
    let mut scene = hero.build();
    extra.add_to(&mut scene);
    scene.selection = vec![
        hero.ik_control(Role::ElbowPv),
        hero.fk_control(Role::Wrist),
        extra.ik_control(Role::Toe),
    ];

    let results = toggle_selected(&mut scene, &RigSettings::default(), &mut AlwaysConfirm);
    let limbs: Vec<&LimbId> = results.iter().map(|(limb, _)| limb).collect();
    assert_eq!(limbs, vec![hero.limb(), extra.limb()]);
    assert!(results.iter().all(|(_, result)| result.is_ok()));

    assert_eq!(get_blend(&scene, hero.limb(), hero.settings()).unwrap(), 0.0);
    assert_eq!(get_blend(&scene, extra.limb(), extra.settings()).unwrap(), 1.0);
}
