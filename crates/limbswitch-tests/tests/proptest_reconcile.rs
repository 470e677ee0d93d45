//! Property-based tests for limb matching and baking.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p limbswitch-tests --test proptest_reconcile
//! ```

use proptest::prelude::*;

use limbswitch_core::geometry::{cross, length, normalize, subtract};
use limbswitch_core::{LimbId, LimbKind, RigSettings, Role, Side, Vec3};
use limbswitch_rig::{
    bake_fk_to_ik, fk_to_ik, ik_to_fk, AlwaysConfirm, ReconcileOptions, RigError,
    TimelineReader,
};
use limbswitch_tests::{assert_vec3_close, RigFixture};

fn point() -> impl Strategy<Value = Vec3> {
    [-50.0..50.0f64, -50.0..50.0f64, -50.0..50.0f64]
}

fn rotation() -> impl Strategy<Value = Vec3> {
    [-170.0..170.0f64, -80.0..80.0f64, -170.0..170.0f64]
}

fn kind() -> impl Strategy<Value = LimbKind> {
    prop_oneof![Just(LimbKind::Arm), Just(LimbKind::Leg)]
}

fn side() -> impl Strategy<Value = Side> {
    prop_oneof![Just(Side::Left), Just(Side::Right)]
}

fn is_bent(chain: &[Vec3; 3]) -> bool {
    let a = subtract(chain[0], chain[1]);
    let b = subtract(chain[2], chain[1]);
    length(a) > 1e-2 && length(b) > 1e-2 && length(cross(normalize(a), normalize(b))) > 1e-2
}

// ============================================================================
// 1. Round Trips
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Matching IK to FK then FK to IK leaves the FK controls where they were.
    #[test]
    fn round_trip_restores_fk_pose(
        kind in kind(),
        side in side(),
        chain in [point(), point(), point()],
        rotations in [rotation(), rotation(), rotation()],
    ) {
        prop_assume!(is_bent(&chain));
        let fixture = RigFixture::new(LimbId::new(kind, Some(side)))
            .with_chain(chain)
            .with_rotations(rotations);
        let mut scene = fixture.build();
        let options = ReconcileOptions::default();

        ik_to_fk(&mut scene, fixture.limb(), &options, fixture.settings(), &mut AlwaysConfirm)
            .unwrap();
        fk_to_ik(&mut scene, fixture.limb(), &options, fixture.settings()).unwrap();

        for (i, role) in kind.targets().into_iter().enumerate() {
            let node = scene.node(&fixture.fk_control(role)).unwrap();
            assert_vec3_close(node.translation, chain[i], 1e-5);
            assert_vec3_close(node.rotation, rotations[i], 1e-5);
        }
    }

    /// The pole control always ends up off the mid joint for a bent chain.
    #[test]
    fn pole_leaves_mid_joint(
        kind in kind(),
        chain in [point(), point(), point()],
    ) {
        prop_assume!(is_bent(&chain));
        let fixture = RigFixture::new(LimbId::new(kind, Some(Side::Left))).with_chain(chain);
        let mut scene = fixture.build();
        ik_to_fk(
            &mut scene,
            fixture.limb(),
            &ReconcileOptions::default(),
            fixture.settings(),
            &mut AlwaysConfirm,
        )
        .unwrap();

        let pole = scene.node(&fixture.ik_control(kind.pole_role())).unwrap();
        prop_assert!(length(subtract(pole.translation, chain[1])) > 1e-6);
    }
}

// ============================================================================
// 2. Foot Compensation
// ============================================================================

proptest! {
    /// Right feet get an extra half turn in X over left feet.
    #[test]
    fn mirrored_feet_differ_in_x(ankle in rotation()) {
        let rotations = [[0.0; 3], [0.0; 3], ankle];
        let settings = RigSettings::default();
        let options = ReconcileOptions::default();

        let left = RigFixture::new(LimbId::new(LimbKind::Leg, Some(Side::Left)))
            .with_rotations(rotations);
        let right = RigFixture::new(LimbId::new(LimbKind::Leg, Some(Side::Right)))
            .with_rotations(rotations);
        let mut scene = left.build();
        right.add_to(&mut scene);

        ik_to_fk(&mut scene, left.limb(), &options, &settings, &mut AlwaysConfirm).unwrap();
        ik_to_fk(&mut scene, right.limb(), &options, &settings, &mut AlwaysConfirm).unwrap();

        let l = scene.node(&left.ik_control(Role::Ankle)).unwrap().rotation;
        let r = scene.node(&right.ik_control(Role::Ankle)).unwrap().rotation;
        assert_vec3_close([r[0] - l[0], r[1] - l[1], r[2] - l[2]], [-180.0, 0.0, 0.0], 1e-9);
    }
}

// ============================================================================
// 3. Bake Ranges
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// A bake keys one frame per whole step of the half-open range.
    #[test]
    fn bake_keys_every_frame_but_the_last(start in -50i32..50, span in 2i32..12) {
        let fixture = RigFixture::new(LimbId::new(LimbKind::Arm, Some(Side::Left)));
        let (start, end) = (start as f64, (start + span) as f64);
        let mut scene = fixture.build().with_range(start, end);

        let report = bake_fk_to_ik(
            &mut scene,
            fixture.limb(),
            &ReconcileOptions::default(),
            fixture.settings(),
            &mut AlwaysConfirm,
        )
        .unwrap();

        prop_assert_eq!(report.frames.len(), span as usize);
        prop_assert_eq!(report.frames.first().copied(), Some(start));
        prop_assert_eq!(scene.current_time(), end);
        let keyed = scene.keys_for(&fixture.fk_control(Role::Elbow)).count();
        prop_assert_eq!(keyed, span as usize);
    }

    /// Ranges of a single frame or less are refused without keying.
    #[test]
    fn short_ranges_are_refused(start in -50i32..50, span in 0.0..=1.0f64) {
        let fixture = RigFixture::new(LimbId::new(LimbKind::Leg, Some(Side::Right)));
        let start = start as f64;
        let mut scene = fixture.build().with_range(start, start + span);

        let err = bake_fk_to_ik(
            &mut scene,
            fixture.limb(),
            &ReconcileOptions::default(),
            fixture.settings(),
            &mut AlwaysConfirm,
        )
        .unwrap_err();
        prop_assert!(matches!(err, RigError::NoFrameRangeSelected));
        prop_assert!(scene.keys.is_empty());
    }
}
