//! Scene commands run against documents on disk.

use std::fs;
use std::process::ExitCode;

use limbswitch_cli::commands::reconcile::{LimbArgs, SceneArgs};
use limbswitch_cli::commands::{bake, reconcile, toggle};
use limbswitch_cli::input::load_scene;
use limbswitch_rig::{AlwaysConfirm, NeverConfirm, ReconcileOptions};
use tempfile::TempDir;

const ARM_SCENE: &str = r#"{
  "nodes": {
    "L_Arm_null": {},
    "L_armUprFK_drv": { "translation": [0, 0, 0] },
    "L_armLwrFK_drv": { "translation": [0, -10, 0] },
    "L_armWristFK_drv": { "translation": [0, -20, -5], "rotation": [0, 0, 30] },
    "L_armUprIK_drv": { "translation": [0, 0, 0] },
    "L_armLwrIK_drv": { "translation": [0, -10, 0] },
    "L_armWristIK_drv": { "translation": [0, -20, -5] },
    "L_ArmUprFK_CTRL": { "parent": "L_Arm_null" },
    "L_ArmLwrFK_CTRL": { "parent": "L_Arm_null" },
    "L_ArmWristFK_CTRL": { "parent": "L_Arm_null" },
    "L_ArmUprIK_CTRL": { "parent": "L_Arm_null" },
    "L_ArmElbow_CTRL": { "parent": "L_Arm_null" },
    "L_ArmWristIK_CTRL": { "parent": "L_Arm_null" },
    "L_ArmPV_CTRL": { "parent": "L_Arm_null", "attributes": { "handSpace": 1.0 } },
    "L_ArmSetting_CTRL": { "attributes": { "ikBlend": 0.0 } }
  },
  "timeline": { "current": 1, "selected": [1, 4] },
  "selection": ["L_ArmPV_CTRL"]
}"#;

fn setup() -> (TempDir, SceneArgs) {
    let tmp = tempfile::tempdir().unwrap();
    let scene = tmp.path().join("shot.json");
    fs::write(&scene, ARM_SCENE).unwrap();
    let out = tmp.path().join("out").join("shot.json");
    let args = SceneArgs {
        scene: scene.to_str().unwrap().to_string(),
        out: Some(out.to_str().unwrap().to_string()),
        settings: None,
    };
    (tmp, args)
}

fn left_arm() -> LimbArgs {
    LimbArgs {
        limb: "arm".into(),
        side: Some("L".into()),
        namespace: None,
    }
}

#[test]
fn test_match_writes_output_scene() {
    let (_tmp, io) = setup();
    let code = reconcile::run(
        &io,
        &left_arm(),
        "ik-to-fk",
        &ReconcileOptions::default().with_key(true),
        Some(3.0),
        &mut AlwaysConfirm,
    )
    .unwrap();
    assert_eq!(code, ExitCode::SUCCESS);

    let scene = load_scene(io.out.as_deref().unwrap()).unwrap();
    let pole = scene.node("L_ArmPV_CTRL").unwrap().translation;
    assert!((pole[2] - 40.0 / 5.0_f64.sqrt()).abs() < 1e-9);
    assert!(scene.keys.iter().all(|k| k.time == 3.0));
    assert_eq!(scene.keys.len(), 2);
}

#[test]
fn test_declined_match_leaves_files_alone() {
    let (_tmp, io) = setup();
    let code = reconcile::run(
        &io,
        &left_arm(),
        "ik-to-fk",
        &ReconcileOptions::default(),
        None,
        &mut NeverConfirm,
    )
    .unwrap();
    assert_eq!(code, ExitCode::from(1));
    assert!(!std::path::Path::new(io.out.as_deref().unwrap()).exists());
    assert_eq!(fs::read_to_string(&io.scene).unwrap(), ARM_SCENE);
}

#[test]
fn test_bad_direction_is_an_error() {
    let (_tmp, io) = setup();
    let result = reconcile::run(
        &io,
        &left_arm(),
        "up-to-down",
        &ReconcileOptions::default(),
        None,
        &mut AlwaysConfirm,
    );
    assert!(result.is_err());
}

#[test]
fn test_bake_uses_scene_range() {
    let (_tmp, io) = setup();
    let code = bake::run(
        &io,
        &left_arm(),
        "fk-to-ik",
        &ReconcileOptions::default(),
        None,
        &mut AlwaysConfirm,
    )
    .unwrap();
    assert_eq!(code, ExitCode::SUCCESS);

    let scene = load_scene(io.out.as_deref().unwrap()).unwrap();
    let times: Vec<f64> = scene.keys_for("L_ArmWristFK_CTRL").map(|k| k.time).collect();
    assert_eq!(times, vec![1.0, 2.0, 3.0]);
    assert_eq!(scene.timeline.current, 4.0);
}

#[test]
fn test_bake_range_override() {
    let (_tmp, io) = setup();
    bake::run(
        &io,
        &left_arm(),
        "fk-to-ik",
        &ReconcileOptions::default(),
        Some((10.0, 12.0)),
        &mut AlwaysConfirm,
    )
    .unwrap();
    let scene = load_scene(io.out.as_deref().unwrap()).unwrap();
    assert_eq!(scene.keys_for("L_ArmUprFK_CTRL").count(), 2);
}

#[test]
fn test_toggle_and_toggle_selected() {
    let (_tmp, io) = setup();
    assert_eq!(
        toggle::run(&io, &left_arm(), &mut AlwaysConfirm).unwrap(),
        ExitCode::SUCCESS
    );
    let scene = load_scene(io.out.as_deref().unwrap()).unwrap();
    let blend = scene.node("L_ArmSetting_CTRL").unwrap().attributes["ikBlend"];
    assert_eq!(blend, 1.0);

    let io = SceneArgs {
        scene: io.out.clone().unwrap(),
        out: None,
        settings: None,
    };
    assert_eq!(
        toggle::run_selected(&io, &mut AlwaysConfirm).unwrap(),
        ExitCode::SUCCESS
    );
    let scene = load_scene(&io.scene).unwrap();
    assert_eq!(scene.node("L_ArmSetting_CTRL").unwrap().attributes["ikBlend"], 0.0);
}
