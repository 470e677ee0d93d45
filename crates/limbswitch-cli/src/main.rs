//! limbswitch CLI - IK/FK limb matching on scene documents
//!
//! This binary loads a JSON scene, runs a match, bake or toggle on it and
//! writes the scene back.

use clap::Parser;
use std::process::ExitCode;

use limbswitch_cli::{commands, logging, prompt};

mod cli_args;

use cli_args::{reconcile_options, Cli, Commands};

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let settings = cli.settings.as_deref();

    let result = match cli.command {
        Commands::Resolve { limb, json } => commands::resolve::run(
            &limb.limb,
            limb.side.as_deref(),
            limb.namespace.as_deref(),
            settings,
            json,
        ),
        Commands::Pole {
            root,
            mid,
            end,
            limb,
            amplitude,
            json,
        } => commands::pole::run(&root, &mid, &end, &limb, amplitude, settings, json),
        Commands::Match {
            scene,
            limb,
            direction,
            key,
            stump,
            at,
        } => commands::reconcile::run(
            &scene.to_args(settings),
            &limb.to_args(),
            &direction,
            &reconcile_options(key, stump, scene.yes),
            at,
            prompt::confirmer(scene.yes).as_mut(),
        ),
        Commands::Bake {
            scene,
            limb,
            direction,
            stump,
            start,
            end,
        } => commands::bake::run(
            &scene.to_args(settings),
            &limb.to_args(),
            &direction,
            &reconcile_options(true, stump, scene.yes),
            start.zip(end),
            prompt::confirmer(scene.yes).as_mut(),
        ),
        Commands::Toggle { scene, limb } => commands::toggle::run(
            &scene.to_args(settings),
            &limb.to_args(),
            prompt::confirmer(scene.yes).as_mut(),
        ),
        Commands::ToggleSelected { scene } => commands::toggle::run_selected(
            &scene.to_args(settings),
            prompt::confirmer(scene.yes).as_mut(),
        ),
        Commands::Settings { output } => commands::settings::run(settings, output.as_deref()),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_match() {
        let cli = Cli::try_parse_from([
            "limbswitch",
            "match",
            "--scene",
            "shot.json",
            "--limb",
            "leg",
            "--side",
            "R",
            "--direction",
            "ik-to-fk",
            "--key",
            "--stump",
            "--settings",
            "rig.json",
        ])
        .unwrap();
        assert_eq!(cli.settings.as_deref(), Some("rig.json"));
        match cli.command {
            Commands::Match {
                scene,
                limb,
                direction,
                key,
                stump,
                at,
            } => {
                assert_eq!(scene.scene, "shot.json");
                assert!(!scene.yes);
                assert_eq!(limb.limb, "leg");
                assert_eq!(limb.side.as_deref(), Some("R"));
                assert_eq!(direction, "ik-to-fk");
                assert!(key && stump);
                assert_eq!(at, None);
            }
            _ => panic!("expected match command"),
        }
    }

    #[test]
    fn test_cli_parses_pole_with_negative_coordinates() {
        let cli = Cli::try_parse_from([
            "limbswitch",
            "pole",
            "--root",
            "0,0,0",
            "--mid",
            "0,-10,0",
            "--end",
            "-1,-20,-5",
        ])
        .unwrap();
        match cli.command {
            Commands::Pole { end, limb, .. } => {
                assert_eq!(end, "-1,-20,-5");
                assert_eq!(limb, "arm");
            }
            _ => panic!("expected pole command"),
        }
    }

    #[test]
    fn test_cli_bake_range_requires_both_ends() {
        let result = Cli::try_parse_from([
            "limbswitch",
            "bake",
            "--scene",
            "s.json",
            "--limb",
            "arm",
            "--direction",
            "ik-to-fk",
            "--start",
            "1",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_yes_proceeds_without_asking() {
        use limbswitch_rig::SpacePolicy;
        assert_eq!(
            reconcile_options(false, false, true).space_policy,
            SpacePolicy::Proceed
        );
        assert_eq!(
            reconcile_options(true, false, false).space_policy,
            SpacePolicy::Ask
        );
    }
}
