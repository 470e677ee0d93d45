//! CLI argument definitions for the limbswitch command-line interface.
//!
//! All `#[derive(Parser)]`, `#[derive(Args)]` and `#[derive(Subcommand)]`
//! types are defined here, keeping `main.rs` focused on dispatch logic.

use clap::{Args, Parser, Subcommand};
use limbswitch_cli::commands::reconcile::{LimbArgs, SceneArgs};
use limbswitch_rig::{ReconcileOptions, SpacePolicy};

/// limbswitch - IK/FK limb matching, baking and toggling
#[derive(Parser)]
#[command(name = "limbswitch")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub(crate) struct Cli {
    /// Rig settings file (JSON); built-in biped defaults when omitted
    #[arg(long, global = true)]
    pub settings: Option<String>,

    /// Log engine decisions to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Which limb to operate on.
#[derive(Args, Debug, Clone)]
pub(crate) struct LimbOpts {
    /// Limb kind (arm or leg)
    #[arg(short, long)]
    pub limb: String,

    /// Side (L, left, R, right, C, centre, ...); omit for unsided limbs
    #[arg(short, long)]
    pub side: Option<String>,

    /// Namespace of the rig instance
    #[arg(short, long)]
    pub namespace: Option<String>,
}

impl LimbOpts {
    pub fn to_args(&self) -> LimbArgs {
        LimbArgs {
            limb: self.limb.clone(),
            side: self.side.clone(),
            namespace: self.namespace.clone(),
        }
    }
}

/// Scene document input and output.
#[derive(Args, Debug, Clone)]
pub(crate) struct SceneOpts {
    /// Scene document (JSON)
    #[arg(long)]
    pub scene: String,

    /// Output scene path (default: overwrite --scene)
    #[arg(short, long)]
    pub out: Option<String>,

    /// Answer yes to the parent-space question
    #[arg(short, long)]
    pub yes: bool,
}

impl SceneOpts {
    pub fn to_args(&self, settings: Option<&str>) -> SceneArgs {
        SceneArgs {
            scene: self.scene.clone(),
            out: self.out.clone(),
            settings: settings.map(str::to_string),
        }
    }
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Print the node names a limb resolves to
    Resolve {
        #[command(flatten)]
        limb: LimbOpts,

        /// Output JSON
        #[arg(long)]
        json: bool,
    },

    /// Compute a pole-vector position from three joint positions
    Pole {
        /// Root joint position (x,y,z)
        #[arg(long, allow_hyphen_values = true)]
        root: String,

        /// Middle joint position (x,y,z)
        #[arg(long, allow_hyphen_values = true)]
        mid: String,

        /// End joint position (x,y,z)
        #[arg(long, allow_hyphen_values = true)]
        end: String,

        /// Limb kind, selects the amplitude scale
        #[arg(short, long, default_value = "arm")]
        limb: String,

        /// Base amplitude override
        #[arg(short, long)]
        amplitude: Option<f64>,

        /// Output JSON
        #[arg(long)]
        json: bool,
    },

    /// Match one chain of a limb onto the other
    Match {
        #[command(flatten)]
        scene: SceneOpts,

        #[command(flatten)]
        limb: LimbOpts,

        /// Direction (fk-to-ik or ik-to-fk)
        #[arg(short, long)]
        direction: String,

        /// Key the matched controls
        #[arg(short, long)]
        key: bool,

        /// The limb has no foot controls
        #[arg(long)]
        stump: bool,

        /// Frame to match on (default: the scene's current frame)
        #[arg(long, allow_hyphen_values = true)]
        at: Option<f64>,
    },

    /// Match and key a limb on every frame of a range
    Bake {
        #[command(flatten)]
        scene: SceneOpts,

        #[command(flatten)]
        limb: LimbOpts,

        /// Direction (fk-to-ik or ik-to-fk)
        #[arg(short, long)]
        direction: String,

        /// The limb has no foot controls
        #[arg(long)]
        stump: bool,

        /// First frame (default: the scene's selected range)
        #[arg(long, requires = "end", allow_hyphen_values = true)]
        start: Option<f64>,

        /// End frame, exclusive
        #[arg(long, requires = "start", allow_hyphen_values = true)]
        end: Option<f64>,
    },

    /// Flip a limb between IK and FK without popping
    Toggle {
        #[command(flatten)]
        scene: SceneOpts,

        #[command(flatten)]
        limb: LimbOpts,
    },

    /// Toggle every limb implied by the scene's selection
    ToggleSelected {
        #[command(flatten)]
        scene: SceneOpts,
    },

    /// Print or write the effective rig settings
    Settings {
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<String>,
    },
}

/// Reconcile options from command flags.
pub(crate) fn reconcile_options(key: bool, stump: bool, yes: bool) -> ReconcileOptions {
    let policy = if yes {
        SpacePolicy::Proceed
    } else {
        SpacePolicy::Ask
    };
    ReconcileOptions::default()
        .with_key(key)
        .with_stump(stump)
        .with_space_policy(policy)
}
