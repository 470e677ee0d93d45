//! CLI command implementations

pub mod bake;
pub mod pole;
pub mod reconcile;
pub mod resolve;
pub mod settings;
pub mod toggle;

use colored::Colorize;
use limbswitch_core::{CodedError, Vec3};
use limbswitch_rig::RigError;

/// Prints a rig error with its code.
pub(crate) fn print_rig_error(err: &RigError) {
    eprintln!("{} [{}] {}", "FAILED".red().bold(), err.code(), err);
}

/// Prints a rig error and returns the failure exit code.
pub(crate) fn report_rig_error(err: &RigError) -> std::process::ExitCode {
    print_rig_error(err);
    std::process::ExitCode::from(1)
}

pub(crate) fn format_vec3(v: Vec3) -> String {
    format!("({:.4}, {:.4}, {:.4})", v[0], v[1], v[2])
}
