//! LGTM command line.

use anyhow::Result;
use args::{Args, CommandExecutor};
use clap::Parser;
use lgtm_config::Config;
use lgtm_logging::configure_logging;
use shadow_rs::shadow;
use tracing::info;

pub(crate) mod args;
mod commands;
mod config_validator;
#[cfg(test)]
mod testutils;

shadow!(build);

/// Package version plus the commit the binary was built from.
pub fn version_line() -> String {
    format!(
        "{} {} ({}, built {})",
        build::PROJECT_NAME,
        build::PKG_VERSION,
        build::SHORT_COMMIT,
        build::BUILD_TIME_3339
    )
}

/// Parse arguments, load the environment, then run the requested command.
///
/// Only the server needs a complete environment, debug commands run with
/// whatever is set.
pub fn initialize_command_line() -> Result<()> {
    let args = Args::parse();

    dotenv::dotenv().ok();
    let config = Config::from_env(build::PKG_VERSION.to_string());
    configure_logging(&config)?;

    if args.runs_server() {
        config_validator::validate_configuration(&config)?;
    }

    info!(version = %version_line(), message = "Starting lgtm");
    CommandExecutor::parse_args(config, args)
}
