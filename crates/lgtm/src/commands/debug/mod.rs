//! Debug commands.

use async_trait::async_trait;
use clap::{Parser, Subcommand};

use super::{Command, CommandContext};
use crate::Result;

mod check_config;
mod check_roster;

use check_config::DebugCheckConfigCommand;
use check_roster::DebugCheckRosterCommand;

/// Debug related commands
#[derive(Parser)]
pub(crate) struct DebugCommand {
    #[clap(subcommand)]
    inner: DebugSubCommand,
}

#[async_trait]
impl Command for DebugCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        self.inner.execute(ctx).await
    }
}

#[derive(Subcommand)]
enum DebugSubCommand {
    CheckConfig(DebugCheckConfigCommand),
    CheckRoster(DebugCheckRosterCommand),
}

#[async_trait]
impl Command for DebugSubCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        match self {
            Self::CheckConfig(sub) => sub.execute(ctx).await,
            Self::CheckRoster(sub) => sub.execute(ctx).await,
        }
    }
}
