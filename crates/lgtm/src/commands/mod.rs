//! Commands.

use std::{io::Write, sync::Arc};

use async_trait::async_trait;
use clap::Subcommand;
use lgtm_config::Config;
use lgtm_core::CoreModule;
use tokio::sync::RwLock;

use self::{debug::DebugCommand, server::ServerCommand};
use crate::Result;

mod debug;
mod server;

pub(crate) struct CommandContext {
    pub config: Config,
    pub core_module: CoreModule,
    pub writer: Arc<RwLock<dyn Write + Send + Sync>>,
}

#[async_trait]
pub(crate) trait Command {
    async fn execute(self, ctx: CommandContext) -> Result<()>;
}

/// Command
#[derive(Subcommand)]
pub(crate) enum SubCommand {
    Server(ServerCommand),
    Debug(DebugCommand),
}

#[async_trait]
impl Command for SubCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        match self {
            Self::Server(sub) => sub.execute(ctx).await,
            Self::Debug(sub) => sub.execute(ctx).await,
        }
    }
}
