use async_trait::async_trait;
use clap::Parser;
use lgtm_server::server::{run_bot_server, AppContext};

use super::{Command, CommandContext};
use crate::Result;

/// Start server
#[derive(Parser)]
pub(crate) struct ServerCommand;

#[async_trait]
impl Command for ServerCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let context = AppContext::new(ctx.config, ctx.core_module);
        context.seed_database().await?;

        run_bot_server(context).await?;

        Ok(())
    }
}
