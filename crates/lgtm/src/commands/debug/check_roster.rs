use std::path::PathBuf;

use async_trait::async_trait;
use clap::Parser;
use lgtm_models::Roster;

use crate::{
    commands::{Command, CommandContext},
    Result,
};

/// Parse a roster file and show its reviewers
#[derive(Parser)]
pub(crate) struct DebugCheckRosterCommand {
    /// Roster file (e.g. `MAINTAINERS`)
    roster_file: PathBuf,
    /// Only keep members of this organization
    #[clap(long)]
    org: Option<String>,
}

#[async_trait]
impl Command for DebugCheckRosterCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let content = tokio::fs::read_to_string(&self.roster_file).await?;
        let mut roster = Roster::parse(&content)?;
        if let Some(org) = &self.org {
            roster = roster.for_org(org)?;
        }

        writeln!(
            ctx.writer.write().await,
            "{}",
            serde_json::to_string_pretty(&roster)?
        )?;

        Ok(())
    }
}
