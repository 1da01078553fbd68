use std::path::PathBuf;

use async_trait::async_trait;
use clap::Parser;
use lgtm_core::{approvals::ApprovalRegistry, versions::VersionStrategy};
use lgtm_models::RepoConfig;

use crate::{
    commands::{Command, CommandContext},
    Result,
};

/// Parse a repository settings file and show the resolved settings
#[derive(Parser)]
pub(crate) struct DebugCheckConfigCommand {
    /// Settings file (e.g. `.lgtm`)
    config_file: PathBuf,
}

#[async_trait]
impl Command for DebugCheckConfigCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let content = tokio::fs::read_to_string(&self.config_file).await?;
        let config = RepoConfig::parse(&content, &ctx.config.defaults)?;

        let mut writer = ctx.writer.write().await;
        writeln!(writer, "{}", serde_json::to_string_pretty(&config)?)?;

        if !config.matcher().is_valid() {
            writeln!(
                writer,
                "Warning: pattern '{}' is invalid, no comment will match",
                config.pattern()
            )?;
        }

        if let Err(e) = ApprovalRegistry::with_default_algorithms().lookup(&config.approval_algorithm)
        {
            writeln!(writer, "Warning: {}", e)?;
        }

        if config.do_version {
            if let Err(e) = config.version_algorithm.parse::<VersionStrategy>() {
                writeln!(writer, "Warning: {}", e)?;
            }
        }

        Ok(())
    }
}
