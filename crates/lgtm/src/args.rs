use std::sync::Arc;

use clap::Parser;
use lgtm_config::Config;
use lgtm_core::CoreModule;
use tokio::sync::RwLock;

use crate::{
    commands::{Command, CommandContext, SubCommand},
    Result,
};

/// Pull request approval bot
#[derive(Parser)]
#[command(version, long_version = crate::build::CLAP_LONG_VERSION)]
pub struct Args {
    #[command(subcommand)]
    cmd: SubCommand,
}

impl Args {
    pub fn runs_server(&self) -> bool {
        matches!(self.cmd, SubCommand::Server(_))
    }
}

pub struct CommandExecutor;

impl CommandExecutor {
    pub fn parse_args(config: Config, args: Args) -> Result<()> {
        let sync = |config: Config, args: Args| async move {
            let ctx = CommandContext {
                config,
                core_module: CoreModule::builder().build(),
                writer: Arc::new(RwLock::new(std::io::stdout())),
            };

            Self::parse_args_async(args, ctx).await
        };

        actix_rt::System::with_tokio_rt(|| {
            tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .expect("Could not build tokio runtime")
        })
        .block_on(sync(config, args))?;

        Ok(())
    }

    pub(crate) async fn parse_args_async(args: Args, ctx: CommandContext) -> Result<()> {
        args.cmd.execute(ctx).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_server_runs_server() {
        assert!(Args::try_parse_from(["lgtm", "server"]).unwrap().runs_server());
        assert!(!Args::try_parse_from(["lgtm", "debug", "check-config", ".lgtm"])
            .unwrap()
            .runs_server());
        assert!(Args::try_parse_from(["lgtm", "deploy"]).is_err());
    }
}
