use std::{io::Write, path::PathBuf, sync::Arc};

use clap::Parser;
use lgtm_config::Config;
use lgtm_core::CoreModule;
use tokio::sync::RwLock;

use crate::{
    args::{Args, CommandExecutor},
    commands::CommandContext,
};

pub(crate) struct CommandContextTest {
    pub config: Config,
    pub core_module: CoreModule,
}

impl CommandContextTest {
    pub fn new() -> Self {
        Self {
            config: Config::from_env_no_version(),
            core_module: CoreModule::builder().build(),
        }
    }

    pub fn into_context(self, writer: Arc<RwLock<dyn Write + Send + Sync>>) -> CommandContext {
        CommandContext {
            config: self.config,
            core_module: self.core_module,
            writer,
        }
    }
}

/// Write a file in the temporary directory, unique to this process.
pub(crate) fn write_temp_file(name: &str, content: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("lgtm-{}-{}", std::process::id(), name));
    std::fs::write(&path, content).unwrap();
    path
}

pub(crate) async fn test_command(ctx: CommandContextTest, command_args: &[&str]) -> String {
    let buf = Arc::new(RwLock::new(Vec::new()));

    {
        let command_args = {
            let mut tmp_args = vec!["lgtm"];
            tmp_args.extend(command_args);
            tmp_args
        };

        let args = Args::try_parse_from(command_args);
        match args {
            Ok(args) => CommandExecutor::parse_args_async(args, ctx.into_context(buf.clone()))
                .await
                .unwrap(),
            Err(e) => {
                eprintln!("{}", e);
                panic!("Parse error.")
            }
        }
    }

    let vec = buf.read().await.to_vec();
    std::str::from_utf8(&vec).unwrap().to_string()
}
