mod run;
mod step_list;

use std::path::Path;

use anyhow::Context;
use steps::RunConfig;

use crate::cli::{Cli, Commands};
use crate::output::OutputFormat;

/// Runs the selected command. Returns `Ok(false)` when it completed but
/// reported failures (e.g. a failed scenario), so the process exits non-zero.
pub async fn dispatch(cli: Cli, format: OutputFormat) -> anyhow::Result<bool> {
	let config = load_config(cli.config.as_deref())?;

	match cli.command {
		Commands::Run(args) => run::execute(args, config, format).await,
		Commands::Steps => step_list::execute(format),
	}
}

fn load_config(path: Option<&Path>) -> anyhow::Result<RunConfig> {
	match path {
		Some(path) => {
			RunConfig::from_file(path).with_context(|| format!("failed to load config {}", path.display()))
		}
		None => Ok(RunConfig::default()),
	}
}
