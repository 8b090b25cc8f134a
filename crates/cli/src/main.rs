use clap::Parser;
use sd_cli::{
	cli::Cli,
	commands, logging,
	output::{self, CommandError, CommandResult, OutputFormat, ResultBuilder},
};

#[tokio::main]
async fn main() {
	let cli = Cli::parse();
	logging::init_logging(cli.verbose);

	let format = cli.format;
	let command = cli.command.name();

	match commands::dispatch(cli, format).await {
		Ok(true) => {}
		Ok(false) => std::process::exit(1),
		Err(err) => {
			handle_error(&err, command, format);
			std::process::exit(1);
		}
	}
}

fn handle_error(err: &anyhow::Error, command: &'static str, format: OutputFormat) {
	let code = err
		.downcast_ref::<steps::Error>()
		.map_or_else(|| "INTERNAL_ERROR".to_string(), |e| e.kind().to_string());
	let cmd_error = CommandError {
		code,
		message: format!("{err:#}"),
	};

	// Always print to stderr for humans
	output::print_error_stderr(&cmd_error);

	// Also emit the envelope to stdout with ok=false for machine consumers
	if format != OutputFormat::Text {
		let result: CommandResult<()> = ResultBuilder::new(command)
			.error(cmd_error.code, cmd_error.message)
			.build();
		output::print_result(&result, format);
	}
}
