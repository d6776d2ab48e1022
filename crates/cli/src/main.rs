use adbflow_cli::{
	cli::Cli,
	commands,
	error::CliError,
	logging,
	output::{self, OutputFormat, ResultBuilder},
};
use clap::Parser;

#[tokio::main]
async fn main() {
	let cli = Cli::parse();
	logging::init_logging(cli.verbose);

	let format = cli.format;

	if let Err(err) = commands::dispatch(cli, format).await {
		handle_error(err, format);
		std::process::exit(1);
	}
}

fn handle_error(err: CliError, format: OutputFormat) {
	let cmd_error = err.to_command_error();

	output::print_error_stderr(&cmd_error);

	if format == OutputFormat::Json {
		let result: output::CommandResult<()> = ResultBuilder::new("adbflow")
			.error(cmd_error.code, &cmd_error.message)
			.build();
		output::print_result(&result, format);
	}
}
