mod devices;
mod open_link;
mod run;
mod serve;

use crate::cli::{Cli, Commands};
use crate::config::AppConfig;
use crate::error::Result;
use crate::output::OutputFormat;

pub async fn dispatch(cli: Cli, format: OutputFormat) -> Result<()> {
	let mut config = AppConfig::load(cli.config.as_deref())?;
	cli.overrides().apply(&mut config);

	match cli.command {
		Commands::Serve(_) => serve::execute(&config).await,
		Commands::Devices => devices::execute(&config, format).await,
		Commands::OpenLink(args) => open_link::execute(&config, args, format).await,
		Commands::Run(args) => run::execute(&config, args).await,
	}
}
