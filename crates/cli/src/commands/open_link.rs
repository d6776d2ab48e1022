use adbflow_protocol::OpenLinkResponse;

use crate::cli::OpenLinkArgs;
use crate::config::AppConfig;
use crate::error::Result;
use crate::output::{OutputFormat, ResultBuilder, print_result};
use crate::runtime::{build_channel, open_audit};

pub async fn execute(config: &AppConfig, args: OpenLinkArgs, format: OutputFormat) -> Result<()> {
	let builder = ResultBuilder::new("open-link");
	let audit = open_audit(config)?;
	let channel = build_channel(config, audit.clone())?;

	let results = adbflow::open_links(&channel, &audit, &args.devices, &args.links).await?;

	print_result(&builder.data(OpenLinkResponse { results }).build(), format);
	Ok(())
}
