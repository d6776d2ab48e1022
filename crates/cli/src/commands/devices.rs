use adbflow_runtime::DeviceChannel;
use tracing::debug;

use crate::config::AppConfig;
use crate::error::Result;
use crate::output::{OutputFormat, ResultBuilder, print_result};
use crate::runtime::{build_channel, open_audit};

pub async fn execute(config: &AppConfig, format: OutputFormat) -> Result<()> {
	let builder = ResultBuilder::new("devices");
	let channel = build_channel(config, open_audit(config)?)?;

	let devices = channel.list_devices().await?;
	debug!(target = "adbflow.cli", count = devices.len(), "listed devices");

	print_result(&builder.data(devices).build(), format);
	Ok(())
}
