use adbflow_protocol::DeviceEntry;
use async_trait::async_trait;

use crate::error::Result;

/// Sends shell instructions to addressed devices.
///
/// Implementations must not serialize unrelated devices behind one another:
/// each call is independent and only ordered relative to the caller's own
/// previous calls. Nothing here retries.
#[async_trait]
pub trait DeviceChannel: Send + Sync {
	/// Runs `instruction` in the shell of `device` and returns its stdout.
	async fn execute(&self, device: &str, instruction: &str) -> Result<String>;

	/// Lists the devices the transport can currently see.
	async fn list_devices(&self) -> Result<Vec<DeviceEntry>>;
}
