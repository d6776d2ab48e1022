use serde::{Deserialize, Serialize};

/// A device as reported by `adb devices`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceEntry {
	/// Serial or `host:port` address.
	pub id: String,
	/// Connection state, e.g. `device`, `offline`, `unauthorized`.
	pub status: String,
}

impl DeviceEntry {
	pub fn new(id: impl Into<String>, status: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			status: status.into(),
		}
	}

	/// Returns true when ADB reports the device as ready for commands.
	pub fn is_ready(&self) -> bool {
		self.status == "device"
	}
}
