use adbflow_protocol::OpenLinkResult;
use adbflow_runtime::{AuditLog, DeviceChannel};
use tracing::{info, warn};

use crate::command;
use crate::error::{Error, Result};

/// Opens one link per device, pairing device `i` with `links[i % links.len()]`.
///
/// Devices are handled one after another. A failure on one device is recorded
/// in its result and does not affect the others.
///
/// # Errors
///
/// [`Error::InvalidInput`] if either list is empty.
pub async fn open_links(
	channel: &dyn DeviceChannel,
	audit: &AuditLog,
	device_ids: &[String],
	links: &[String],
) -> Result<Vec<OpenLinkResult>> {
	if device_ids.is_empty() || links.is_empty() {
		return Err(Error::invalid_input("deviceIds and links must be non-empty arrays"));
	}

	let mut results = Vec::with_capacity(device_ids.len());
	for (i, device) in device_ids.iter().enumerate() {
		let link = &links[i % links.len()];
		let result = match channel.execute(device, &command::open_url(link)).await {
			Ok(_) => {
				info!(target = "adbflow.open_link", device = %device, link = %link, "opened link");
				audit.record(format!("Opened {link} on {device}"));
				OpenLinkResult {
					device_id: device.clone(),
					link: link.clone(),
					success: true,
					error: None,
				}
			}
			Err(err) => {
				warn!(target = "adbflow.open_link", device = %device, link = %link, error = %err, "failed to open link");
				OpenLinkResult {
					device_id: device.clone(),
					link: link.clone(),
					success: false,
					error: Some(err.to_string()),
				}
			}
		};
		results.push(result);
	}
	Ok(results)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testing::MockChannel;

	fn strings(items: &[&str]) -> Vec<String> {
		items.iter().map(|s| s.to_string()).collect()
	}

	#[tokio::test]
	async fn pairs_devices_with_links_cyclically() {
		let channel = MockChannel::new();
		let audit = AuditLog::memory();

		let results = open_links(&channel, &audit, &strings(&["d1", "d2", "d3", "d4"]), &strings(&["L1", "L2", "L3"]))
			.await
			.unwrap();

		let pairs: Vec<(&str, &str)> = results.iter().map(|r| (r.device_id.as_str(), r.link.as_str())).collect();
		assert_eq!(pairs, vec![("d1", "L1"), ("d2", "L2"), ("d3", "L3"), ("d4", "L1")]);
		assert!(results.iter().all(|r| r.success));
		assert_eq!(channel.instructions_for("d2"), vec![command::open_url("L2")]);
		assert!(audit.entries()[0].ends_with("Opened L1 on d1"));
	}

	#[tokio::test]
	async fn failure_is_reported_per_device() {
		let channel = MockChannel::new();
		channel.fail_device("d1");
		let audit = AuditLog::memory();

		let results = open_links(&channel, &audit, &strings(&["d1", "d2"]), &strings(&["L1"])).await.unwrap();

		assert!(!results[0].success);
		assert!(results[0].error.is_some());
		assert!(results[1].success);
		assert_eq!(audit.entries().len(), 1);
	}

	#[tokio::test]
	async fn empty_lists_are_rejected() {
		let channel = MockChannel::new();
		let audit = AuditLog::memory();

		let err = open_links(&channel, &audit, &[], &strings(&["L1"])).await.unwrap_err();
		assert_eq!(err.to_string(), "deviceIds and links must be non-empty arrays");
		assert!(open_links(&channel, &audit, &strings(&["d1"]), &[]).await.is_err());
		assert!(channel.sent().is_empty());
	}
}
