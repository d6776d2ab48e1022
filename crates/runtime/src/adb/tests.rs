use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use super::*;

/// Stand-in for adb. Positional args after the script path are the adb args:
/// `-s <device> shell <instruction>` or `devices`.
const FAKE_ADB: &str = r#"
if [ "$1" = "devices" ]; then
	printf 'List of devices attached\n* daemon started successfully\n192.168.1.10:5555\tdevice\nemulator-5554\toffline\n\n'
	exit 0
fi
case "$4" in
	offline) echo "error: device offline" >&2; exit 1 ;;
	broken) echo "permission denied" >&2; exit 3 ;;
	slow) sleep 5 ;;
	*) echo "ran $4 on $2" ;;
esac
"#;

fn fake_adb(dir: &TempDir) -> PathBuf {
	let script = dir.path().join("fake-adb.sh");
	fs::write(&script, FAKE_ADB).unwrap();
	script
}

fn channel(dir: &TempDir, audit: AuditLog) -> AdbChannel {
	AdbChannel::new("/bin/sh", audit).with_base_args([fake_adb(dir)])
}

#[test]
fn parse_device_list_skips_header_and_daemon_lines() {
	let out = "List of devices attached\n* daemon not running; starting now\n\
	           192.168.1.10:5555\tdevice\n\nR58M123\tunauthorized\n";
	let devices = parse_device_list(out);
	assert_eq!(
		devices,
		vec![
			DeviceEntry::new("192.168.1.10:5555", "device"),
			DeviceEntry::new("R58M123", "unauthorized"),
		]
	);
	assert!(devices[0].is_ready());
	assert!(!devices[1].is_ready());
}

#[test]
fn parse_device_list_handles_empty_output() {
	assert!(parse_device_list("").is_empty());
	assert!(parse_device_list("List of devices attached\n\n").is_empty());
}

#[cfg(unix)]
#[tokio::test]
async fn execute_returns_stdout_and_audits() {
	let dir = TempDir::new().unwrap();
	let audit = AuditLog::memory();
	let adb = channel(&dir, audit.clone());

	let out = adb.execute("192.168.1.10:5555", "input keyevent 66").await.unwrap();
	assert_eq!(out.trim(), "ran input keyevent 66 on 192.168.1.10:5555");

	let entries = audit.entries();
	assert_eq!(entries.len(), 1);
	assert!(entries[0].ends_with("Command executed: adb -s 192.168.1.10:5555 shell input keyevent 66"));
}

#[cfg(unix)]
#[tokio::test]
async fn offline_device_is_unreachable() {
	let dir = TempDir::new().unwrap();
	let audit = AuditLog::memory();
	let adb = channel(&dir, audit.clone());

	let err = adb.execute("10.0.0.1:5555", "offline").await.unwrap_err();
	assert!(err.is_unreachable(), "got {err:?}");
	assert_eq!(err.device(), Some("10.0.0.1:5555"));
	assert!(audit.entries()[0].contains("Error: adb -s 10.0.0.1:5555 shell offline"));
}

#[cfg(unix)]
#[tokio::test]
async fn other_failures_carry_exit_code() {
	let dir = TempDir::new().unwrap();
	let adb = channel(&dir, AuditLog::disabled());

	match adb.execute("10.0.0.1:5555", "broken").await.unwrap_err() {
		Error::CommandFailed { code, stderr, instruction, .. } => {
			assert_eq!(code, Some(3));
			assert_eq!(stderr, "permission denied");
			assert_eq!(instruction, "broken");
		}
		other => panic!("expected CommandFailed, got {other:?}"),
	}
}

#[cfg(unix)]
#[tokio::test]
async fn timeout_is_unreachable() {
	let dir = TempDir::new().unwrap();
	let adb = channel(&dir, AuditLog::disabled()).with_timeout(Duration::from_millis(100));

	let err = adb.execute("10.0.0.1:5555", "slow").await.unwrap_err();
	assert!(err.is_unreachable(), "got {err:?}");
}

#[cfg(unix)]
#[tokio::test]
async fn list_devices_parses_fake_output() {
	let dir = TempDir::new().unwrap();
	let adb = channel(&dir, AuditLog::disabled());

	let devices = adb.list_devices().await.unwrap();
	assert_eq!(devices.len(), 2);
	assert_eq!(devices[0].id, "192.168.1.10:5555");
	assert_eq!(devices[1].status, "offline");
}

#[tokio::test]
async fn missing_program_is_transport_error() {
	let audit = AuditLog::memory();
	let adb = AdbChannel::new("/definitely/not/adb", audit.clone());

	let err = adb.list_devices().await.unwrap_err();
	assert!(matches!(err, Error::Transport(_)), "got {err:?}");
	assert!(audit.entries()[0].contains("Error listing devices"));

	let err = adb.execute("d1", "input keyevent 3").await.unwrap_err();
	assert!(matches!(err, Error::Transport(_)), "got {err:?}");
}
