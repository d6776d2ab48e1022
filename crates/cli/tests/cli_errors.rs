//! Error reporting of the `adbflow` binary.

use std::process::Command;

use serde_json::Value;
use tempfile::TempDir;

fn run_adbflow(args: &[&str]) -> (bool, String, String) {
	let output = Command::new(env!("CARGO_BIN_EXE_adbflow"))
		.args(args)
		.env_remove("RUST_LOG")
		.output()
		.expect("failed to execute adbflow");
	(
		output.status.success(),
		String::from_utf8_lossy(&output.stdout).into_owned(),
		String::from_utf8_lossy(&output.stderr).into_owned(),
	)
}

#[test]
fn missing_config_file_fails_with_json_envelope() {
	let dir = TempDir::new().unwrap();
	let config = dir.path().join("missing.json");

	let (ok, stdout, stderr) = run_adbflow(&["--config", config.to_str().unwrap(), "devices"]);

	assert!(!ok);
	assert!(stderr.contains("Error [CONFIG]"));
	let envelope: Value = serde_json::from_str(&stdout).unwrap();
	assert_eq!(envelope["ok"], false);
	assert_eq!(envelope["error"]["code"], "CONFIG");
}

#[test]
fn malformed_config_in_text_mode_prints_only_to_stderr() {
	let dir = TempDir::new().unwrap();
	let config = dir.path().join("config.json");
	std::fs::write(&config, "{ nope").unwrap();

	let (ok, stdout, stderr) = run_adbflow(&["-f", "text", "--config", config.to_str().unwrap(), "devices"]);

	assert!(!ok);
	assert!(stdout.is_empty());
	assert!(stderr.contains("invalid config"));
}

#[test]
fn undiscoverable_adb_reports_a_transport_error() {
	let dir = TempDir::new().unwrap();
	let config = dir.path().join("config.json");
	std::fs::write(
		&config,
		r#"{ "adb": { "path": "/definitely/not/adb" }, "audit": { "enabled": false } }"#,
	)
	.unwrap();

	let output = Command::new(env!("CARGO_BIN_EXE_adbflow"))
		.args(["--config", config.to_str().unwrap(), "devices"])
		.env_remove("RUST_LOG")
		.env_remove("ADBFLOW_ADB")
		.env_remove("ANDROID_HOME")
		.env_remove("ANDROID_SDK_ROOT")
		.env("PATH", dir.path())
		.output()
		.expect("failed to execute adbflow");

	assert!(!output.status.success());
	let envelope: Value = serde_json::from_slice(&output.stdout).unwrap();
	assert_eq!(envelope["error"]["code"], "TRANSPORT");
}

#[test]
fn unknown_subcommand_is_rejected() {
	let (ok, _, stderr) = run_adbflow(&["launch"]);
	assert!(!ok);
	assert!(stderr.contains("unrecognized subcommand"));
}
