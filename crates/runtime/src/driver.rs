//! ADB executable discovery
//!
//! Locates the `adb` binary used by [`AdbChannel`](crate::AdbChannel).

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Environment variable that points directly at an `adb` binary.
pub const ADB_ENV: &str = "ADBFLOW_ADB";

/// SDK root variables checked for a `platform-tools/adb` binary, in order.
const SDK_ENV_VARS: [&str; 2] = ["ANDROID_HOME", "ANDROID_SDK_ROOT"];

/// Get the path to the `adb` executable
///
/// Candidates are tried in the following order:
/// 1. `explicit`, usually from the config file
/// 2. `ADBFLOW_ADB` environment variable
/// 3. `$ANDROID_HOME/platform-tools/adb`, then `$ANDROID_SDK_ROOT/platform-tools/adb`
/// 4. `adb` on `PATH`
///
/// A configured candidate that does not exist is skipped with a warning rather
/// than failing outright, so a stale config entry still finds a working adb.
///
/// # Errors
///
/// Returns [`Error::AdbNotFound`] if no candidate exists.
pub fn find_adb(explicit: Option<&Path>) -> Result<PathBuf> {
	if let Some(path) = explicit {
		if let Some(found) = usable_candidate("config", path.to_path_buf()) {
			return Ok(found);
		}
	}

	if let Some(path) = std::env::var_os(ADB_ENV).map(PathBuf::from) {
		if let Some(found) = usable_candidate(ADB_ENV, path) {
			return Ok(found);
		}
	}

	for var in SDK_ENV_VARS {
		if let Some(root) = std::env::var_os(var) {
			if let Some(found) = usable_candidate(var, sdk_candidate(Path::new(&root))) {
				return Ok(found);
			}
		}
	}

	match which::which("adb") {
		Ok(path) => {
			debug!(target = "adbflow.adb", path = %path.display(), "using adb from PATH");
			Ok(path)
		}
		Err(_) => Err(Error::AdbNotFound),
	}
}

/// Returns the platform-tools adb path below an SDK root.
fn sdk_candidate(sdk_root: &Path) -> PathBuf {
	let name = if cfg!(windows) { "adb.exe" } else { "adb" };
	sdk_root.join("platform-tools").join(name)
}

fn usable_candidate(source: &str, path: PathBuf) -> Option<PathBuf> {
	if path.is_file() {
		debug!(target = "adbflow.adb", source, path = %path.display(), "using adb candidate");
		return Some(path);
	}

	warn!(
		target = "adbflow.adb",
		source,
		path = %path.display(),
		"adb candidate does not exist; trying next source"
	);
	None
}

#[cfg(test)]
mod tests {
	use std::fs;

	use tempfile::TempDir;

	use super::*;

	#[test]
	fn explicit_path_wins_when_present() {
		let dir = TempDir::new().unwrap();
		let adb = dir.path().join("adb");
		fs::write(&adb, "#!/bin/sh\n").unwrap();

		assert_eq!(find_adb(Some(&adb)).unwrap(), adb);
	}

	#[test]
	fn sdk_candidate_points_into_platform_tools() {
		let path = sdk_candidate(Path::new("/opt/android-sdk"));
		assert!(path.starts_with("/opt/android-sdk/platform-tools"));
		assert!(path.file_name().unwrap().to_string_lossy().starts_with("adb"));
	}

	#[test]
	fn missing_candidate_is_skipped() {
		let dir = TempDir::new().unwrap();
		assert!(usable_candidate("test", dir.path().join("nope")).is_none());
		// A directory is not an executable candidate either.
		assert!(usable_candidate("test", dir.path().to_path_buf()).is_none());
	}
}
