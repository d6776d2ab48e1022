//! Wiring the engine from configuration.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use adbflow::{Engine, ScriptLibrary, SessionDeps, TokioPacer, load_links};
use adbflow_runtime::{AdbChannel, AuditLog, Error as DeviceError};
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::error::Result;
use crate::gemini::GeminiGenerator;

const FALLBACK_ADB: &str = "adb";

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct RuntimeOverrides {
	pub host: Option<String>,
	pub port: Option<u16>,
	pub links_file: Option<PathBuf>,
	pub commands_dir: Option<PathBuf>,
}

impl RuntimeOverrides {
	pub fn apply(&self, config: &mut AppConfig) {
		if let Some(host) = &self.host {
			config.server.host = host.clone();
		}
		if let Some(port) = self.port {
			config.server.port = port;
		}
		if let Some(links) = &self.links_file {
			config.content.links_file = links.clone();
		}
		if let Some(dir) = &self.commands_dir {
			config.content.commands_dir = dir.clone();
		}
	}
}

pub fn open_audit(config: &AppConfig) -> Result<AuditLog> {
	if config.audit.enabled {
		Ok(AuditLog::open(&config.audit.file)?)
	} else {
		Ok(AuditLog::disabled())
	}
}

/// Falls back to a bare `adb` when discovery fails, so the server still
/// starts and device calls report transport errors instead.
pub fn build_channel(config: &AppConfig, audit: AuditLog) -> Result<AdbChannel> {
	let channel = match AdbChannel::locate(config.adb.path.as_deref(), audit.clone()) {
		Ok(channel) => channel,
		Err(DeviceError::AdbNotFound) => {
			warn!(target = "adbflow.runtime", "adb executable not found, falling back to `adb`");
			AdbChannel::new(FALLBACK_ADB, audit)
		}
		Err(err) => return Err(err.into()),
	};
	let channel = channel
		.with_base_args(config.adb.server_args.iter().cloned())
		.with_timeout(Duration::from_secs(config.adb.timeout_secs.max(1)));
	info!(target = "adbflow.runtime", adb = %channel.program().display(), "using adb");
	Ok(channel)
}

/// Builds the engine with the real adb channel, Gemini and tokio timers.
pub fn build_engine(config: &AppConfig) -> Result<Engine> {
	let audit = open_audit(config)?;
	let channel = build_channel(config, audit.clone())?;
	let generator = GeminiGenerator::new(&config.generator, audit.clone())?;

	let links = load_links(&config.content.links_file)?;
	if links.is_empty() {
		audit.record(format!("{} not found or empty", config.content.links_file.display()));
	} else {
		audit.record(format!("Loaded {} links", links.len()));
	}

	let scripts = ScriptLibrary::from_dir(&config.content.commands_dir)
		.with_names(&config.content.reply_script, &config.content.image_script);

	let deps = SessionDeps {
		channel: Arc::new(channel),
		generator: Arc::new(generator),
		pacer: Arc::new(TokioPacer),
		scripts: Arc::new(scripts),
		audit,
		typing: config.typing.clone(),
		timing: config.session.clone(),
	};
	Ok(Engine::new(deps, links))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn overrides_replace_only_given_values() {
		let mut config = AppConfig::default();
		RuntimeOverrides {
			port: Some(4000),
			commands_dir: Some(PathBuf::from("/srv/commands")),
			..RuntimeOverrides::default()
		}
		.apply(&mut config);

		assert_eq!(config.server.port, 4000);
		assert_eq!(config.server.host, "127.0.0.1");
		assert_eq!(config.content.commands_dir, PathBuf::from("/srv/commands"));
		assert_eq!(config.content.links_file, PathBuf::from("wa-links.txt"));
	}

	#[test]
	fn disabled_audit_has_no_file() {
		let mut config = AppConfig::default();
		config.audit.enabled = false;
		assert!(open_audit(&config).unwrap().path().is_none());
	}
}
