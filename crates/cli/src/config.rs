//! Configuration file handling.
//!
//! Configuration is a single JSON document. Every section and field is
//! optional; missing values fall back to the defaults below. Lookup order:
//! `--config FILE`, then `$XDG_CONFIG_HOME/adbflow/config.json`, then built-in
//! defaults. `GEMINI_API_KEY` overrides `generator.apiKey`.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use adbflow::{SessionTiming, TypingProfile};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CliError, Result};

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
	pub server: ServerConfig,
	pub adb: AdbConfig,
	pub content: ContentConfig,
	pub audit: AuditConfig,
	pub generator: GeneratorConfig,
	pub typing: TypingProfile,
	pub session: SessionTiming,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServerConfig {
	pub host: String,
	pub port: u16,
}

impl Default for ServerConfig {
	fn default() -> Self {
		Self {
			host: "127.0.0.1".to_string(),
			port: 3001,
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AdbConfig {
	/// Explicit adb executable; otherwise discovered.
	pub path: Option<PathBuf>,
	/// Per-command timeout.
	pub timeout_secs: u64,
	/// Extra arguments before every command, e.g. `["-H", "10.0.0.2"]`.
	pub server_args: Vec<String>,
}

impl Default for AdbConfig {
	fn default() -> Self {
		Self {
			path: None,
			timeout_secs: 30,
			server_args: Vec::new(),
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContentConfig {
	pub links_file: PathBuf,
	pub commands_dir: PathBuf,
	pub reply_script: String,
	pub image_script: String,
}

impl Default for ContentConfig {
	fn default() -> Self {
		Self {
			links_file: PathBuf::from("wa-links.txt"),
			commands_dir: PathBuf::from("commands"),
			reply_script: adbflow::DEFAULT_REPLY_SCRIPT.to_string(),
			image_script: adbflow::DEFAULT_IMAGE_SCRIPT.to_string(),
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AuditConfig {
	pub enabled: bool,
	pub file: PathBuf,
}

impl Default for AuditConfig {
	fn default() -> Self {
		Self {
			enabled: true,
			file: PathBuf::from("adb-wa-link-log.txt"),
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GeneratorConfig {
	pub endpoint: String,
	pub model: String,
	#[serde(skip_serializing)]
	pub api_key: Option<String>,
	/// Prompt with `{language}` and `{topic}` placeholders.
	pub prompt_template: String,
	pub max_chars: usize,
	pub timeout_secs: u64,
}

impl Default for GeneratorConfig {
	fn default() -> Self {
		Self {
			endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
			model: "gemini-1.5-flash".to_string(),
			api_key: None,
			prompt_template: "Buat pembukaan percakapan dalam bahasa {language} tentang topik: {topic}. \
				langsung mulai percakapan dengan pesan yang relevan. \
				berikan pesan yang singkat seperti chat dengan teman sendiri."
				.to_string(),
			max_chars: 200,
			timeout_secs: 30,
		}
	}
}

impl AppConfig {
	pub fn default_path() -> Option<PathBuf> {
		dirs::config_dir().map(|dir| dir.join("adbflow").join("config.json"))
	}

	/// Loads `explicit`, else the default path if it exists, else defaults;
	/// then applies environment overrides.
	pub fn load(explicit: Option<&Path>) -> Result<Self> {
		let mut config = match explicit {
			Some(path) => Self::from_file(path)?,
			None => match Self::default_path() {
				Some(path) if path.is_file() => Self::from_file(&path)?,
				_ => {
					debug!(target = "adbflow.config", "no config file, using defaults");
					Self::default()
				}
			},
		};
		config.apply_env(|key| std::env::var(key).ok());
		Ok(config)
	}

	pub fn from_file(path: &Path) -> Result<Self> {
		let contents = std::fs::read_to_string(path).map_err(|source| CliError::ConfigRead {
			path: path.to_path_buf(),
			source,
		})?;
		let config = serde_json::from_str(&contents).map_err(|source| CliError::ConfigParse {
			path: path.to_path_buf(),
			source,
		})?;
		debug!(target = "adbflow.config", path = %path.display(), "loaded config");
		Ok(config)
	}

	pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
		if let Some(key) = lookup(API_KEY_ENV).filter(|k| !k.trim().is_empty()) {
			self.generator.api_key = Some(key);
		}
	}

	pub fn bind_addr(&self) -> Result<SocketAddr> {
		let addr = format!("{}:{}", self.server.host, self.server.port);
		addr.parse().map_err(|_| CliError::Address(addr))
	}
}

#[cfg(test)]
mod tests {
	use adbflow::DelayRange;
	use tempfile::TempDir;

	use super::*;

	#[test]
	fn defaults_match_the_dashboard_contract() {
		let config = AppConfig::default();
		assert_eq!(config.bind_addr().unwrap(), "127.0.0.1:3001".parse().unwrap());
		assert_eq!(config.content.reply_script, "example1.txt");
		assert_eq!(config.audit.file, PathBuf::from("adb-wa-link-log.txt"));
		assert_eq!(config.generator.model, "gemini-1.5-flash");
		assert!(config.generator.prompt_template.contains("{language}"));
		assert!(config.generator.prompt_template.contains("{topic}"));
	}

	#[test]
	fn partial_file_keeps_other_defaults() {
		let dir = TempDir::new().unwrap();
		let path = dir.path().join("config.json");
		std::fs::write(
			&path,
			r#"{
				"server": { "port": 8080 },
				"typing": { "keyDelay": { "minMs": 5, "maxMs": 10 } },
				"session": { "chunkSize": 50 }
			}"#,
		)
		.unwrap();

		let config = AppConfig::from_file(&path).unwrap();
		assert_eq!(config.server.port, 8080);
		assert_eq!(config.server.host, "127.0.0.1");
		assert_eq!(config.typing.key_delay, DelayRange::new(5, 10));
		assert_eq!(config.typing.correction_probability, 0.5);
		assert_eq!(config.session.chunk_size, 50);
		assert_eq!(config.session.settle, DelayRange::new(1500, 4000));
	}

	#[test]
	fn malformed_file_names_the_path() {
		let dir = TempDir::new().unwrap();
		let path = dir.path().join("config.json");
		std::fs::write(&path, "{ not json").unwrap();

		let err = AppConfig::from_file(&path).unwrap_err();
		assert!(matches!(err, CliError::ConfigParse { .. }));
		assert!(err.to_string().contains("config.json"));
	}

	#[test]
	fn env_key_overrides_file_key() {
		let mut config = AppConfig::default();
		config.generator.api_key = Some("from-file".into());

		config.apply_env(|_| Some("  ".into()));
		assert_eq!(config.generator.api_key.as_deref(), Some("from-file"));

		config.apply_env(|key| (key == API_KEY_ENV).then(|| "from-env".to_string()));
		assert_eq!(config.generator.api_key.as_deref(), Some("from-env"));
	}

	#[test]
	fn api_key_is_never_serialized() {
		let mut config = AppConfig::default();
		config.generator.api_key = Some("secret".into());
		let json = serde_json::to_string(&config).unwrap();
		assert!(!json.contains("secret"));
	}

	#[test]
	fn bad_host_is_a_config_error() {
		let mut config = AppConfig::default();
		config.server.host = "not a host".into();
		assert!(matches!(config.bind_addr(), Err(CliError::Address(_))));
	}
}
