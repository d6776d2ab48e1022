use std::path::PathBuf;

use thiserror::Error;

use crate::output::{CommandError, ErrorCode};

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
	#[error("failed to read config {path}")]
	ConfigRead {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("invalid config {path}: {source}")]
	ConfigParse {
		path: PathBuf,
		#[source]
		source: serde_json::Error,
	},

	#[error("invalid address {0}")]
	Address(String),

	#[error(transparent)]
	Engine(#[from] adbflow::Error),

	#[error(transparent)]
	Device(#[from] adbflow_runtime::Error),

	#[error(transparent)]
	Io(#[from] std::io::Error),

	#[error(transparent)]
	Json(#[from] serde_json::Error),

	#[error(transparent)]
	Anyhow(#[from] anyhow::Error),
}

impl CliError {
	pub fn code(&self) -> ErrorCode {
		match self {
			CliError::ConfigRead { .. } | CliError::ConfigParse { .. } | CliError::Address(_) => ErrorCode::Config,
			CliError::Engine(err) => engine_code(err),
			CliError::Device(err) => device_code(err),
			CliError::Io(_) => ErrorCode::Io,
			CliError::Json(_) | CliError::Anyhow(_) => ErrorCode::Internal,
		}
	}

	pub fn to_command_error(&self) -> CommandError {
		CommandError {
			code: self.code(),
			message: self.to_string(),
		}
	}
}

pub(crate) fn engine_code(err: &adbflow::Error) -> ErrorCode {
	match err {
		adbflow::Error::InvalidInput(_) => ErrorCode::InvalidInput,
		adbflow::Error::AlreadyRunning => ErrorCode::AlreadyRunning,
		adbflow::Error::Device(err) => device_code(err),
		adbflow::Error::ScriptMissing { .. } => ErrorCode::ScriptMissing,
		adbflow::Error::Io(_) => ErrorCode::Io,
	}
}

pub(crate) fn device_code(err: &adbflow_runtime::Error) -> ErrorCode {
	match err {
		adbflow_runtime::Error::AdbNotFound => ErrorCode::AdbNotFound,
		adbflow_runtime::Error::Transport(_) => ErrorCode::Transport,
		adbflow_runtime::Error::DeviceUnreachable { .. } => ErrorCode::DeviceUnreachable,
		adbflow_runtime::Error::CommandFailed { .. } => ErrorCode::CommandFailed,
		adbflow_runtime::Error::Io(_) => ErrorCode::Io,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn codes_follow_the_underlying_error() {
		let err = CliError::from(adbflow::Error::invalid_input("No valid device IDs"));
		assert_eq!(err.code(), ErrorCode::InvalidInput);
		assert_eq!(err.to_command_error().message, "No valid device IDs");

		let err = CliError::from(adbflow::Error::Device(adbflow_runtime::Error::Transport("down".into())));
		assert_eq!(err.code(), ErrorCode::Transport);

		assert_eq!(CliError::from(adbflow_runtime::Error::AdbNotFound).code(), ErrorCode::AdbNotFound);
		assert_eq!(CliError::Address("x".into()).code(), ErrorCode::Config);
	}
}
