use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// Installs the stderr subscriber. `RUST_LOG` wins over `verbosity`.
pub fn init_logging(verbosity: u8) {
	// 0 = warnings from adbflow, errors from dependencies
	// 1 (-v) = info, including one line per HTTP request
	// 2+ (-vv) = debug for everything, incl. every device command
	let filter = match verbosity {
		0 => "error,adbflow=warn,adbflow_cli=warn,adbflow_runtime=warn",
		1 => "warn,adbflow=info,adbflow_cli=info,adbflow_runtime=info,tower_http=info",
		_ => "debug,hyper=info,reqwest=info",
	};

	let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

	let stderr = std::io::stderr.with_max_level(tracing::Level::TRACE);

	tracing_subscriber::fmt()
		.with_env_filter(env_filter)
		.with_writer(stderr)
		.with_target(true)
		.with_level(true)
		.compact()
		.init();
}
