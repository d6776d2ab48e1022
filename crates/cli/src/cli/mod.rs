#[cfg(test)]
mod tests;

use std::path::PathBuf;

use adbflow_protocol::PostSendMode;
use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::output::OutputFormat;
use crate::runtime::RuntimeOverrides;
use crate::styles::cli_styles;

#[derive(Parser, Debug)]
#[command(name = "adbflow")]
#[command(about = "Autonomous chat sessions on Android devices over ADB")]
#[command(version)]
#[command(styles = cli_styles())]
pub struct Cli {
	/// Increase verbosity (-v info, -vv debug)
	#[arg(short, long, global = true, action = clap::ArgAction::Count)]
	pub verbose: u8,

	/// Output format for one-shot commands
	#[arg(short = 'f', long, global = true, value_enum, default_value = "json")]
	pub format: OutputFormat,

	/// Config file (default: $XDG_CONFIG_HOME/adbflow/config.json)
	#[arg(long, global = true, value_name = "FILE")]
	pub config: Option<PathBuf>,

	#[command(subcommand)]
	pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
	/// Run the HTTP control server
	Serve(ServeArgs),

	/// List devices known to adb
	Devices,

	/// Open links on devices once, pairing devices and links in order
	OpenLink(OpenLinkArgs),

	/// Run the session loop in the foreground until Ctrl-C
	Run(RunArgs),
}

/// File locations shared by commands that build a full engine.
#[derive(Args, Debug, Clone, Default)]
pub struct ContentArgs {
	/// Links file, one link per line
	#[arg(long = "links", value_name = "FILE")]
	pub links_file: Option<PathBuf>,

	/// Directory holding the reply and image scripts
	#[arg(long = "commands", value_name = "DIR")]
	pub commands_dir: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
	/// Address to bind
	#[arg(long)]
	pub host: Option<String>,

	/// Port to bind
	#[arg(short, long)]
	pub port: Option<u16>,

	#[command(flatten)]
	pub content: ContentArgs,
}

#[derive(Args, Debug, Clone)]
pub struct OpenLinkArgs {
	/// Device address (repeatable)
	#[arg(short, long = "device", value_name = "HOST:PORT", required = true)]
	pub devices: Vec<String>,

	/// Link to open (repeatable)
	#[arg(short, long = "link", value_name = "URL", required = true)]
	pub links: Vec<String>,
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
	/// Device address (repeatable)
	#[arg(short, long = "device", value_name = "HOST:PORT", required = true)]
	pub devices: Vec<String>,

	/// Conversation topic passed to the generator
	#[arg(short, long)]
	pub topic: String,

	/// Language of the generated text
	#[arg(short, long)]
	pub language: String,

	/// What to do after sending the message
	#[arg(short, long, value_enum, default_value = "none")]
	pub mode: ModeArg,

	/// Rest between passes, in minutes
	#[arg(short, long, default_value_t = 0.0)]
	pub rest_minutes: f64,

	#[command(flatten)]
	pub content: ContentArgs,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
	#[default]
	None,
	/// Run the reply script and send the message again
	Reply,
	/// Run the image script
	Image,
}

impl From<ModeArg> for PostSendMode {
	fn from(mode: ModeArg) -> Self {
		match mode {
			ModeArg::None => PostSendMode::None,
			ModeArg::Reply => PostSendMode::Reply,
			ModeArg::Image => PostSendMode::Image,
		}
	}
}

impl Cli {
	/// Overrides from flags of the chosen subcommand.
	pub fn overrides(&self) -> RuntimeOverrides {
		match &self.command {
			Commands::Serve(args) => RuntimeOverrides {
				host: args.host.clone(),
				port: args.port,
				links_file: args.content.links_file.clone(),
				commands_dir: args.content.commands_dir.clone(),
			},
			Commands::Run(args) => RuntimeOverrides {
				links_file: args.content.links_file.clone(),
				commands_dir: args.content.commands_dir.clone(),
				..RuntimeOverrides::default()
			},
			Commands::Devices | Commands::OpenLink(_) => RuntimeOverrides::default(),
		}
	}
}
