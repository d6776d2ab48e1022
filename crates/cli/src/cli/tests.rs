use std::path::PathBuf;

use clap::Parser;

use super::*;

#[test]
fn parse_serve_with_overrides() {
	let cli = Cli::try_parse_from(["adbflow", "-v", "serve", "--port", "4000", "--links", "links.txt"]).unwrap();

	assert_eq!(cli.verbose, 1);
	let overrides = cli.overrides();
	assert_eq!(overrides.port, Some(4000));
	assert_eq!(overrides.host, None);
	assert_eq!(overrides.links_file, Some(PathBuf::from("links.txt")));
	assert!(matches!(cli.command, Commands::Serve(_)));
}

#[test]
fn parse_devices_with_text_format() {
	let cli = Cli::try_parse_from(["adbflow", "devices", "-f", "text", "--config", "/etc/adbflow.json"]).unwrap();

	assert!(matches!(cli.command, Commands::Devices));
	assert_eq!(cli.format, OutputFormat::Text);
	assert_eq!(cli.config, Some(PathBuf::from("/etc/adbflow.json")));
}

#[test]
fn parse_open_link_repeated_flags() {
	let cli = Cli::try_parse_from([
		"adbflow",
		"open-link",
		"-d",
		"10.0.0.1:5555",
		"-d",
		"10.0.0.2:5555",
		"--link",
		"https://chat.whatsapp.com/a",
	])
	.unwrap();

	match cli.command {
		Commands::OpenLink(args) => {
			assert_eq!(args.devices, vec!["10.0.0.1:5555", "10.0.0.2:5555"]);
			assert_eq!(args.links, vec!["https://chat.whatsapp.com/a"]);
		}
		_ => panic!("Expected OpenLink command"),
	}
}

#[test]
fn open_link_requires_a_link() {
	assert!(Cli::try_parse_from(["adbflow", "open-link", "-d", "10.0.0.1:5555"]).is_err());
}

#[test]
fn parse_run_defaults() {
	let cli = Cli::try_parse_from([
		"adbflow",
		"run",
		"-d",
		"10.0.0.1:5555",
		"--topic",
		"coffee",
		"--language",
		"english",
	])
	.unwrap();

	match cli.command {
		Commands::Run(args) => {
			assert_eq!(args.mode, ModeArg::None);
			assert_eq!(args.rest_minutes, 0.0);
			assert_eq!(PostSendMode::from(ModeArg::Reply), PostSendMode::Reply);
		}
		_ => panic!("Expected Run command"),
	}
}
