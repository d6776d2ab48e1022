//! Help output colors.

use clap::builder::Styles;
use clap::builder::styling::AnsiColor;

/// Yellow section headers and usage, cyan for flags and value names.
pub fn cli_styles() -> Styles {
	Styles::styled()
		.header(AnsiColor::Yellow.on_default().bold())
		.usage(AnsiColor::Yellow.on_default().bold())
		.literal(AnsiColor::Cyan.on_default().bold())
		.placeholder(AnsiColor::Cyan.on_default())
		.error(AnsiColor::Red.on_default().bold())
		.valid(AnsiColor::Green.on_default())
		.invalid(AnsiColor::Red.on_default())
}
