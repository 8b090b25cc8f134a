//! Terminal styling: clap help colors and the report palette.

use clap::builder::Styles;
use clap::builder::styling::AnsiColor;
use colored::{ColoredString, Colorize};
use steps::StepStatus;

/// Returns clap Styles matching cargo's help output colors.
pub fn cli_styles() -> Styles {
	Styles::styled()
		.header(AnsiColor::Green.on_default().bold())
		.usage(AnsiColor::Green.on_default().bold())
		.literal(AnsiColor::Cyan.on_default())
		.placeholder(AnsiColor::Cyan.on_default())
		.valid(AnsiColor::Cyan.on_default())
		.error(AnsiColor::Red.on_default().bold())
}

/// Short status marker for a step line.
pub fn step_marker(status: &StepStatus) -> ColoredString {
	match status {
		StepStatus::Passed => "✔".green(),
		StepStatus::Failed { .. } => "✘".red().bold(),
		StepStatus::Skipped => "-".dimmed(),
	}
}

pub fn scenario_marker(passed: bool) -> ColoredString {
	if passed { "PASS".green().bold() } else { "FAIL".red().bold() }
}
