use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use steps::BrowserName;

use crate::output::OutputFormat;
use crate::styles::cli_styles;


#[derive(Parser, Debug)]
#[command(name = "saucedemo")]
#[command(about = "Run SauceDemo login scenarios against a real or simulated browser")]
#[command(version)]
#[command(styles = cli_styles())]
pub struct Cli {
	/// Increase verbosity (-v info, -vv debug)
	#[arg(short, long, global = true, action = clap::ArgAction::Count)]
	pub verbose: u8,

	/// Output format: text (default), json, ndjson, or toon
	#[arg(short = 'f', long, global = true, value_enum, default_value = "text")]
	pub format: OutputFormat,

	/// JSON configuration file (webdriverUrl, browser, headless, timeoutMs, pollIntervalMs)
	#[arg(long, global = true, value_name = "FILE")]
	pub config: Option<PathBuf>,

	#[command(subcommand)]
	pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
	/// Run scenarios from one or more .feature files
	Run(RunArgs),

	/// List registered step patterns
	Steps,
}

impl Commands {
	/// Subcommand name as reported in the output envelope.
	pub fn name(&self) -> &'static str {
		match self {
			Commands::Run(_) => "run",
			Commands::Steps => "steps",
		}
	}
}

/// Where scenario steps are executed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum DriverKind {
	/// Remote browser through a W3C WebDriver server
	#[default]
	Webdriver,
	/// In-process SauceDemo simulator (no browser needed)
	Sim,
}

/// Browser requested from the WebDriver server.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum CliBrowser {
	Chrome,
	Firefox,
}

impl From<CliBrowser> for BrowserName {
	fn from(browser: CliBrowser) -> Self {
		match browser {
			CliBrowser::Chrome => BrowserName::Chrome,
			CliBrowser::Firefox => BrowserName::Firefox,
		}
	}
}

#[derive(Args, Debug)]
pub struct RunArgs {
	/// Feature files to run, in order
	#[arg(required = true, value_name = "FEATURE")]
	pub features: Vec<PathBuf>,

	/// Step execution backend
	#[arg(long, value_enum, default_value = "webdriver")]
	pub driver: DriverKind,

	/// WebDriver server URL (chromedriver, geckodriver, Selenium)
	#[arg(long, env = "WEBDRIVER_URL", value_name = "URL")]
	pub webdriver_url: Option<String>,

	/// Browser to request from the WebDriver server
	#[arg(short, long, value_enum)]
	pub browser: Option<CliBrowser>,

	/// Show the browser window
	#[arg(long)]
	pub headed: bool,

	/// Implicit wait for element lookups (milliseconds)
	#[arg(long, env = "SAUCEDEMO_TIMEOUT_MS", value_name = "MS")]
	pub timeout_ms: Option<u64>,

	/// Time allowed for a page load to settle (milliseconds)
	#[arg(long, env = "SAUCEDEMO_PAGE_LOAD_TIMEOUT_MS", value_name = "MS")]
	pub page_load_timeout_ms: Option<u64>,

	/// Only run scenarios whose name contains this text
	#[arg(long, value_name = "TEXT")]
	pub name: Option<String>,
}
