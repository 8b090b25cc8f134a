//! Run configuration.
//!
//! Values come from an optional JSON file, then CLI flags and environment
//! variables override individual fields.

use std::path::Path;
use std::time::Duration;

use sd_protocol::BrowserName;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RunConfig {
	/// Base URL of the WebDriver server.
	pub webdriver_url: String,
	pub browser: BrowserName,
	pub headless: bool,
	/// Implicit wait for element lookups, in milliseconds.
	pub timeout_ms: u64,
	/// Budget for a navigation to settle, in milliseconds.
	pub page_load_timeout_ms: u64,
	/// Delay between element lookups while waiting, in milliseconds.
	pub poll_interval_ms: u64,
}

impl RunConfig {
	pub const DEFAULT_WEBDRIVER_URL: &'static str = "http://localhost:4444";
	pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;
	pub const DEFAULT_PAGE_LOAD_TIMEOUT_MS: u64 = 30_000;
	pub const DEFAULT_POLL_INTERVAL_MS: u64 = 100;

	pub fn from_file(path: &Path) -> Result<Self> {
		let raw = std::fs::read_to_string(path)?;
		let config: RunConfig = serde_json::from_str(&raw)?;
		config.validate()?;
		Ok(config)
	}

	pub fn validate(&self) -> Result<()> {
		if self.timeout_ms == 0 {
			return Err(Error::Config("timeoutMs must be greater than zero".into()));
		}
		if self.page_load_timeout_ms == 0 {
			return Err(Error::Config("pageLoadTimeoutMs must be greater than zero".into()));
		}
		if self.poll_interval_ms == 0 {
			return Err(Error::Config("pollIntervalMs must be greater than zero".into()));
		}
		url::Url::parse(&self.webdriver_url)?;
		Ok(())
	}

	pub fn timeout(&self) -> Duration {
		Duration::from_millis(self.timeout_ms)
	}

	pub fn page_load_timeout(&self) -> Duration {
		Duration::from_millis(self.page_load_timeout_ms)
	}

	pub fn poll_interval(&self) -> Duration {
		Duration::from_millis(self.poll_interval_ms)
	}
}

impl Default for RunConfig {
	fn default() -> Self {
		Self {
			webdriver_url: Self::DEFAULT_WEBDRIVER_URL.to_string(),
			browser: BrowserName::default(),
			headless: true,
			timeout_ms: Self::DEFAULT_TIMEOUT_MS,
			page_load_timeout_ms: Self::DEFAULT_PAGE_LOAD_TIMEOUT_MS,
			poll_interval_ms: Self::DEFAULT_POLL_INTERVAL_MS,
		}
	}
}
