//! Per-scenario browser session.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::config::RunConfig;
use crate::driver::BrowserDriver;
use crate::error::Result;
use crate::sim::SauceDemoSim;
use crate::webdriver::WebDriverClient;

/// The browser state a scenario's steps act upon.
///
/// Handlers receive the session explicitly; there is no ambient browser.
pub struct Session {
	driver: Box<dyn BrowserDriver>,
	timeout: Duration,
	page_load_timeout: Duration,
}

impl Session {
	pub fn new(driver: Box<dyn BrowserDriver>, timeout: Duration) -> Self {
		Self {
			driver,
			timeout,
			page_load_timeout: Duration::from_millis(RunConfig::DEFAULT_PAGE_LOAD_TIMEOUT_MS),
		}
	}

	pub fn with_page_load_timeout(mut self, page_load_timeout: Duration) -> Self {
		self.page_load_timeout = page_load_timeout;
		self
	}

	/// Implicit wait applied to every element lookup.
	pub fn timeout(&self) -> Duration {
		self.timeout
	}

	pub fn page_load_timeout(&self) -> Duration {
		self.page_load_timeout
	}

	pub async fn navigate(&self, url: &str) -> Result<()> {
		debug!(target = "steps", %url, "navigate");
		self.driver.navigate(url, self.page_load_timeout).await
	}

	pub async fn set_field_value(&self, selector: &str, value: &str) -> Result<()> {
		debug!(target = "steps", %selector, "set field value");
		self.driver.set_field_value(selector, value, self.timeout).await
	}

	pub async fn click(&self, selector: &str) -> Result<()> {
		debug!(target = "steps", %selector, "click");
		self.driver.click(selector, self.timeout).await
	}

	pub async fn current_url(&self) -> Result<String> {
		self.driver.current_url().await
	}

	pub async fn element_text(&self, selector: &str) -> Result<String> {
		debug!(target = "steps", %selector, "read element text");
		self.driver.element_text(selector, self.timeout).await
	}

	pub async fn close(self) -> Result<()> {
		self.driver.close().await
	}
}

/// Opens a fresh [`Session`] for each scenario.
#[async_trait]
pub trait SessionFactory: Send + Sync {
	async fn open(&self) -> Result<Session>;
}

/// Starts a new WebDriver session per scenario.
pub struct WebDriverFactory {
	config: RunConfig,
}

impl WebDriverFactory {
	pub fn new(config: RunConfig) -> Self {
		Self { config }
	}
}

#[async_trait]
impl SessionFactory for WebDriverFactory {
	async fn open(&self) -> Result<Session> {
		let client = WebDriverClient::connect(&self.config).await?;
		let session = Session::new(Box::new(client), self.config.timeout())
			.with_page_load_timeout(self.config.page_load_timeout());
		Ok(session)
	}
}

/// Hands out a brand-new simulator per scenario.
pub struct SimFactory {
	timeout: Duration,
}

impl SimFactory {
	pub fn new(timeout: Duration) -> Self {
		Self { timeout }
	}
}

impl Default for SimFactory {
	fn default() -> Self {
		Self::new(Duration::from_millis(RunConfig::DEFAULT_TIMEOUT_MS))
	}
}

#[async_trait]
impl SessionFactory for SimFactory {
	async fn open(&self) -> Result<Session> {
		Ok(Session::new(Box::new(SauceDemoSim::new()), self.timeout))
	}
}
