//! Browser driver seam.
//!
//! Step handlers never talk to a browser directly; they go through
//! [`BrowserDriver`], which the WebDriver client and the in-process
//! simulator both implement. Every call that addresses an element takes the
//! implicit-wait budget explicitly and fails with
//! [`Error::ElementNotFound`](crate::Error::ElementNotFound) once it is spent.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;

#[async_trait]
pub trait BrowserDriver: Send + Sync {
	/// Loads `url` and waits for the navigation to settle.
	async fn navigate(&self, url: &str, timeout: Duration) -> Result<()>;

	/// Clears the input matching `selector`, then types `value` into it.
	async fn set_field_value(&self, selector: &str, value: &str, timeout: Duration) -> Result<()>;

	/// Clicks the first element matching `selector`.
	async fn click(&self, selector: &str, timeout: Duration) -> Result<()>;

	/// Returns the URL of the current top-level page.
	async fn current_url(&self) -> Result<String>;

	/// Returns the rendered text of the first element matching `selector`.
	async fn element_text(&self, selector: &str, timeout: Duration) -> Result<String>;

	/// Ends the browser session and releases its resources.
	async fn close(self: Box<Self>) -> Result<()>;
}

pub(crate) fn millis(timeout: Duration) -> u64 {
	u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX)
}
