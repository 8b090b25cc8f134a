//! W3C WebDriver client.
//!
//! Talks HTTP+JSON to chromedriver, geckodriver or a Selenium grid. One
//! client owns exactly one remote session; [`WebDriverClient::close`] ends it.
//!
//! Element lookups poll `POST /session/{id}/element` until the selector
//! appears or the caller's timeout is spent, so the implicit wait lives here
//! rather than in the remote end's `implicit` timeout.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method};
use sd_protocol::{
	ElementRef, Empty, Envelope, ErrorValue, FindElement, NavigateTo, NewSession, NewSessionValue,
	SendKeys,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::time::Instant;
use tracing::{debug, info};
use url::Url;

use crate::config::RunConfig;
use crate::driver::{BrowserDriver, millis};
use crate::error::{Error, Result};

/// URL prefixes browsers report when a page failed to load.
const ERROR_PAGE_PREFIXES: &[&str] = &["chrome-error://", "about:neterror", "about:certerror"];

pub struct WebDriverClient {
	http: Client,
	base: Url,
	session_id: String,
	poll_interval: Duration,
}

impl WebDriverClient {
	/// Opens a new remote session described by `config`.
	pub async fn connect(config: &RunConfig) -> Result<Self> {
		config.validate()?;
		let base = normalize_base(&config.webdriver_url)?;
		let http = Client::builder().build()?;

		let body = NewSession::for_browser(config.browser, config.headless);
		let created: NewSessionValue = send(&http, Method::POST, base.join("session")?, Some(&body)).await?;

		info!(
			target = "steps",
			session = %created.session_id,
			browser = %config.browser,
			webdriver = %base,
			"webdriver session started"
		);

		Ok(Self {
			http,
			base,
			session_id: created.session_id,
			poll_interval: config.poll_interval(),
		})
	}

	pub fn session_id(&self) -> &str {
		&self.session_id
	}

	fn endpoint(&self, path: &str) -> Result<Url> {
		let suffix = if path.is_empty() {
			format!("session/{}", self.session_id)
		} else {
			format!("session/{}/{}", self.session_id, path)
		};
		Ok(self.base.join(&suffix)?)
	}

	async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
		send(&self.http, Method::POST, self.endpoint(path)?, Some(body)).await
	}

	async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
		send::<Empty, T>(&self.http, Method::GET, self.endpoint(path)?, None).await
	}

	/// Polls for `selector` until it matches or `timeout` elapses.
	async fn find(&self, selector: &str, timeout: Duration) -> Result<ElementRef> {
		let deadline = Instant::now() + timeout;
		let request = FindElement::css(selector);

		loop {
			match self.post::<_, ElementRef>("element", &request).await {
				Ok(element) => return Ok(element),
				Err(Error::Protocol { error, .. }) if error == sd_protocol::NO_SUCH_ELEMENT => {}
				Err(err) => return Err(err),
			}

			let now = Instant::now();
			if now >= deadline {
				return Err(Error::ElementNotFound {
					selector: selector.to_string(),
					timeout_ms: millis(timeout),
				});
			}
			tokio::time::sleep(self.poll_interval.min(deadline - now)).await;
		}
	}

	async fn element_post<B: Serialize + ?Sized>(&self, element: &ElementRef, action: &str, body: &B) -> Result<()> {
		let path = format!("element/{}/{}", element.id, action);
		let _: serde_json::Value = self.post(&path, body).await?;
		Ok(())
	}
}

#[async_trait]
impl BrowserDriver for WebDriverClient {
	async fn navigate(&self, url: &str, timeout: Duration) -> Result<()> {
		let request = NavigateTo { url: url.to_string() };
		let navigation = self.post::<_, serde_json::Value>("url", &request);

		match tokio::time::timeout(timeout, navigation).await {
			Ok(Ok(_)) => {}
			Ok(Err(err)) => {
				return Err(Error::Navigation {
					url: url.to_string(),
					reason: err.to_string(),
				});
			}
			Err(_) => {
				return Err(Error::Navigation {
					url: url.to_string(),
					reason: format!("timed out after {}ms", millis(timeout)),
				});
			}
		}

		let landed = self.current_url().await?;
		let is_web_page = landed.starts_with("http://") || landed.starts_with("https://");
		if !is_web_page || ERROR_PAGE_PREFIXES.iter().any(|prefix| landed.starts_with(prefix)) {
			return Err(Error::Navigation {
				url: url.to_string(),
				reason: format!("browser shows error page {landed}"),
			});
		}

		debug!(target = "steps", requested = %url, %landed, "navigation settled");
		Ok(())
	}

	async fn set_field_value(&self, selector: &str, value: &str, timeout: Duration) -> Result<()> {
		let element = self.find(selector, timeout).await?;
		self.element_post(&element, "clear", &Empty {}).await?;
		self.element_post(
			&element,
			"value",
			&SendKeys {
				text: value.to_string(),
			},
		)
		.await
	}

	async fn click(&self, selector: &str, timeout: Duration) -> Result<()> {
		let element = self.find(selector, timeout).await?;
		self.element_post(&element, "click", &Empty {}).await
	}

	async fn current_url(&self) -> Result<String> {
		self.get("url").await
	}

	async fn element_text(&self, selector: &str, timeout: Duration) -> Result<String> {
		let element = self.find(selector, timeout).await?;
		self.get(&format!("element/{}/text", element.id)).await
	}

	async fn close(self: Box<Self>) -> Result<()> {
		let _: serde_json::Value = send::<Empty, _>(&self.http, Method::DELETE, self.endpoint("")?, None).await?;
		info!(target = "steps", session = %self.session_id, "webdriver session closed");
		Ok(())
	}
}

/// Ensures the base URL ends in `/` so relative joins append rather than replace.
fn normalize_base(raw: &str) -> Result<Url> {
	let mut base = Url::parse(raw)?;
	if !base.path().ends_with('/') {
		let path = format!("{}/", base.path());
		base.set_path(&path);
	}
	Ok(base)
}

async fn send<B: Serialize + ?Sized, T: DeserializeOwned>(
	http: &Client,
	method: Method,
	url: Url,
	body: Option<&B>,
) -> Result<T> {
	debug!(target = "steps", %method, %url, "webdriver request");

	let mut request = http.request(method, url);
	if let Some(body) = body {
		request = request.json(body);
	}

	let response = request.send().await?;
	let status = response.status();
	let bytes = response.bytes().await?;

	if status.is_success() {
		let envelope: Envelope<T> = serde_json::from_slice(&bytes)?;
		return Ok(envelope.value);
	}

	match serde_json::from_slice::<Envelope<ErrorValue>>(&bytes) {
		Ok(envelope) => Err(Error::Protocol {
			error: envelope.value.error,
			message: envelope.value.message,
		}),
		Err(_) => Err(Error::Protocol {
			error: "unknown error".into(),
			message: format!("HTTP {status}: {}", String::from_utf8_lossy(&bytes)),
		}),
	}
}
