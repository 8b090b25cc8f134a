//! In-process SauceDemo simulator.
//!
//! [`SauceDemoSim`] implements [`BrowserDriver`] against a model of the
//! SauceDemo login and inventory pages, so step bindings can be exercised
//! without a browser. It records every driver call for later assertion.
//!
//! The simulated DOM only changes in response to driver calls, so a selector
//! that is missing when looked up stays missing and fails immediately.
//!
//! # Example
//!
//! ```ignore
//! let sim = SauceDemoSim::new();
//! let session = Session::new(Box::new(sim.clone()), Duration::from_secs(1));
//! // ... run steps with session
//! assert_eq!(sim.url(), "https://www.saucedemo.com/inventory.html");
//! ```

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::driver::{BrowserDriver, millis};
use crate::error::{Error, Result};
use crate::saucedemo::{ERROR_MESSAGE, INVENTORY_PATH, LOGIN_BUTTON, LOGIN_URL, PASSWORD_INPUT, USERNAME_INPUT};

pub const VALID_PASSWORD: &str = "secret_sauce";
pub const LOCKED_OUT_USER: &str = "locked_out_user";
pub const ACCEPTED_USERS: &[&str] = &[
	"standard_user",
	"problem_user",
	"performance_glitch_user",
	"error_user",
	"visual_user",
];

pub const USERNAME_REQUIRED: &str = "Epic sadface: Username is required";
pub const PASSWORD_REQUIRED: &str = "Epic sadface: Password is required";
pub const LOCKED_OUT: &str = "Epic sadface: Sorry, this user has been locked out.";
pub const CREDENTIALS_MISMATCH: &str = "Epic sadface: Username and password do not match any user in this service";
pub const INVENTORY_REQUIRES_LOGIN: &str = "Epic sadface: You can only access '/inventory.html' when you are logged in.";

/// Driver call recorded by [`SauceDemoSim`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimAction {
	Navigate { url: String },
	SetFieldValue { selector: String, value: String },
	Click { selector: String },
	ReadText { selector: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Page {
	Blank,
	Login,
	Inventory,
}

#[derive(Debug)]
struct SimState {
	page: Page,
	url: String,
	fields: HashMap<&'static str, String>,
	error: Option<&'static str>,
	logged_in: bool,
	closed: bool,
	actions: Vec<SimAction>,
}

impl Default for SimState {
	fn default() -> Self {
		Self {
			page: Page::Blank,
			url: "about:blank".to_string(),
			fields: HashMap::new(),
			error: None,
			logged_in: false,
			closed: false,
			actions: Vec::new(),
		}
	}
}

impl SimState {
	fn ensure_open(&self) -> Result<()> {
		if self.closed {
			return Err(Error::Protocol {
				error: "invalid session id".into(),
				message: "session was closed".into(),
			});
		}
		Ok(())
	}

	fn show_login(&mut self, error: Option<&'static str>) {
		self.page = Page::Login;
		self.url = LOGIN_URL.to_string();
		self.error = error;
	}

	fn show_inventory(&mut self) {
		self.page = Page::Inventory;
		self.url = format!("{}{}", LOGIN_URL.trim_end_matches('/'), INVENTORY_PATH);
		self.error = None;
	}

	fn has_element(&self, selector: &str) -> bool {
		match self.page {
			Page::Login => {
				matches!(selector, USERNAME_INPUT | PASSWORD_INPUT | LOGIN_BUTTON)
					|| (selector == ERROR_MESSAGE && self.error.is_some())
			}
			Page::Blank | Page::Inventory => false,
		}
	}

	fn field_key(selector: &str) -> Option<&'static str> {
		match selector {
			USERNAME_INPUT => Some(USERNAME_INPUT),
			PASSWORD_INPUT => Some(PASSWORD_INPUT),
			_ => None,
		}
	}

	fn field(&self, key: &'static str) -> &str {
		self.fields.get(key).map(String::as_str).unwrap_or_default()
	}

	fn submit_login(&mut self) {
		let username = self.field(USERNAME_INPUT).to_string();
		let password = self.field(PASSWORD_INPUT).to_string();

		let outcome = if username.is_empty() {
			Err(USERNAME_REQUIRED)
		} else if password.is_empty() {
			Err(PASSWORD_REQUIRED)
		} else if password != VALID_PASSWORD {
			Err(CREDENTIALS_MISMATCH)
		} else if username == LOCKED_OUT_USER {
			Err(LOCKED_OUT)
		} else if ACCEPTED_USERS.contains(&username.as_str()) {
			Ok(())
		} else {
			Err(CREDENTIALS_MISMATCH)
		};

		match outcome {
			Ok(()) => {
				self.logged_in = true;
				self.show_inventory();
			}
			Err(message) => self.error = Some(message),
		}
	}
}

/// Simulated SauceDemo browser. Clones share the same page state.
#[derive(Debug, Clone, Default)]
pub struct SauceDemoSim {
	state: Arc<Mutex<SimState>>,
}

impl SauceDemoSim {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn url(&self) -> String {
		self.state.lock().url.clone()
	}

	/// Current value of the input matching `selector`, if it is a known field.
	pub fn field_value(&self, selector: &str) -> Option<String> {
		let state = self.state.lock();
		SimState::field_key(selector).map(|key| state.field(key).to_string())
	}

	/// Pre-fills an input, as if the user had typed into it earlier.
	pub fn set_field(&self, selector: &str, value: &str) {
		if let Some(key) = SimState::field_key(selector) {
			self.state.lock().fields.insert(key, value.to_string());
		}
	}

	pub fn actions(&self) -> Vec<SimAction> {
		self.state.lock().actions.clone()
	}

	pub fn is_closed(&self) -> bool {
		self.state.lock().closed
	}
}

fn not_found(selector: &str, timeout: Duration) -> Error {
	Error::ElementNotFound {
		selector: selector.to_string(),
		timeout_ms: millis(timeout),
	}
}

#[async_trait]
impl BrowserDriver for SauceDemoSim {
	async fn navigate(&self, url: &str, _timeout: Duration) -> Result<()> {
		let mut state = self.state.lock();
		state.ensure_open()?;
		state.actions.push(SimAction::Navigate { url: url.to_string() });

		let Some(path) = url.strip_prefix(LOGIN_URL.trim_end_matches('/')) else {
			return Err(Error::Navigation {
				url: url.to_string(),
				reason: "host unreachable".into(),
			});
		};

		match path {
			"" | "/" => state.show_login(None),
			INVENTORY_PATH if state.logged_in => state.show_inventory(),
			INVENTORY_PATH => state.show_login(Some(INVENTORY_REQUIRES_LOGIN)),
			_ => {
				return Err(Error::Navigation {
					url: url.to_string(),
					reason: "404 Not Found".into(),
				});
			}
		}
		Ok(())
	}

	async fn set_field_value(&self, selector: &str, value: &str, timeout: Duration) -> Result<()> {
		let mut state = self.state.lock();
		state.ensure_open()?;
		state.actions.push(SimAction::SetFieldValue {
			selector: selector.to_string(),
			value: value.to_string(),
		});

		if !state.has_element(selector) {
			return Err(not_found(selector, timeout));
		}
		let Some(key) = SimState::field_key(selector) else {
			return Err(Error::Protocol {
				error: "invalid element state".into(),
				message: format!("{selector} is not editable"),
			});
		};
		state.fields.insert(key, value.to_string());
		Ok(())
	}

	async fn click(&self, selector: &str, timeout: Duration) -> Result<()> {
		let mut state = self.state.lock();
		state.ensure_open()?;
		state.actions.push(SimAction::Click {
			selector: selector.to_string(),
		});

		if !state.has_element(selector) {
			return Err(not_found(selector, timeout));
		}
		if selector == LOGIN_BUTTON {
			state.submit_login();
		}
		Ok(())
	}

	async fn current_url(&self) -> Result<String> {
		let state = self.state.lock();
		state.ensure_open()?;
		Ok(state.url.clone())
	}

	async fn element_text(&self, selector: &str, timeout: Duration) -> Result<String> {
		let mut state = self.state.lock();
		state.ensure_open()?;
		state.actions.push(SimAction::ReadText {
			selector: selector.to_string(),
		});

		if !state.has_element(selector) {
			return Err(not_found(selector, timeout));
		}
		Ok(match selector {
			ERROR_MESSAGE => state.error.unwrap_or_default().to_string(),
			_ => String::new(),
		})
	}

	async fn close(self: Box<Self>) -> Result<()> {
		self.state.lock().closed = true;
		Ok(())
	}
}
