//! Session capabilities negotiated by `POST /session`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// Browser requested from the WebDriver server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrowserName {
    #[default]
    Chrome,
    Firefox,
}

impl BrowserName {
    pub fn as_str(&self) -> &'static str {
        match self {
            BrowserName::Chrome => "chrome",
            BrowserName::Firefox => "firefox",
        }
    }
}

impl std::fmt::Display for BrowserName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `{"capabilities": {"alwaysMatch": {...}}}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSession {
    pub capabilities: Capabilities,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Capabilities {
    pub always_match: Map<String, Value>,
}

impl NewSession {
    /// Builds capabilities for `browser`, adding the vendor headless flag when asked.
    pub fn for_browser(browser: BrowserName, headless: bool) -> Self {
        let mut always_match = Map::new();
        always_match.insert("browserName".into(), Value::from(browser.as_str()));

        let (options_key, headless_flag) = match browser {
            BrowserName::Chrome => ("goog:chromeOptions", "--headless"),
            BrowserName::Firefox => ("moz:firefoxOptions", "-headless"),
        };
        let args: Vec<&str> = if headless { vec![headless_flag] } else { Vec::new() };
        always_match.insert(options_key.into(), json!({ "args": args }));

        Self {
            capabilities: Capabilities { always_match },
        }
    }
}
