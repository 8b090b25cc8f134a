//! Request bodies for the commands the step bindings issue.

use serde::{Deserialize, Serialize};

/// Locator strategy for CSS selectors.
pub const CSS_SELECTOR: &str = "css selector";

/// `POST /session/{id}/url`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigateTo {
    pub url: String,
}

/// `POST /session/{id}/element`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindElement {
    pub using: String,
    pub value: String,
}

impl FindElement {
    pub fn css(selector: impl Into<String>) -> Self {
        Self {
            using: CSS_SELECTOR.to_string(),
            value: selector.into(),
        }
    }
}

/// `POST /session/{id}/element/{element}/value`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendKeys {
    pub text: String,
}

/// Empty JSON object body required by `clear` and `click`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Empty {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_element_css_serializes_strategy() {
        let body = serde_json::to_value(FindElement::css("#user-name")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "using": "css selector", "value": "#user-name" })
        );
    }

    #[test]
    fn empty_serializes_as_object() {
        assert_eq!(serde_json::to_string(&Empty {}).unwrap(), "{}");
    }
}
