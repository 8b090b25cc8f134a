//! Response envelopes and shared values.

use serde::{Deserialize, Serialize};

/// Key under which W3C drivers serialize element references.
pub const ELEMENT_KEY: &str = "element-6066-11e4-a52e-4f735466cecf";

/// Error code returned when a locator matches nothing.
pub const NO_SUCH_ELEMENT: &str = "no such element";

/// Every WebDriver response wraps its payload in `{"value": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub value: T,
}

impl<T> Envelope<T> {
    pub fn new(value: T) -> Self {
        Self { value }
    }
}

/// Error payload carried in the `value` field of a failed response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorValue {
    /// Error code such as `no such element` or `timeout`.
    pub error: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stacktrace: Option<String>,
}

impl ErrorValue {
    pub fn is_no_such_element(&self) -> bool {
        self.error == NO_SUCH_ELEMENT
    }
}

/// Opaque element handle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementRef {
    #[serde(rename = "element-6066-11e4-a52e-4f735466cecf")]
    pub id: String,
}

/// Body of a successful `POST /session` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSessionValue {
    pub session_id: String,
    #[serde(default)]
    pub capabilities: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_ref_uses_w3c_key() {
        let json = format!(r#"{{"value":{{"{ELEMENT_KEY}":"abc-1"}}}}"#);
        let parsed: Envelope<ElementRef> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.value.id, "abc-1");
    }

    #[test]
    fn error_value_detects_missing_element() {
        let json = r#"{"value":{"error":"no such element","message":"Unable to locate element"}}"#;
        let parsed: Envelope<ErrorValue> = serde_json::from_str(json).unwrap();
        assert!(parsed.value.is_no_such_element());
        assert!(parsed.value.stacktrace.is_none());
    }

    #[test]
    fn new_session_value_reads_camel_case() {
        let json = r#"{"value":{"sessionId":"s1","capabilities":{"browserName":"chrome"}}}"#;
        let parsed: Envelope<NewSessionValue> = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.value.session_id, "s1");
        assert_eq!(parsed.value.capabilities["browserName"], "chrome");
    }
}
