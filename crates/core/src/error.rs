//! Error taxonomy for step bindings and the drivers underneath them.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::registry::Phase;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
	/// Target page unreachable, or the browser landed on an error page.
	#[error("navigation to {url} failed: {reason}")]
	Navigation { url: String, reason: String },

	/// Selector did not appear within the implicit wait.
	#[error("element not found: {selector} (waited {timeout_ms}ms)")]
	ElementNotFound { selector: String, timeout_ms: u64 },

	/// Observed value differs from the expected one.
	#[error("assertion failed: {check}: expected {expected:?}, actual {actual:?}")]
	Assertion {
		check: &'static str,
		expected: String,
		actual: String,
	},

	#[error("timeout after {ms}ms waiting for: {condition}")]
	Timeout { ms: u64, condition: String },

	/// Error envelope returned by the WebDriver server.
	#[error("webdriver error [{error}]: {message}")]
	Protocol { error: String, message: String },

	#[error("no step definition matches {phase} \"{text}\"")]
	UndefinedStep { phase: Phase, text: String },

	#[error("{phase} \"{text}\" matches more than one step definition: {patterns:?}")]
	AmbiguousStep {
		phase: Phase,
		text: String,
		patterns: Vec<String>,
	},

	#[error("step pattern already registered for {phase}: \"{pattern}\"")]
	DuplicateStep { phase: Phase, pattern: String },

	#[error("invalid step pattern \"{pattern}\": {reason}")]
	InvalidPattern { pattern: String, reason: String },

	#[error("step handler expected an argument at position {index}")]
	MissingArgument { index: usize },

	#[error("failed to load feature {}: {reason}", path.display())]
	Feature { path: PathBuf, reason: String },

	#[error("invalid configuration: {0}")]
	Config(String),

	#[error(transparent)]
	Transport(#[from] reqwest::Error),

	#[error(transparent)]
	Url(#[from] url::ParseError),

	#[error(transparent)]
	Io(#[from] std::io::Error),

	#[error(transparent)]
	Json(#[from] serde_json::Error),
}

/// Standardized error codes for reports and programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
	NavigationFailed,
	ElementNotFound,
	AssertionFailed,
	Timeout,
	DriverError,
	UndefinedStep,
	AmbiguousStep,
	InvalidInput,
	IoError,
}

impl std::fmt::Display for ErrorKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			ErrorKind::NavigationFailed => write!(f, "NAVIGATION_FAILED"),
			ErrorKind::ElementNotFound => write!(f, "ELEMENT_NOT_FOUND"),
			ErrorKind::AssertionFailed => write!(f, "ASSERTION_FAILED"),
			ErrorKind::Timeout => write!(f, "TIMEOUT"),
			ErrorKind::DriverError => write!(f, "DRIVER_ERROR"),
			ErrorKind::UndefinedStep => write!(f, "UNDEFINED_STEP"),
			ErrorKind::AmbiguousStep => write!(f, "AMBIGUOUS_STEP"),
			ErrorKind::InvalidInput => write!(f, "INVALID_INPUT"),
			ErrorKind::IoError => write!(f, "IO_ERROR"),
		}
	}
}

impl Error {
	pub fn kind(&self) -> ErrorKind {
		match self {
			Error::Navigation { .. } => ErrorKind::NavigationFailed,
			Error::ElementNotFound { .. } => ErrorKind::ElementNotFound,
			Error::Assertion { .. } => ErrorKind::AssertionFailed,
			Error::Timeout { .. } => ErrorKind::Timeout,
			Error::Protocol { .. } | Error::Transport(_) | Error::Json(_) => ErrorKind::DriverError,
			Error::UndefinedStep { .. } => ErrorKind::UndefinedStep,
			Error::AmbiguousStep { .. } => ErrorKind::AmbiguousStep,
			Error::DuplicateStep { .. }
			| Error::InvalidPattern { .. }
			| Error::MissingArgument { .. }
			| Error::Feature { .. }
			| Error::Config(_)
			| Error::Url(_) => ErrorKind::InvalidInput,
			Error::Io(_) => ErrorKind::IoError,
		}
	}

	pub(crate) fn assertion(check: &'static str, expected: impl Into<String>, actual: impl Into<String>) -> Self {
		Error::Assertion {
			check,
			expected: expected.into(),
			actual: actual.into(),
		}
	}
}
