//! Structured output envelope for CLI commands.
//!
//! Every command produces a result envelope on stdout:
//!
//! ```json
//! {
//!   "schemaVersion": 1,
//!   "ok": false,
//!   "command": "run",
//!   "data": { "scenarios": [...], "passed": 1, "failed": 1 },
//!   "timings": { "durationMs": 1234 }
//! }
//! ```
//!
//! `ok` is false when any scenario failed. Setup failures (unreadable
//! feature file, undefined step, bad config) carry an `error` instead of
//! `data`. Text format renders the same information for humans.

#[cfg(test)]
mod tests;

use std::io::{self, Write};
use std::time::Instant;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use steps::{Phase, RunReport, StepStatus};

use crate::styles::{scenario_marker, step_marker};

/// Current schema version for command output.
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
	/// Human-readable text
	#[default]
	Text,
	/// JSON output
	Json,
	/// Newline-delimited JSON (one envelope per line)
	Ndjson,
	/// TOON output (token-efficient for LLMs)
	Toon,
}

impl std::fmt::Display for OutputFormat {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			OutputFormat::Text => write!(f, "text"),
			OutputFormat::Json => write!(f, "json"),
			OutputFormat::Ndjson => write!(f, "ndjson"),
			OutputFormat::Toon => write!(f, "toon"),
		}
	}
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandResult<T> {
	pub schema_version: u32,
	pub ok: bool,
	pub command: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub data: Option<T>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub error: Option<CommandError>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub timings: Option<Timings>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandError {
	/// Error code (e.g., "UNDEFINED_STEP", "INVALID_INPUT")
	pub code: String,
	pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timings {
	pub duration_ms: u64,
}

/// One registered step pattern, for `saucedemo steps`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepInfo {
	pub phase: Phase,
	pub pattern: String,
}

pub struct ResultBuilder<T> {
	command: String,
	data: Option<T>,
	ok: Option<bool>,
	error: Option<CommandError>,
	start_time: Instant,
}

impl<T> ResultBuilder<T> {
	pub fn new(command: impl Into<String>) -> Self {
		Self {
			command: command.into(),
			data: None,
			ok: None,
			error: None,
			start_time: Instant::now(),
		}
	}

	pub fn data(mut self, data: T) -> Self {
		self.data = Some(data);
		self
	}

	/// Lowers `ok` when the data itself reports a failure (e.g. a failed scenario).
	pub fn ok(mut self, ok: bool) -> Self {
		self.ok = Some(ok);
		self
	}

	pub fn error(mut self, code: impl Into<String>, message: impl Into<String>) -> Self {
		self.error = Some(CommandError {
			code: code.into(),
			message: message.into(),
		});
		self
	}

	pub fn build(self) -> CommandResult<T> {
		let derived = self.error.is_none() && self.data.is_some();
		let duration_ms = u64::try_from(self.start_time.elapsed().as_millis()).unwrap_or(u64::MAX);

		CommandResult {
			schema_version: SCHEMA_VERSION,
			ok: self.ok.unwrap_or(derived) && derived,
			command: self.command,
			data: self.data,
			error: self.error,
			timings: Some(Timings { duration_ms }),
		}
	}
}

/// Human-readable rendering of command data.
pub trait TextRender {
	fn render(&self, out: &mut dyn Write) -> io::Result<()>;
}

impl TextRender for RunReport {
	fn render(&self, out: &mut dyn Write) -> io::Result<()> {
		for scenario in &self.scenarios {
			writeln!(out, "{} {}", scenario_marker(scenario.passed), scenario.name)?;
			for step in &scenario.steps {
				writeln!(out, "  {} {} {}", step_marker(&step.status), step.keyword, step.text)?;
				if let StepStatus::Failed { kind, message } = &step.status {
					writeln!(out, "      [{kind}] {message}")?;
				}
			}
			if let Some(error) = &scenario.error {
				writeln!(out, "  {error}")?;
			}
		}
		writeln!(
			out,
			"\n{} scenarios: {} passed, {} failed",
			self.scenarios.len(),
			self.passed,
			self.failed
		)
	}
}

impl TextRender for () {
	fn render(&self, _out: &mut dyn Write) -> io::Result<()> {
		Ok(())
	}
}

impl TextRender for Vec<StepInfo> {
	fn render(&self, out: &mut dyn Write) -> io::Result<()> {
		for phase in Phase::ALL {
			for step in self.iter().filter(|step| step.phase == phase) {
				writeln!(out, "{:<5} {}", phase.keyword(), step.pattern)?;
			}
		}
		Ok(())
	}
}

/// Writes `result` to `out` in `format`.
pub fn write_result<T: Serialize + TextRender>(
	out: &mut dyn Write,
	result: &CommandResult<T>,
	format: OutputFormat,
) -> io::Result<()> {
	match format {
		OutputFormat::Json => {
			let json = serde_json::to_string_pretty(result).map_err(io::Error::other)?;
			writeln!(out, "{json}")
		}
		OutputFormat::Ndjson => {
			let json = serde_json::to_string(result).map_err(io::Error::other)?;
			writeln!(out, "{json}")
		}
		OutputFormat::Toon => {
			let value = serde_json::to_value(result).map_err(io::Error::other)?;
			writeln!(out, "{}", toon::encode(&value, None))
		}
		OutputFormat::Text => {
			if let Some(data) = &result.data {
				data.render(out)?;
			}
			if let Some(error) = &result.error {
				writeln!(out, "Error [{}]: {}", error.code, error.message)?;
			}
			Ok(())
		}
	}
}

/// Print a command result to stdout in the specified format.
pub fn print_result<T: Serialize + TextRender>(result: &CommandResult<T>, format: OutputFormat) {
	let mut stdout = io::stdout().lock();
	let _ = write_result(&mut stdout, result, format);
}

/// Print an error to stderr in human-readable format.
pub fn print_error_stderr(error: &CommandError) {
	eprintln!("Error [{}]: {}", error.code, error.message);
}
