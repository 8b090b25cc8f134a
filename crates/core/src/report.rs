//! Serializable run reports.

use serde::{Deserialize, Serialize};

use crate::error::ErrorKind;
use crate::registry::Phase;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum StepStatus {
	Passed,
	Failed { kind: ErrorKind, message: String },
	/// Not run because an earlier step (or session setup) failed.
	Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepReport {
	pub keyword: String,
	pub phase: Phase,
	pub text: String,
	#[serde(flatten)]
	pub status: StepStatus,
	pub duration_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioReport {
	pub name: String,
	pub passed: bool,
	/// Session setup or teardown failure, when the steps themselves did not fail.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub error: Option<String>,
	pub steps: Vec<StepReport>,
	pub duration_ms: u64,
}

impl ScenarioReport {
	/// First failed step, if any.
	pub fn failure(&self) -> Option<&StepReport> {
		self.steps
			.iter()
			.find(|step| matches!(step.status, StepStatus::Failed { .. }))
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
	pub scenarios: Vec<ScenarioReport>,
	pub passed: usize,
	pub failed: usize,
}

impl RunReport {
	pub fn push(&mut self, scenario: ScenarioReport) {
		if scenario.passed {
			self.passed += 1;
		} else {
			self.failed += 1;
		}
		self.scenarios.push(scenario);
	}

	pub fn is_success(&self) -> bool {
		self.failed == 0
	}
}
