//! Scenarios as ordered step lists.

use serde::{Deserialize, Serialize};

use crate::registry::Phase;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioStep {
	/// Keyword as written (`Given`, `And`, `But`, ...).
	pub keyword: String,
	pub phase: Phase,
	pub text: String,
}

impl ScenarioStep {
	pub fn new(phase: Phase, text: impl Into<String>) -> Self {
		Self {
			keyword: phase.keyword().to_string(),
			phase,
			text: text.into(),
		}
	}
}

impl std::fmt::Display for ScenarioStep {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{} {}", self.keyword, self.text)
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
	pub name: String,
	pub steps: Vec<ScenarioStep>,
}

impl Scenario {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			steps: Vec::new(),
		}
	}

	pub fn step(mut self, step: ScenarioStep) -> Self {
		self.steps.push(step);
		self
	}

	pub fn given(self, text: impl Into<String>) -> Self {
		self.step(ScenarioStep::new(Phase::Given, text))
	}

	pub fn when(self, text: impl Into<String>) -> Self {
		self.step(ScenarioStep::new(Phase::When, text))
	}

	pub fn then(self, text: impl Into<String>) -> Self {
		self.step(ScenarioStep::new(Phase::Then, text))
	}

	/// Appends a continuation step that inherits the previous step's phase.
	pub fn and(self, text: impl Into<String>) -> Self {
		let phase = self.steps.last().map_or(Phase::Given, |step| step.phase);
		self.step(ScenarioStep {
			keyword: "And".to_string(),
			phase,
			text: text.into(),
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn and_inherits_previous_phase() {
		let scenario = Scenario::new("login")
			.given("I am on the SauceDemo login page")
			.when(r#"I enter username "standard_user""#)
			.and(r#"I enter password "secret_sauce""#);

		let last = scenario.steps.last().unwrap();
		assert_eq!(last.phase, Phase::When);
		assert_eq!(last.to_string(), r#"And I enter password "secret_sauce""#);
	}
}
