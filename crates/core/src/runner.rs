//! Sequential scenario runner.
//!
//! Each scenario gets a fresh session from the [`SessionFactory`]. Steps run
//! strictly in order; the first failure marks the scenario failed and every
//! later step is reported as skipped. The session is closed whether the
//! scenario passed or not.

use std::sync::Arc;
use std::time::Instant;

use tracing::{info, warn};

use crate::error::Result;
use crate::registry::StepRegistry;
use crate::report::{RunReport, ScenarioReport, StepReport, StepStatus};
use crate::scenario::{Scenario, ScenarioStep};
use crate::session::{Session, SessionFactory};

pub struct Runner {
	registry: Arc<StepRegistry>,
	factory: Arc<dyn SessionFactory>,
}

impl Runner {
	pub fn new(registry: Arc<StepRegistry>, factory: Arc<dyn SessionFactory>) -> Self {
		Self { registry, factory }
	}

	pub async fn run(&self, scenarios: &[Scenario]) -> RunReport {
		let mut report = RunReport::default();
		for scenario in scenarios {
			report.push(self.run_scenario(scenario).await);
		}
		info!(target = "steps", passed = report.passed, failed = report.failed, "run finished");
		report
	}

	pub async fn run_scenario(&self, scenario: &Scenario) -> ScenarioReport {
		let started = Instant::now();
		info!(target = "steps", scenario = %scenario.name, "scenario started");

		let session = match self.factory.open().await {
			Ok(session) => session,
			Err(err) => {
				warn!(target = "steps", scenario = %scenario.name, error = %err, "session setup failed");
				return ScenarioReport {
					name: scenario.name.clone(),
					passed: false,
					error: Some(format!("session setup failed: {err}")),
					steps: scenario.steps.iter().map(skipped).collect(),
					duration_ms: elapsed_ms(started),
				};
			}
		};

		let mut steps = Vec::with_capacity(scenario.steps.len());
		let mut failed = false;

		for step in &scenario.steps {
			if failed {
				steps.push(skipped(step));
				continue;
			}

			let step_started = Instant::now();
			let status = match self.run_step(&session, step).await {
				Ok(()) => StepStatus::Passed,
				Err(err) => {
					failed = true;
					let message = format!("step \"{step}\" failed: {err}");
					warn!(target = "steps", scenario = %scenario.name, "{message}");
					StepStatus::Failed {
						kind: err.kind(),
						message,
					}
				}
			};

			steps.push(StepReport {
				keyword: step.keyword.clone(),
				phase: step.phase,
				text: step.text.clone(),
				status,
				duration_ms: elapsed_ms(step_started),
			});
		}

		let mut error = None;
		if let Err(err) = session.close().await {
			warn!(target = "steps", scenario = %scenario.name, error = %err, "session close failed");
			if !failed {
				error = Some(format!("session close failed: {err}"));
			}
		}

		let passed = !failed && error.is_none();
		info!(target = "steps", scenario = %scenario.name, passed, "scenario finished");

		ScenarioReport {
			name: scenario.name.clone(),
			passed,
			error,
			steps,
			duration_ms: elapsed_ms(started),
		}
	}

	async fn run_step(&self, session: &Session, step: &ScenarioStep) -> Result<()> {
		info!(target = "steps", "{step}");
		let found = self.registry.find(step.phase, &step.text)?;
		found.run(session).await
	}
}

/// Resolves every step of `scenarios` without running anything.
///
/// Returns the first undefined or ambiguous step, so a run can flag it
/// before any browser is started. The runner still executes such scenarios
/// and fails them at that step.
pub fn check_defined(registry: &StepRegistry, scenarios: &[Scenario]) -> Result<()> {
	for scenario in scenarios {
		for step in &scenario.steps {
			registry.find(step.phase, &step.text)?;
		}
	}
	Ok(())
}

fn skipped(step: &ScenarioStep) -> StepReport {
	StepReport {
		keyword: step.keyword.clone(),
		phase: step.phase,
		text: step.text.clone(),
		status: StepStatus::Skipped,
		duration_ms: 0,
	}
}

fn elapsed_ms(started: Instant) -> u64 {
	u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
