//! Loading scenarios from `.feature` files.
//!
//! Parsing is delegated to the [`gherkin`] crate. This module only flattens
//! the parsed tree into runnable [`Scenario`]s: background steps are
//! prepended to every scenario (feature background first, then the rule's),
//! and each `Scenario Outline` row becomes its own scenario with `<column>`
//! references substituted.

use std::path::{Path, PathBuf};

use gherkin::{GherkinEnv, StepType};

use crate::error::{Error, Result};
use crate::registry::Phase;
use crate::scenario::{Scenario, ScenarioStep};

pub fn load_path(path: &Path) -> Result<Vec<Scenario>> {
	let feature = gherkin::Feature::parse_path(path, GherkinEnv::default()).map_err(|e| Error::Feature {
		path: path.to_path_buf(),
		reason: e.to_string(),
	})?;
	Ok(flatten(&feature))
}

pub fn parse_str(source: &str) -> Result<Vec<Scenario>> {
	let feature = gherkin::Feature::parse(source, GherkinEnv::default()).map_err(|e| Error::Feature {
		path: PathBuf::from("<inline>"),
		reason: e.to_string(),
	})?;
	Ok(flatten(&feature))
}

fn flatten(feature: &gherkin::Feature) -> Vec<Scenario> {
	let background = background_steps(feature.background.as_ref());
	let mut scenarios = Vec::new();

	for scenario in &feature.scenarios {
		expand(scenario, &background, &mut scenarios);
	}

	for rule in &feature.rules {
		let mut rule_background = background.clone();
		rule_background.extend(background_steps(rule.background.as_ref()));
		for scenario in &rule.scenarios {
			expand(scenario, &rule_background, &mut scenarios);
		}
	}

	scenarios
}

fn background_steps(background: Option<&gherkin::Background>) -> Vec<ScenarioStep> {
	background
		.map(|bg| bg.steps.iter().map(|step| convert(step, &[])).collect())
		.unwrap_or_default()
}

fn expand(scenario: &gherkin::Scenario, background: &[ScenarioStep], out: &mut Vec<Scenario>) {
	let tables: Vec<&gherkin::Table> = scenario
		.examples
		.iter()
		.filter_map(|examples| examples.table.as_ref())
		.collect();

	if tables.is_empty() {
		out.push(build(scenario.name.clone(), background, &scenario.steps, &[]));
		return;
	}

	for table in tables {
		let Some((header, rows)) = table.rows.split_first() else {
			continue;
		};
		for row in rows {
			let bindings: Vec<(&str, &str)> = header
				.iter()
				.map(String::as_str)
				.zip(row.iter().map(String::as_str))
				.collect();
			let name = format!("{} ({})", scenario.name, row.join(", "));
			out.push(build(name, background, &scenario.steps, &bindings));
		}
	}
}

fn build(name: String, background: &[ScenarioStep], steps: &[gherkin::Step], bindings: &[(&str, &str)]) -> Scenario {
	let mut all = background.to_vec();
	all.extend(steps.iter().map(|step| convert(step, bindings)));
	Scenario { name, steps: all }
}

fn convert(step: &gherkin::Step, bindings: &[(&str, &str)]) -> ScenarioStep {
	let phase = match step.ty {
		StepType::Given => Phase::Given,
		StepType::When => Phase::When,
		StepType::Then => Phase::Then,
	};

	let mut text = step.value.clone();
	for (column, value) in bindings {
		text = text.replace(&format!("<{column}>"), value);
	}

	ScenarioStep {
		keyword: step.keyword.trim().to_string(),
		phase,
		text,
	}
}
