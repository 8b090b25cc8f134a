//! `saucedemo steps`: list registered step patterns.

use steps::StepRegistry;

use crate::output::{OutputFormat, ResultBuilder, StepInfo, print_result};

pub fn execute(format: OutputFormat) -> anyhow::Result<bool> {
	let registry = StepRegistry::saucedemo()?;
	let data: Vec<StepInfo> = registry
		.iter()
		.map(|step| StepInfo {
			phase: step.phase,
			pattern: step.pattern.to_string(),
		})
		.collect();

	let result = ResultBuilder::new("steps").data(data).build();
	print_result(&result, format);
	Ok(true)
}
