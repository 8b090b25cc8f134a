//! `saucedemo run`: execute scenarios from feature files.

use std::sync::Arc;

use steps::{RunConfig, Runner, Scenario, SessionFactory, SimFactory, StepRegistry, WebDriverFactory, check_defined};
use tracing::{info, warn};

use crate::cli::{DriverKind, RunArgs};
use crate::output::{OutputFormat, ResultBuilder, print_result};

pub async fn execute(args: RunArgs, config: RunConfig, format: OutputFormat) -> anyhow::Result<bool> {
	let config = apply_overrides(config, &args)?;

	let mut scenarios = Vec::new();
	for path in &args.features {
		scenarios.extend(steps::feature::load_path(path)?);
	}
	let scenarios = filter_by_name(scenarios, args.name.as_deref());
	if scenarios.is_empty() {
		anyhow::bail!("no scenarios to run");
	}

	let registry = Arc::new(StepRegistry::saucedemo()?);
	if let Err(err) = check_defined(&registry, &scenarios) {
		warn!(error = %err, "scenarios reference undefined steps and will fail at that step");
	}

	let factory: Arc<dyn SessionFactory> = match args.driver {
		DriverKind::Webdriver => Arc::new(WebDriverFactory::new(config.clone())),
		DriverKind::Sim => Arc::new(SimFactory::new(config.timeout())),
	};

	info!(
		scenarios = scenarios.len(),
		driver = ?args.driver,
		timeout_ms = config.timeout_ms,
		page_load_timeout_ms = config.page_load_timeout_ms,
		"running scenarios"
	);

	let runner = Runner::new(registry, factory);
	let report = runner.run(&scenarios).await;
	let success = report.is_success();

	let result = ResultBuilder::new("run").data(report).ok(success).build();
	print_result(&result, format);

	Ok(success)
}

/// Layers CLI flags and environment over the file/default configuration.
fn apply_overrides(mut config: RunConfig, args: &RunArgs) -> anyhow::Result<RunConfig> {
	if let Some(url) = &args.webdriver_url {
		config.webdriver_url = url.clone();
	}
	if let Some(browser) = args.browser {
		config.browser = browser.into();
	}
	if args.headed {
		config.headless = false;
	}
	if let Some(timeout_ms) = args.timeout_ms {
		config.timeout_ms = timeout_ms;
	}
	if let Some(page_load_timeout_ms) = args.page_load_timeout_ms {
		config.page_load_timeout_ms = page_load_timeout_ms;
	}
	config.validate()?;
	Ok(config)
}

fn filter_by_name(scenarios: Vec<Scenario>, name: Option<&str>) -> Vec<Scenario> {
	match name {
		Some(needle) => scenarios
			.into_iter()
			.filter(|scenario| scenario.name.contains(needle))
			.collect(),
		None => scenarios,
	}
}
