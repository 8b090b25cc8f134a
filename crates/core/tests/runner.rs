//! Scenario runner behaviour: ordering, halting, isolation, reporting.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use steps::saucedemo::LOGIN_URL;
use steps::{
	ErrorKind, Phase, RunReport, Runner, SauceDemoSim, Scenario, ScenarioStep, Session, SessionFactory, SimFactory,
	StepRegistry, StepStatus, check_defined,
};

const LOCKED_OUT: &str = "Epic sadface: Sorry, this user has been locked out.";

fn login_scenario(name: &str, username: &str, password: &str) -> Scenario {
	Scenario::new(name)
		.given("I am on the SauceDemo login page")
		.when(format!("I enter username \"{username}\""))
		.and(format!("I enter password \"{password}\""))
		.and("I click the login button")
}

fn sim_runner() -> Runner {
	let registry = Arc::new(StepRegistry::saucedemo().unwrap());
	Runner::new(registry, Arc::new(SimFactory::new(Duration::from_millis(100))))
}

/// Hands out simulators while keeping a handle on each for inspection.
#[derive(Default)]
struct TrackingFactory {
	opened: Mutex<Vec<SauceDemoSim>>,
}

#[async_trait]
impl SessionFactory for TrackingFactory {
	async fn open(&self) -> steps::Result<Session> {
		let sim = SauceDemoSim::new();
		self.opened.lock().push(sim.clone());
		Ok(Session::new(Box::new(sim), Duration::from_millis(100)))
	}
}

struct UnreachableFactory;

#[async_trait]
impl SessionFactory for UnreachableFactory {
	async fn open(&self) -> steps::Result<Session> {
		Err(steps::Error::Protocol {
			error: "session not created".into(),
			message: "no browser available".into(),
		})
	}
}

#[tokio::test]
async fn passing_scenario_reports_every_step_passed() {
	let runner = sim_runner();
	let scenario = login_scenario("standard", "standard_user", "secret_sauce")
		.then("I should be navigated to the inventory page");

	let report = runner.run_scenario(&scenario).await;
	assert!(report.passed, "{report:?}");
	assert_eq!(report.steps.len(), 5);
	assert!(report.steps.iter().all(|s| s.status == StepStatus::Passed));
	assert!(report.failure().is_none());
}

#[tokio::test]
async fn first_failure_halts_and_skips_the_rest() {
	let runner = sim_runner();
	let scenario = login_scenario("locked", "locked_out_user", "secret_sauce")
		.then("I should be navigated to the inventory page")
		.and(format!("I should see the error message \"{LOCKED_OUT}\""));

	let report = runner.run_scenario(&scenario).await;
	assert!(!report.passed);

	let statuses: Vec<&StepStatus> = report.steps.iter().map(|s| &s.status).collect();
	assert!(statuses[..4].iter().all(|s| **s == StepStatus::Passed));
	assert!(matches!(
		statuses[4],
		StepStatus::Failed {
			kind: ErrorKind::AssertionFailed,
			..
		}
	));
	assert_eq!(*statuses[5], StepStatus::Skipped);

	let failure = report.failure().unwrap();
	match &failure.status {
		StepStatus::Failed { message, .. } => {
			assert!(
				message.contains("step \"Then I should be navigated to the inventory page\" failed"),
				"{message}"
			);
			assert!(message.contains("/inventory.html"), "{message}");
			assert!(message.contains(LOGIN_URL), "{message}");
		}
		other => panic!("unexpected status {other:?}"),
	}
}

#[tokio::test]
async fn undefined_step_fails_the_scenario() {
	let runner = sim_runner();
	let scenario = Scenario::new("typo")
		.given("I am on the SauceDemo login page")
		.when("I press the login button")
		.then("I should be navigated to the inventory page");

	let report = runner.run_scenario(&scenario).await;
	assert!(!report.passed);
	assert!(matches!(
		report.steps[1].status,
		StepStatus::Failed {
			kind: ErrorKind::UndefinedStep,
			..
		}
	));
	assert_eq!(report.steps[2].status, StepStatus::Skipped);
}

#[tokio::test]
async fn steps_resolve_under_any_keyword() {
	let runner = sim_runner();
	let scenario = Scenario::new("keywords swapped")
		.step(ScenarioStep::new(Phase::When, "I am on the SauceDemo login page"))
		.step(ScenarioStep::new(Phase::Given, r#"I enter username "standard_user""#))
		.step(ScenarioStep::new(Phase::Then, r#"I enter password "secret_sauce""#))
		.step(ScenarioStep::new(Phase::Given, "I click the login button"))
		.step(ScenarioStep::new(Phase::When, "I should be navigated to the inventory page"));

	let report = runner.run_scenario(&scenario).await;
	assert!(report.passed, "{report:#?}");
	assert_eq!(report.steps[1].keyword, "Given");
	assert!(report.steps.iter().all(|s| s.status == StepStatus::Passed));
}

#[tokio::test]
async fn scenarios_do_not_share_browser_state() {
	let registry = Arc::new(StepRegistry::saucedemo().unwrap());
	let factory = Arc::new(TrackingFactory::default());
	let runner = Runner::new(registry, factory.clone());

	let scenarios = vec![
		login_scenario("standard", "standard_user", "secret_sauce")
			.then("I should be navigated to the inventory page"),
		login_scenario("locked", "locked_out_user", "secret_sauce")
			.then(format!("I should see the error message \"{LOCKED_OUT}\"")),
		Scenario::new("fresh page")
			.given("I am on the SauceDemo login page")
			.when("I click the login button")
			.then("I should see the error message \"Epic sadface: Username is required\""),
	];

	let report: RunReport = runner.run(&scenarios).await;
	assert_eq!(report.passed, 3, "{report:#?}");
	assert!(report.is_success());

	let opened = factory.opened.lock();
	assert_eq!(opened.len(), 3);
	assert!(opened.iter().all(SauceDemoSim::is_closed));
}

#[tokio::test]
async fn session_setup_failure_skips_all_steps() {
	let registry = Arc::new(StepRegistry::saucedemo().unwrap());
	let runner = Runner::new(registry, Arc::new(UnreachableFactory));
	let scenario = login_scenario("no browser", "standard_user", "secret_sauce");

	let report = runner.run_scenario(&scenario).await;
	assert!(!report.passed);
	assert!(report.error.as_deref().unwrap().contains("no browser available"));
	assert!(report.steps.iter().all(|s| s.status == StepStatus::Skipped));

	let mut run = RunReport::default();
	run.push(report);
	assert_eq!(run.failed, 1);
	assert!(!run.is_success());
}

#[test]
fn check_defined_reports_first_unknown_step() {
	let registry = StepRegistry::saucedemo().unwrap();
	let good = login_scenario("ok", "standard_user", "secret_sauce");
	let bad = Scenario::new("bad").then("I should see the dashboard");

	assert!(check_defined(&registry, std::slice::from_ref(&good)).is_ok());
	let err = check_defined(&registry, &[good, bad]).unwrap_err();
	assert!(matches!(err, steps::Error::UndefinedStep { phase: Phase::Then, .. }));
}
