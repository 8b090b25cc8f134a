use steps::{ErrorKind, ScenarioReport, StepReport};

use super::*;

fn step(keyword: &str, phase: Phase, text: &str, status: StepStatus) -> StepReport {
	StepReport {
		keyword: keyword.into(),
		phase,
		text: text.into(),
		status,
		duration_ms: 1,
	}
}

fn sample_report() -> RunReport {
	let mut report = RunReport::default();
	report.push(ScenarioReport {
		name: "Successful login".into(),
		passed: true,
		error: None,
		steps: vec![step(
			"Given",
			Phase::Given,
			"I am on the SauceDemo login page",
			StepStatus::Passed,
		)],
		duration_ms: 5,
	});
	report.push(ScenarioReport {
		name: "Locked out".into(),
		passed: false,
		error: None,
		steps: vec![
			step(
				"Then",
				Phase::Then,
				"I should be navigated to the inventory page",
				StepStatus::Failed {
					kind: ErrorKind::AssertionFailed,
					message: "expected \"/inventory.html\"".into(),
				},
			),
			step(
				"And",
				Phase::Then,
				"I should see the error message \"x\"",
				StepStatus::Skipped,
			),
		],
		duration_ms: 7,
	});
	report
}

fn render(result: &CommandResult<RunReport>, format: OutputFormat) -> String {
	colored::control::set_override(false);
	let mut buf = Vec::new();
	write_result(&mut buf, result, format).unwrap();
	String::from_utf8(buf).unwrap()
}

#[test]
fn failed_run_is_not_ok_even_with_data() {
	let report = sample_report();
	let ok = report.is_success();
	let result = ResultBuilder::new("run").data(report).ok(ok).build();

	assert!(!result.ok);
	assert!(result.data.is_some());
	assert!(result.error.is_none());
	assert_eq!(result.schema_version, SCHEMA_VERSION);
}

#[test]
fn error_result_has_no_data() {
	let result: CommandResult<()> = ResultBuilder::new("run")
		.error("UNDEFINED_STEP", "no step definition matches When \"I press enter\"")
		.build();

	assert!(!result.ok);
	assert!(result.data.is_none());
	assert_eq!(result.error.as_ref().unwrap().code, "UNDEFINED_STEP");
}

#[test]
fn json_envelope_uses_camel_case() {
	let result = ResultBuilder::new("run").data(sample_report()).ok(false).build();
	let text = render(&result, OutputFormat::Json);
	let json: serde_json::Value = serde_json::from_str(&text).unwrap();

	assert_eq!(json["schemaVersion"], 1);
	assert_eq!(json["ok"], false);
	assert_eq!(json["data"]["failed"], 1);
	assert_eq!(json["data"]["scenarios"][1]["steps"][0]["status"], "failed");
	assert!(json["timings"]["durationMs"].is_u64());
}

#[test]
fn ndjson_is_a_single_line() {
	let result = ResultBuilder::new("run").data(sample_report()).build();
	let text = render(&result, OutputFormat::Ndjson);
	assert_eq!(text.lines().count(), 1);
}

#[test]
fn text_report_lists_failures_and_summary() {
	let result = ResultBuilder::new("run").data(sample_report()).ok(false).build();
	let text = render(&result, OutputFormat::Text);

	assert!(text.contains("PASS Successful login"), "{text}");
	assert!(text.contains("FAIL Locked out"), "{text}");
	assert!(text.contains("[ASSERTION_FAILED] expected \"/inventory.html\""), "{text}");
	assert!(text.contains("- And I should see the error message \"x\""), "{text}");
	assert!(text.contains("2 scenarios: 1 passed, 1 failed"), "{text}");
}

#[test]
fn step_list_groups_by_phase() {
	let steps = vec![
		StepInfo {
			phase: Phase::Then,
			pattern: "I should be navigated to the inventory page".into(),
		},
		StepInfo {
			phase: Phase::Given,
			pattern: "I am on the SauceDemo login page".into(),
		},
	];
	let mut buf = Vec::new();
	steps.render(&mut buf).unwrap();
	let text = String::from_utf8(buf).unwrap();

	let lines: Vec<&str> = text.lines().collect();
	assert_eq!(lines[0], "Given I am on the SauceDemo login page");
	assert_eq!(lines[1], "Then  I should be navigated to the inventory page");
}
