use std::path::Path;

use pf_api::{replay_ndjson, CollectingSink, ReplayOptions};

use crate::source::{open_messages, read_test_case};
use crate::{ExpectedScenario, ExpectedSummary, FixtureCase, PfToolError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub observed_scenarios: Vec<ExpectedScenario>,
    pub summary: Option<ExpectedSummary>,
    pub envelopes: usize,
}

pub fn run_case(fixture_dir: &Path, case: &FixtureCase) -> Result<RunReport, PfToolError> {
    let reader = open_messages(fixture_dir, case)?;
    let mut sink = CollectingSink::default();
    let report = replay_ndjson(reader, ReplayOptions::default(), &mut sink)?;

    Ok(RunReport {
        observed_scenarios: sink.scenarios.iter().map(ExpectedScenario::from).collect(),
        summary: sink.summary.as_ref().map(ExpectedSummary::from),
        envelopes: report.envelopes,
    })
}

pub fn assert_case(fixture_dir: &Path, case_path: &Path) -> Result<(), PfToolError> {
    let case = read_test_case(case_path)?;
    let report = run_case(fixture_dir, &case)?;

    if report.observed_scenarios.len() != case.expected_scenarios.len() {
        let observed = serde_json::to_string_pretty(&report.observed_scenarios)
            .map_err(PfToolError::ResultSerialize)?;
        return Err(PfToolError::ScenarioCountMismatch {
            expected: case.expected_scenarios.len(),
            actual: report.observed_scenarios.len(),
            observed,
        });
    }

    for (index, (expected, actual)) in case
        .expected_scenarios
        .iter()
        .zip(report.observed_scenarios.iter())
        .enumerate()
    {
        if expected != actual {
            let expected = serde_json::to_string(expected).map_err(PfToolError::ResultSerialize)?;
            let actual = serde_json::to_string(actual).map_err(PfToolError::ResultSerialize)?;
            return Err(PfToolError::ScenarioMismatch {
                index,
                expected,
                actual,
            });
        }
    }

    let actual = report.summary.ok_or(PfToolError::MissingSummary)?;
    if actual != case.expected_summary {
        return Err(PfToolError::SummaryMismatch {
            expected: serde_json::to_string(&case.expected_summary)
                .map_err(PfToolError::ResultSerialize)?,
            actual: serde_json::to_string(&actual).map_err(PfToolError::ResultSerialize)?,
        });
    }

    Ok(())
}

#[cfg(test)]
mod runner_tests {
    use super::*;
    use crate::{ExpectedStep, TESTCASE_SCHEMA_V1};
    use pf_core::StepStatus;

    use std::fs;
    use std::time::{SystemTime, UNIX_EPOCH};

    const STREAM: &str = r#"{"stepDefinition":{"id":"d1","sourceReference":{"uri":"steps.js","location":{"line":7}}}}
{"gherkinDocument":{"uri":"a.feature","feature":{"name":"A","children":[{"scenario":{"id":"sc1","steps":[{"id":"s1","location":{"line":5}}]}}]}}}
{"pickle":{"id":"p1","uri":"a.feature","name":"one step","tags":[{"name":"@fast"}],"astNodeIds":["sc1"],"steps":[{"id":"ps1","text":"it works","astNodeIds":["s1"]}]}}
{"testCase":{"id":"tc1","pickleId":"p1","testSteps":[{"id":"t1","pickleStepId":"ps1","stepDefinitionIds":["d1"]}]}}
{"testCaseStarted":{"id":"a1","testCaseId":"tc1","attempt":0}}
{"testStepFinished":{"testCaseStartedId":"a1","testStepId":"t1","testStepResult":{"status":"PASSED"}}}
{"testCaseFinished":{"testCaseStartedId":"a1","willBeRetried":false}}
{"testRunFinished":{"success":true}}
"#;

    fn temp_dir(name: &str) -> std::path::PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time should move forward")
            .as_nanos();
        std::env::temp_dir().join(format!("pf-tool-runner-{}-{}", name, nanos))
    }

    fn write_file(path: &Path, content: &str) {
        let parent = path.parent().expect("path should have parent");
        fs::create_dir_all(parent).expect("parent dir should be created");
        fs::write(path, content).expect("file should be written");
    }

    fn expected_scenario() -> ExpectedScenario {
        ExpectedScenario {
            name: "one step".to_string(),
            tags: vec!["@fast".to_string()],
            steps: vec![ExpectedStep {
                label: "it works".to_string(),
                status: StepStatus::Passed,
                location: "steps.js:7".to_string(),
                gherkin_location: "a.feature:5 ".to_string(),
                logs: Vec::new(),
            }],
        }
    }

    fn simple_case(expected_scenarios: Vec<ExpectedScenario>, passed: usize) -> FixtureCase {
        FixtureCase {
            schema_version: TESTCASE_SCHEMA_V1.to_string(),
            messages_file: "messages.ndjson".to_string(),
            expected_scenarios,
            expected_summary: ExpectedSummary {
                passed,
                failed: 0,
                total: 1,
            },
        }
    }

    fn write_case(root: &Path, case: &FixtureCase) -> std::path::PathBuf {
        let path = root.join("testcase.json");
        write_file(
            &path,
            &serde_json::to_string(case).expect("case should serialize"),
        );
        path
    }

    #[test]
    fn run_case_collects_scenarios_and_summary() {
        let root = temp_dir("collect");
        write_file(&root.join("messages.ndjson"), STREAM);
        let report = run_case(&root, &simple_case(Vec::new(), 1)).expect("run should pass");
        assert_eq!(report.envelopes, 8);
        assert_eq!(report.observed_scenarios, vec![expected_scenario()]);
        assert_eq!(
            report.summary,
            Some(ExpectedSummary {
                passed: 1,
                failed: 0,
                total: 1
            })
        );
    }

    #[test]
    fn run_case_surfaces_engine_errors() {
        let root = temp_dir("engine-error");
        write_file(
            &root.join("messages.ndjson"),
            r#"{"testCaseStarted":{"id":"a1","testCaseId":"missing","attempt":0}}"#,
        );
        let error = run_case(&root, &simple_case(Vec::new(), 1)).expect_err("run should fail");
        match error {
            PfToolError::Engine(error) => assert!(error.is_protocol_order()),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn assert_case_passes_with_matching_expectations() {
        let root = temp_dir("match");
        write_file(&root.join("messages.ndjson"), STREAM);
        let case_path = write_case(&root, &simple_case(vec![expected_scenario()], 1));
        assert_case(&root, &case_path).expect("case should pass");
    }

    #[test]
    fn assert_case_reports_count_value_and_summary_mismatches() {
        let root = temp_dir("mismatch");
        write_file(&root.join("messages.ndjson"), STREAM);

        let case_path = write_case(&root, &simple_case(Vec::new(), 1));
        let error = assert_case(&root, &case_path).expect_err("count should mismatch");
        assert!(matches!(error, PfToolError::ScenarioCountMismatch { .. }));

        let mut wrong = expected_scenario();
        wrong.steps[0].status = StepStatus::Failed;
        let case_path = write_case(&root, &simple_case(vec![wrong], 1));
        let error = assert_case(&root, &case_path).expect_err("value should mismatch");
        assert!(matches!(error, PfToolError::ScenarioMismatch { index: 0, .. }));

        let case_path = write_case(&root, &simple_case(vec![expected_scenario()], 0));
        let error = assert_case(&root, &case_path).expect_err("summary should mismatch");
        assert!(matches!(error, PfToolError::SummaryMismatch { .. }));
    }

    #[test]
    fn assert_case_requires_run_finished() {
        let root = temp_dir("unfinished");
        let unfinished = STREAM
            .lines()
            .filter(|line| !line.contains("testRunFinished"))
            .collect::<Vec<_>>()
            .join("\n");
        write_file(&root.join("messages.ndjson"), &unfinished);
        let case_path = write_case(&root, &simple_case(vec![expected_scenario()], 1));
        let error = assert_case(&root, &case_path).expect_err("summary should be missing");
        assert!(matches!(error, PfToolError::MissingSummary));
    }
}
