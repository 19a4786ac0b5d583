use pf_core::{RunSummary, ScenarioResult, StepOutcome, StepStatus};
use serde::{Deserialize, Serialize};

pub const TESTCASE_SCHEMA_V1: &str = "pf-tool-case.v1";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixtureCase {
    pub schema_version: String,
    #[serde(default = "default_messages_file")]
    pub messages_file: String,
    #[serde(default)]
    pub expected_scenarios: Vec<ExpectedScenario>,
    pub expected_summary: ExpectedSummary,
}

fn default_messages_file() -> String {
    "messages.ndjson".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpectedScenario {
    pub name: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub steps: Vec<ExpectedStep>,
}

/// The rendered view of a step; duration-free so fixtures stay stable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpectedStep {
    pub label: String,
    pub status: StepStatus,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub gherkin_location: String,
    #[serde(default)]
    pub logs: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpectedSummary {
    pub passed: usize,
    pub failed: usize,
    pub total: usize,
}

impl From<&StepOutcome> for ExpectedStep {
    fn from(step: &StepOutcome) -> Self {
        Self {
            label: step.label.clone(),
            status: step.result.status,
            location: step.location.clone(),
            gherkin_location: step.gherkin_location.clone(),
            logs: step.logs.iter().map(|log| log.body.clone()).collect(),
        }
    }
}

impl From<&ScenarioResult> for ExpectedScenario {
    fn from(scenario: &ScenarioResult) -> Self {
        Self {
            name: scenario.name.clone(),
            tags: scenario.tags.clone(),
            steps: scenario.steps.iter().map(ExpectedStep::from).collect(),
        }
    }
}

impl From<&RunSummary> for ExpectedSummary {
    fn from(summary: &RunSummary) -> Self {
        Self {
            passed: summary.passed,
            failed: summary.failed,
            total: summary.total,
        }
    }
}
