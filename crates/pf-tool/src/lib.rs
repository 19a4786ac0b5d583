mod case;
mod runner;
mod source;

pub use case::{ExpectedScenario, ExpectedStep, ExpectedSummary, FixtureCase, TESTCASE_SCHEMA_V1};
pub use runner::{assert_case, run_case, RunReport};
pub use source::{discover_fixture_dirs, open_messages, read_test_case};

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PfToolError {
    #[error("Failed to read file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse testcase {path}: {source}")]
    ParseCase {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Invalid testcase schema version \"{found}\", expected \"{expected}\".")]
    InvalidSchemaVersion { expected: String, found: String },
    #[error("No fixture directories with testcase.json under {path}.")]
    FixturesEmpty { path: PathBuf },
    #[error("Engine error: {0}")]
    Engine(#[from] pf_core::ReportError),
    #[error("Expected scenario count {expected}, actual {actual}. observed={observed}")]
    ScenarioCountMismatch {
        expected: usize,
        actual: usize,
        observed: String,
    },
    #[error("Scenario mismatch at index {index}. expected={expected} actual={actual}")]
    ScenarioMismatch {
        index: usize,
        expected: String,
        actual: String,
    },
    #[error("Message stream ended without a run summary.")]
    MissingSummary,
    #[error("Summary mismatch. expected={expected} actual={actual}")]
    SummaryMismatch { expected: String, actual: String },
    #[error("Failed to serialize result for diff: {0}")]
    ResultSerialize(serde_json::Error),
}
