use pf_api::ReportSink;
use pf_core::{ReportError, RunSummary, ScenarioResult};

/// Swallows scenarios and keeps the closing summary.
#[derive(Debug, Default)]
pub(crate) struct SummaryOnly {
    pub(crate) scenarios: usize,
    pub(crate) summary: Option<RunSummary>,
}

impl ReportSink for SummaryOnly {
    fn on_scenario(&mut self, _scenario: &ScenarioResult) -> Result<(), ReportError> {
        self.scenarios += 1;
        Ok(())
    }

    fn on_summary(&mut self, summary: &RunSummary) -> Result<(), ReportError> {
        self.summary = Some(*summary);
        Ok(())
    }
}

pub(crate) fn summary_lines(summary: &RunSummary) -> Vec<String> {
    vec![
        "RESULT:OK".to_string(),
        format!("PASSED:{}", summary.passed),
        format!("FAILED:{}", summary.failed),
        format!("TOTAL:{}", summary.total),
        format!("DURATION_MS:{}", summary.duration_ms),
    ]
}

pub(crate) fn emit_summary(summary: &RunSummary) {
    for line in summary_lines(summary) {
        println!("{line}");
    }
}
