use std::io::Write;

use pf_api::ReportSink;
use pf_core::{ReportError, RunSummary, ScenarioResult};
use serde::Serialize;

use crate::{map_sink_serialize, map_sink_write};

#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
enum OutputLine<'a> {
    Scenario(&'a ScenarioResult),
    Summary(&'a RunSummary),
}

/// One JSON object per finalized scenario, then one for the summary.
pub(crate) struct NdjsonRenderer<W: Write> {
    out: W,
}

impl<W: Write> NdjsonRenderer<W> {
    pub(crate) fn new(out: W) -> Self {
        Self { out }
    }

    fn write_line(&mut self, line: OutputLine<'_>) -> Result<(), ReportError> {
        let json = serde_json::to_string(&line).map_err(map_sink_serialize)?;
        writeln!(self.out, "{json}").map_err(map_sink_write)?;
        self.out.flush().map_err(map_sink_write)
    }

    #[cfg(test)]
    pub(crate) fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ReportSink for NdjsonRenderer<W> {
    fn on_scenario(&mut self, scenario: &ScenarioResult) -> Result<(), ReportError> {
        self.write_line(OutputLine::Scenario(scenario))
    }

    fn on_summary(&mut self, summary: &RunSummary) -> Result<(), ReportError> {
        self.write_line(OutputLine::Summary(summary))
    }
}
