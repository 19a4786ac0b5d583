use std::io::BufRead;

use pf_core::{Envelope, ReportError, ReportOutput, RunSummary, ScenarioResult};
use pf_runtime::{ReportEngine, RunStatus};
use tracing::debug;

pub const ENVELOPE_PARSE: &str = "ENVELOPE_PARSE";
pub const ENVELOPE_READ: &str = "ENVELOPE_READ";

/// Render boundary: receives finalized scenarios and the closing summary.
pub trait ReportSink {
    fn on_scenario(&mut self, scenario: &ScenarioResult) -> Result<(), ReportError>;
    fn on_summary(&mut self, summary: &RunSummary) -> Result<(), ReportError>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectingSink {
    pub scenarios: Vec<ScenarioResult>,
    pub summary: Option<RunSummary>,
}

impl ReportSink for CollectingSink {
    fn on_scenario(&mut self, scenario: &ScenarioResult) -> Result<(), ReportError> {
        self.scenarios.push(scenario.clone());
        Ok(())
    }

    fn on_summary(&mut self, summary: &RunSummary) -> Result<(), ReportError> {
        self.summary = Some(*summary);
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReplayOptions {
    pub run_status: Option<RunStatus>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplayReport {
    pub envelopes: usize,
    pub scenarios: usize,
    pub summary: Option<RunSummary>,
}

pub fn create_engine(options: ReplayOptions) -> ReportEngine {
    ReportEngine::new(options.run_status.unwrap_or_default())
}

/// Parses one NDJSON line. Blank lines yield `None`.
pub fn parse_envelope_line(line: &str, line_number: usize) -> Result<Option<Envelope>, ReportError> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    serde_json::from_str(trimmed)
        .map(Some)
        .map_err(|error| ReportError::at_line(ENVELOPE_PARSE, error.to_string(), line_number))
}

pub fn replay_envelopes<I>(
    engine: &mut ReportEngine,
    envelopes: I,
    sink: &mut dyn ReportSink,
) -> Result<ReplayReport, ReportError>
where
    I: IntoIterator<Item = Envelope>,
{
    let mut report = ReplayReport::default();
    for envelope in envelopes {
        report.envelopes += 1;
        let output = engine.handle_envelope(envelope)?;
        forward(output, sink, &mut report)?;
    }
    Ok(report)
}

/// Streams envelopes from `reader` through a fresh engine, forwarding each
/// result to `sink` as soon as the engine produces it.
pub fn replay_ndjson<R: BufRead>(
    reader: R,
    options: ReplayOptions,
    sink: &mut dyn ReportSink,
) -> Result<ReplayReport, ReportError> {
    let mut engine = create_engine(options);
    let mut report = ReplayReport::default();

    for (index, line) in reader.lines().enumerate() {
        let line_number = index + 1;
        let line = line
            .map_err(|error| ReportError::at_line(ENVELOPE_READ, error.to_string(), line_number))?;
        let Some(envelope) = parse_envelope_line(&line, line_number)? else {
            continue;
        };
        report.envelopes += 1;
        let output = engine.handle_envelope(envelope).map_err(|error| ReportError {
            line: Some(line_number),
            ..error
        })?;
        forward(output, sink, &mut report)?;
    }

    debug!(
        envelopes = report.envelopes,
        scenarios = report.scenarios,
        "replay finished"
    );
    Ok(report)
}

pub fn replay_ndjson_str(input: &str) -> Result<CollectingSink, ReportError> {
    let mut sink = CollectingSink::default();
    replay_ndjson(input.as_bytes(), ReplayOptions::default(), &mut sink)?;
    Ok(sink)
}

fn forward(
    output: Option<ReportOutput>,
    sink: &mut dyn ReportSink,
    report: &mut ReplayReport,
) -> Result<(), ReportError> {
    match output {
        Some(ReportOutput::Scenario(scenario)) => {
            report.scenarios += 1;
            sink.on_scenario(&scenario)
        }
        Some(ReportOutput::Summary(summary)) => {
            report.summary = Some(summary);
            sink.on_summary(&summary)
        }
        None => Ok(()),
    }
}
