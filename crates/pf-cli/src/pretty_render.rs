use std::io::Write;

use crossterm::style::{Color, Stylize};
use pf_api::ReportSink;
use pf_core::{ReportError, RunSummary, ScenarioResult, StepArgument, StepOutcome, StepStatus};

use crate::map_sink_write;

const INDENT: &str = "  ";
const BAR_LENGTH: usize = 60;
const BAR_CELL: &str = "■";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct RenderOptions {
    pub(crate) show_logs: bool,
    pub(crate) color: bool,
}

fn paint(text: &str, color: Option<Color>, options: RenderOptions) -> String {
    match color {
        Some(color) if options.color => text.with(color).to_string(),
        _ => text.to_string(),
    }
}

fn status_color(status: StepStatus) -> Option<Color> {
    match status {
        StepStatus::Passed => Some(Color::DarkGreen),
        StepStatus::Failed => Some(Color::DarkRed),
        StepStatus::Skipped => Some(Color::DarkBlue),
        StepStatus::Undefined => Some(Color::Yellow),
        StepStatus::Ambiguous => Some(Color::DarkYellow),
        StepStatus::Pending => Some(Color::DarkGrey),
        StepStatus::Unknown => None,
    }
}

fn status_icon(status: StepStatus) -> &'static str {
    match status {
        StepStatus::Passed => "✓",
        StepStatus::Failed => "✗",
        StepStatus::Skipped => "-",
        _ => "?",
    }
}

pub(crate) fn render_scenario(scenario: &ScenarioResult, options: RenderOptions) -> String {
    let mut lines = Vec::new();
    if !scenario.tags.is_empty() {
        lines.push(paint(
            &scenario.tags.join(" "),
            Some(Color::DarkCyan),
            options,
        ));
    }
    lines.push(format!(
        "{}{}",
        paint("Scenario: ", Some(Color::DarkMagenta), options),
        scenario.name
    ));
    lines.extend(scenario.steps.iter().map(|step| render_step(step, options)));
    lines.push(String::new());
    lines.join("\n")
}

pub(crate) fn render_step(step: &StepOutcome, options: RenderOptions) -> String {
    let status = step.result.status;
    let color = status_color(status);
    let icon = if options.color {
        paint(status_icon(status), color, options).bold().to_string()
    } else {
        status_icon(status).to_string()
    };

    let mut lines = vec![format!(
        "{INDENT}{icon} {} {}{}",
        paint(&step.label, color, options),
        paint(&step.gherkin_location, Some(Color::DarkGrey), options),
        paint(&step.location, Some(Color::DarkGrey), options)
    )];

    let mut detail = Vec::new();
    match &step.argument {
        Some(StepArgument::DataTable { rows }) => detail.push(render_data_table(rows)),
        Some(StepArgument::DocString { content, .. }) => detail.push(render_doc_string(content)),
        None => {}
    }
    if status.carries_message() {
        if let Some(message) = &step.result.message {
            detail.push(format!("{INDENT}{message}"));
        }
    }
    lines.extend(detail.iter().map(|text| paint(text, color, options)));

    if options.show_logs {
        lines.extend(
            step.logs
                .iter()
                .map(|log| format!("{INDENT}LOG: {}", log.body)),
        );
    }
    lines.join("\n")
}

/// Columns are padded to their widest cell; no top or bottom border.
pub(crate) fn render_data_table(rows: &[Vec<String>]) -> String {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    let widths = (0..columns)
        .map(|column| {
            rows.iter()
                .filter_map(|row| row.get(column))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect::<Vec<_>>();

    rows.iter()
        .map(|row| {
            let cells = widths
                .iter()
                .enumerate()
                .map(|(column, width)| {
                    let cell = row.get(column).map(String::as_str).unwrap_or("");
                    let padding = width.saturating_sub(cell.chars().count());
                    format!(" {}{} ", cell, " ".repeat(padding))
                })
                .collect::<Vec<_>>();
            format!("{INDENT}│{}│", cells.join("│"))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub(crate) fn render_doc_string(content: &str) -> String {
    let mut lines = vec![format!("{INDENT}\"\"\"")];
    lines.extend(content.split('\n').map(|line| format!("{INDENT}{line}")));
    lines.push(format!("{INDENT}\"\"\""));
    lines.join("\n")
}

pub(crate) fn render_summary(summary: &RunSummary, options: RenderOptions) -> String {
    let passed_cells = (summary.pass_rate() * BAR_LENGTH as f64).round() as usize;
    let failed_cells = (summary.fail_rate() * BAR_LENGTH as f64).round() as usize;
    let bar = format!(
        "{}{}",
        paint(&BAR_CELL.repeat(passed_cells), Some(Color::DarkGreen), options),
        paint(&BAR_CELL.repeat(failed_cells), Some(Color::DarkRed), options)
    );
    [
        bar,
        format!(
            "Passed: {} ({}%)",
            summary.passed,
            format_rate(summary.pass_rate())
        ),
        format!(
            "Failed: {} ({}%)",
            summary.failed,
            format_rate(summary.fail_rate())
        ),
        format!(
            "Total: {} ({})",
            summary.total,
            format_duration(summary.duration_ms)
        ),
    ]
    .join("\n")
}

/// Percentage rounded to two decimals, without trailing zeros.
pub(crate) fn format_rate(rate: f64) -> String {
    let percent = (rate * 10_000.0).round() / 100.0;
    format!("{percent}")
}

pub(crate) fn format_duration(duration_ms: u64) -> String {
    let seconds = duration_ms / 1000;
    format!("{}m {}s", seconds / 60, seconds % 60)
}

pub(crate) struct PrettyRenderer<W: Write> {
    out: W,
    options: RenderOptions,
}

impl<W: Write> PrettyRenderer<W> {
    pub(crate) fn new(out: W, options: RenderOptions) -> Self {
        Self { out, options }
    }

    #[cfg(test)]
    pub(crate) fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ReportSink for PrettyRenderer<W> {
    fn on_scenario(&mut self, scenario: &ScenarioResult) -> Result<(), ReportError> {
        writeln!(self.out, "{}", render_scenario(scenario, self.options)).map_err(map_sink_write)?;
        self.out.flush().map_err(map_sink_write)
    }

    fn on_summary(&mut self, summary: &RunSummary) -> Result<(), ReportError> {
        writeln!(self.out, "{}", render_summary(summary, self.options)).map_err(map_sink_write)?;
        self.out.flush().map_err(map_sink_write)
    }
}
