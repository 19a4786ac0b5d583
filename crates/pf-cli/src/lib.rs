use std::ffi::OsString;
use std::io;

use clap::Parser;
use pf_api::{replay_ndjson, ReplayOptions, ReportSink};
use pf_core::ReportError;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

mod cli_args;
mod config;
mod error_map;
mod ndjson_render;
mod pretty_render;
mod source_loader;
mod summary_output;

pub(crate) use cli_args::{Cli, Mode, OutputFormat, RenderArgs, SummaryArgs};
pub(crate) use config::{load_config, no_color_env, resolve_settings};
pub(crate) use error_map::{
    emit_error, map_cli_config_invalid, map_cli_config_read, map_cli_input_open,
    map_sink_serialize, map_sink_write,
};
pub(crate) use ndjson_render::NdjsonRenderer;
pub(crate) use pretty_render::{PrettyRenderer, RenderOptions};
pub(crate) use source_loader::open_input;
pub(crate) use summary_output::{emit_summary, SummaryOnly};

pub const RUN_NOT_FINISHED: &str = "CLI_RUN_NOT_FINISHED";

/// Installs the stderr log subscriber. `RUST_LOG` overrides the `warn` default.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

pub fn run_cli_from_args<I, T>(args: I) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(error) => {
            let _ = error.print();
            return error.exit_code();
        }
    };
    match run(cli) {
        Ok(code) => code,
        Err(error) => emit_error(error),
    }
}

fn run(cli: Cli) -> Result<i32, ReportError> {
    match cli.command {
        Mode::Render(args) => run_render(args),
        Mode::Summary(args) => run_summary(args),
    }
}

fn run_render(args: RenderArgs) -> Result<i32, ReportError> {
    let config = load_config(args.config.as_deref())?;
    let settings = resolve_settings(&config, &args, no_color_env());
    debug!(?settings, "render settings resolved");

    let reader = open_input(args.input.as_deref())?;
    let stdout = io::stdout().lock();
    let mut sink: Box<dyn ReportSink> = match settings.format {
        OutputFormat::Pretty => Box::new(PrettyRenderer::new(
            stdout,
            RenderOptions {
                show_logs: settings.show_logs,
                color: settings.color,
            },
        )),
        OutputFormat::Ndjson => Box::new(NdjsonRenderer::new(stdout)),
    };

    let report = replay_ndjson(reader, ReplayOptions::default(), sink.as_mut())?;
    if report.summary.is_none() {
        warn!(
            scenarios = report.scenarios,
            "message stream ended without testRunFinished"
        );
    }
    Ok(0)
}

fn run_summary(args: SummaryArgs) -> Result<i32, ReportError> {
    let reader = open_input(args.input.as_deref())?;
    let mut sink = SummaryOnly::default();
    replay_ndjson(reader, ReplayOptions::default(), &mut sink)?;

    let Some(summary) = sink.summary else {
        return Err(ReportError::new(
            RUN_NOT_FINISHED,
            format!(
                "message stream ended after {} scenario(s) without testRunFinished",
                sink.scenarios
            ),
        ));
    };
    emit_summary(&summary);
    Ok(0)
}

#[cfg(test)]
mod tests;
