use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(name = "pretty-formatter")]
#[command(about = "Renders scenario results from a Cucumber message stream")]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Mode,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Mode {
    Render(RenderArgs),
    Summary(SummaryArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Pretty,
    Ndjson,
}

#[derive(Debug, Args)]
pub(crate) struct RenderArgs {
    #[arg(long = "input")]
    pub(crate) input: Option<String>,
    #[arg(long = "config")]
    pub(crate) config: Option<String>,
    #[arg(long = "format", value_enum, default_value_t = OutputFormat::Pretty)]
    pub(crate) format: OutputFormat,
    #[arg(long = "show-logs")]
    pub(crate) show_logs: bool,
    #[arg(long = "no-color")]
    pub(crate) no_color: bool,
}

#[derive(Debug, Args)]
pub(crate) struct SummaryArgs {
    #[arg(long = "input")]
    pub(crate) input: Option<String>,
}
