use std::fs;
use std::path::Path;

use pf_core::ReportError;
use serde::Deserialize;

use crate::{map_cli_config_invalid, map_cli_config_read, OutputFormat, RenderArgs};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FormatterConfig {
    #[serde(default)]
    pub(crate) console: ConsoleConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ConsoleConfig {
    #[serde(default)]
    pub(crate) show_logs: Option<bool>,
    #[serde(default)]
    pub(crate) color: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RenderSettings {
    pub(crate) show_logs: bool,
    pub(crate) color: bool,
    pub(crate) format: OutputFormat,
}

pub(crate) fn load_config(path: Option<&str>) -> Result<FormatterConfig, ReportError> {
    let Some(path) = path else {
        return Ok(FormatterConfig::default());
    };
    let raw = fs::read_to_string(Path::new(path)).map_err(map_cli_config_read)?;
    serde_json::from_str(&raw).map_err(map_cli_config_invalid)
}

/// Flags win over the config file; `NO_COLOR` only applies when neither says.
pub(crate) fn resolve_settings(
    config: &FormatterConfig,
    args: &RenderArgs,
    no_color_env: bool,
) -> RenderSettings {
    let show_logs = args.show_logs || config.console.show_logs.unwrap_or(false);
    let color = if args.no_color {
        false
    } else {
        config.console.color.unwrap_or(!no_color_env)
    };
    RenderSettings {
        show_logs,
        color,
        format: args.format,
    }
}

pub(crate) fn no_color_env() -> bool {
    std::env::var_os("NO_COLOR").is_some_and(|value| !value.is_empty())
}
