use pf_core::ReportError;
use std::fmt::Display;

fn map_error(code: &'static str, error: impl Display) -> ReportError {
    ReportError::new(code, error.to_string())
}

pub(crate) fn emit_error(error: ReportError) -> i32 {
    println!("RESULT:ERROR");
    println!("ERROR_CODE:{}", error.code);
    if let Some(line) = error.line {
        println!("ERROR_LINE:{line}");
    }
    println!(
        "ERROR_MSG_JSON:{}",
        serde_json::to_string(&error.message).expect("string json")
    );
    1
}

pub(crate) fn map_cli_input_open(error: std::io::Error) -> ReportError {
    map_error("CLI_INPUT_OPEN", error)
}

pub(crate) fn map_cli_config_read(error: std::io::Error) -> ReportError {
    map_error("CLI_CONFIG_READ", error)
}

pub(crate) fn map_cli_config_invalid(error: serde_json::Error) -> ReportError {
    map_error("CLI_CONFIG_INVALID", error)
}

pub(crate) fn map_sink_write(error: std::io::Error) -> ReportError {
    map_error("SINK_WRITE", error)
}

pub(crate) fn map_sink_serialize(error: serde_json::Error) -> ReportError {
    map_error("SINK_WRITE", error)
}
