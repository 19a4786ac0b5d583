use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

use pf_core::ReportError;

use crate::map_cli_input_open;

/// `None` and `-` both read the stream from stdin.
pub(crate) fn open_input(input: Option<&str>) -> Result<Box<dyn BufRead>, ReportError> {
    match input {
        None | Some("-") => Ok(Box::new(BufReader::new(io::stdin()))),
        Some(path) => {
            let path = resolve_input_path(path)?;
            let file = File::open(&path).map_err(|error| {
                ReportError::new(
                    "CLI_INPUT_OPEN",
                    format!("cannot open {}: {}", path.display(), error),
                )
            })?;
            Ok(Box::new(BufReader::new(file)))
        }
    }
}

pub(crate) fn resolve_input_path(input: &str) -> Result<PathBuf, ReportError> {
    let path = PathBuf::from(input);
    let absolute = if path.is_absolute() {
        path
    } else {
        std::env::current_dir()
            .map_err(map_cli_input_open)?
            .join(path)
    };

    if absolute.is_dir() {
        return Err(ReportError::new(
            "CLI_INPUT_NOT_FILE",
            format!("input is a directory: {}", absolute.display()),
        ));
    }
    Ok(absolute)
}
