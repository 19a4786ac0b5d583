use thiserror::Error;

pub const PROTOCOL_ORDER: &str = "ENGINE_PROTOCOL_ORDER";
pub const STEP_ALREADY_FINISHED: &str = "ENGINE_STEP_ALREADY_FINISHED";
pub const ATTEMPT_ALREADY_FINISHED: &str = "ENGINE_ATTEMPT_ALREADY_FINISHED";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{code}: {message}")]
pub struct ReportError {
    pub code: String,
    pub message: String,
    pub line: Option<usize>,
}

impl ReportError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            line: None,
        }
    }

    pub fn at_line(code: impl Into<String>, message: impl Into<String>, line: usize) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            line: Some(line),
        }
    }

    /// A message referenced an id that no earlier envelope registered.
    pub fn protocol_order(kind: &str, id: &str, referenced_by: &str) -> Self {
        Self::new(
            PROTOCOL_ORDER,
            format!("{referenced_by} references unknown {kind} \"{id}\"."),
        )
    }

    pub fn is_protocol_order(&self) -> bool {
        self.code == PROTOCOL_ORDER
    }
}
