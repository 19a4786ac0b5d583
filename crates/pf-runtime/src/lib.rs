mod engine;

pub use engine::{
    split_logs, AttemptState, HookPosition, ReportEngine, RunStatus, AFTER_LABEL,
    BEFORE_LABEL,
};
