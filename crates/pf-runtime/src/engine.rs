mod aggregate;
mod attachments;
mod attempts;
mod backtrack;
mod dispatch;
mod hooks;
mod lifecycle;
mod plan;
mod registry;
mod templates;

pub use aggregate::RunStatus;
pub use attachments::split_logs;
pub use attempts::AttemptState;
pub use hooks::{HookPosition, AFTER_LABEL, BEFORE_LABEL};
pub use lifecycle::ReportEngine;
