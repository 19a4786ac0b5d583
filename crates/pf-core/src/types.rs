use serde::{Deserialize, Serialize};

use crate::messages::{Attachment, PickleStepArgument, StepStatus, TestStepResult};

pub const LOG_MEDIA_TYPE: &str = "text/x.cucumber.log+plain";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SlotKind {
    Step,
    Hook,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum StepArgument {
    DataTable {
        rows: Vec<Vec<String>>,
    },
    DocString {
        content: String,
        #[serde(default, rename = "mediaType", skip_serializing_if = "Option::is_none")]
        media_type: Option<String>,
    },
}

impl StepArgument {
    pub fn from_pickle(argument: &PickleStepArgument) -> Option<Self> {
        if let Some(table) = &argument.data_table {
            let rows = table
                .rows
                .iter()
                .map(|row| row.cells.iter().map(|cell| cell.value.clone()).collect())
                .collect();
            return Some(Self::DataTable { rows });
        }
        argument.doc_string.as_ref().map(|doc| Self::DocString {
            content: doc.content.clone(),
            media_type: doc.media_type.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepResult {
    pub status: StepStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl StepResult {
    pub fn unknown() -> Self {
        Self {
            status: StepStatus::Unknown,
            message: None,
        }
    }
}

impl From<TestStepResult> for StepResult {
    fn from(result: TestStepResult) -> Self {
        Self {
            status: result.status,
            message: result.message,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentRecord {
    pub media_type: String,
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_encoding: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
}

impl AttachmentRecord {
    pub fn is_log(&self) -> bool {
        self.media_type == LOG_MEDIA_TYPE
    }
}

impl From<Attachment> for AttachmentRecord {
    fn from(attachment: Attachment) -> Self {
        Self {
            media_type: attachment.media_type,
            body: attachment.body,
            content_encoding: attachment.content_encoding,
            file_name: attachment.file_name,
        }
    }
}

/// One resolved slot of a finished attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepOutcome {
    pub id: String,
    pub kind: SlotKind,
    pub label: String,
    pub location: String,
    pub gherkin_location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub argument: Option<StepArgument>,
    pub result: StepResult,
    #[serde(default)]
    pub logs: Vec<AttachmentRecord>,
    #[serde(default)]
    pub attachments: Vec<AttachmentRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioResult {
    pub attempt_id: String,
    pub attempt: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    pub tags: Vec<String>,
    pub name: String,
    pub steps: Vec<StepOutcome>,
}

impl ScenarioResult {
    pub fn passed(&self) -> bool {
        self.steps
            .iter()
            .all(|step| step.result.status == StepStatus::Passed)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub passed: usize,
    pub failed: usize,
    pub total: usize,
    pub duration_ms: u64,
}

impl RunSummary {
    pub fn pass_rate(&self) -> f64 {
        rate(self.passed, self.total)
    }

    pub fn fail_rate(&self) -> f64 {
        rate(self.failed, self.total)
    }
}

fn rate(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}

/// What the engine hands to the render boundary after an envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ReportOutput {
    Scenario(ScenarioResult),
    Summary(RunSummary),
}
