//! Wire shapes of the execution-report protocol.
//!
//! Only the fields the reconstruction engine reads are modelled; everything
//! else in an envelope is ignored on deserialization.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    #[serde(default, alias = "definition", skip_serializing_if = "Option::is_none")]
    pub step_definition: Option<Definition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hook: Option<Definition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gherkin_document: Option<GherkinDocument>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pickle: Option<Pickle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_case: Option<TestCase>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_case_started: Option<TestCaseStarted>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_step_finished: Option<TestStepFinished>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<Attachment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_case_finished: Option<TestCaseFinished>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_run_started: Option<TestRunStarted>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_run_finished: Option<TestRunFinished>,
}

impl Envelope {
    pub fn kind_name(&self) -> &'static str {
        if self.step_definition.is_some() {
            "stepDefinition"
        } else if self.hook.is_some() {
            "hook"
        } else if self.gherkin_document.is_some() {
            "gherkinDocument"
        } else if self.pickle.is_some() {
            "pickle"
        } else if self.test_case.is_some() {
            "testCase"
        } else if self.test_case_started.is_some() {
            "testCaseStarted"
        } else if self.test_step_finished.is_some() {
            "testStepFinished"
        } else if self.attachment.is_some() {
            "attachment"
        } else if self.test_case_finished.is_some() {
            "testCaseFinished"
        } else if self.test_run_started.is_some() {
            "testRunStarted"
        } else if self.test_run_finished.is_some() {
            "testRunFinished"
        } else {
            "ignored"
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timestamp {
    pub seconds: i64,
    #[serde(default)]
    pub nanos: i64,
}

impl Timestamp {
    pub fn as_millis(&self) -> i64 {
        self.seconds
            .saturating_mul(1_000)
            .saturating_add(self.nanos / 1_000_000)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub line: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceReference {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HookType {
    BeforeTestRun,
    AfterTestRun,
    BeforeTestCase,
    AfterTestCase,
    BeforeTestStep,
    AfterTestStep,
}

impl HookType {
    pub fn is_before(self) -> bool {
        matches!(
            self,
            Self::BeforeTestRun | Self::BeforeTestCase | Self::BeforeTestStep
        )
    }
}

/// Step definition or hook registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Definition {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub hook_type: Option<HookType>,
    #[serde(default)]
    pub source_reference: SourceReference,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GherkinDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature: Option<Feature>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feature {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub children: Vec<FeatureChild>,
}

/// One child of a feature or rule; exactly one field is populated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureChild {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<Background>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scenario: Option<ScenarioNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule: Option<Rule>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Background {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub steps: Vec<AstStep>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioNode {
    pub id: String,
    #[serde(default)]
    pub steps: Vec<AstStep>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub children: Vec<FeatureChild>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AstStep {
    pub id: String,
    pub location: Location,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pickle {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub tags: Vec<PickleTag>,
    #[serde(default)]
    pub steps: Vec<PickleStep>,
    #[serde(default)]
    pub ast_node_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickleTag {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PickleStep {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub argument: Option<PickleStepArgument>,
    #[serde(default)]
    pub ast_node_ids: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PickleStepArgument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_table: Option<PickleTable>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_string: Option<PickleDocString>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickleTable {
    #[serde(default)]
    pub rows: Vec<PickleTableRow>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickleTableRow {
    #[serde(default)]
    pub cells: Vec<PickleTableCell>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickleTableCell {
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PickleDocString {
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    pub id: String,
    pub pickle_id: String,
    #[serde(default)]
    pub test_steps: Vec<TestStep>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestStep {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pickle_step_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hook_id: Option<String>,
    #[serde(default)]
    pub step_definition_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCaseStarted {
    pub id: String,
    pub test_case_id: String,
    #[serde(default)]
    pub attempt: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Timestamp>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestStepFinished {
    pub test_case_started_id: String,
    pub test_step_id: String,
    pub test_step_result: TestStepResult,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestStepResult {
    pub status: StepStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StepStatus {
    Unknown,
    Passed,
    Skipped,
    Pending,
    Undefined,
    Ambiguous,
    Failed,
}

impl StepStatus {
    pub fn name(self) -> &'static str {
        match self {
            Self::Unknown => "UNKNOWN",
            Self::Passed => "PASSED",
            Self::Skipped => "SKIPPED",
            Self::Pending => "PENDING",
            Self::Undefined => "UNDEFINED",
            Self::Ambiguous => "AMBIGUOUS",
            Self::Failed => "FAILED",
        }
    }

    /// Statuses whose result message is worth showing next to the step.
    pub fn carries_message(self) -> bool {
        matches!(self, Self::Failed | Self::Ambiguous)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_case_started_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_step_id: Option<String>,
    pub media_type: String,
    #[serde(default)]
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_encoding: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCaseFinished {
    pub test_case_started_id: String,
    #[serde(default)]
    pub will_be_retried: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Timestamp>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestRunStarted {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Timestamp>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestRunFinished {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
}

#[cfg(test)]
mod messages_tests {
    use super::*;

    #[test]
    fn envelope_ignores_unmodelled_variants_and_fields() {
        let parsed: Envelope = serde_json::from_str(
            r#"{"meta":{"protocolVersion":"22.0.0"},"testStepStarted":{"testStepId":"x"}}"#,
        )
        .expect("envelope should deserialize");
        assert_eq!(parsed, Envelope::default());
        assert_eq!(parsed.kind_name(), "ignored");
    }

    #[test]
    fn definition_alias_and_hook_type_deserialize() {
        let parsed: Envelope = serde_json::from_str(
            r#"{"definition":{"id":"d1","sourceReference":{"uri":"steps.js","location":{"line":3}}}}"#,
        )
        .expect("definition alias should deserialize");
        let definition = parsed.step_definition.expect("definition should be set");
        assert_eq!(definition.id, "d1");
        assert_eq!(definition.source_reference.uri.as_deref(), Some("steps.js"));

        let hook: Definition = serde_json::from_str(
            r#"{"id":"h1","name":"setup","type":"AFTER_TEST_CASE","sourceReference":{}}"#,
        )
        .expect("hook should deserialize");
        assert_eq!(hook.hook_type, Some(HookType::AfterTestCase));
        assert!(!HookType::AfterTestCase.is_before());
        assert!(HookType::BeforeTestStep.is_before());
    }

    #[test]
    fn step_result_status_uses_protocol_spelling() {
        let parsed: TestStepResult =
            serde_json::from_str(r#"{"status":"AMBIGUOUS","message":"two matches"}"#)
                .expect("result should deserialize");
        assert_eq!(parsed.status, StepStatus::Ambiguous);
        assert!(parsed.status.carries_message());
        assert!(!StepStatus::Pending.carries_message());
        assert_eq!(StepStatus::Undefined.name(), "UNDEFINED");
    }

    #[test]
    fn pickle_argument_shapes_deserialize() {
        let parsed: PickleStep = serde_json::from_str(
            r#"{"id":"s1","text":"a table","astNodeIds":["a1"],
                "argument":{"dataTable":{"rows":[{"cells":[{"value":"x"},{"value":"y"}]}]}}}"#,
        )
        .expect("pickle step should deserialize");
        let table = parsed
            .argument
            .and_then(|argument| argument.data_table)
            .expect("table should be set");
        assert_eq!(table.rows[0].cells[1].value, "y");
    }

    #[test]
    fn timestamp_converts_to_millis() {
        let timestamp = Timestamp {
            seconds: 2,
            nanos: 500_000_000,
        };
        assert_eq!(timestamp.as_millis(), 2_500);
    }

    #[test]
    fn timestamp_millis_saturate_on_huge_seconds() {
        let huge = Timestamp {
            seconds: i64::MAX / 10,
            nanos: 999_999_999,
        };
        assert_eq!(huge.as_millis(), i64::MAX);
        let tiny = Timestamp {
            seconds: i64::MIN / 10,
            nanos: 0,
        };
        assert_eq!(tiny.as_millis(), i64::MIN);
    }
}
