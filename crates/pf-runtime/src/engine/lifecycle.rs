use std::collections::BTreeMap;

use pf_core::{
    error::{ATTEMPT_ALREADY_FINISHED, STEP_ALREADY_FINISHED},
    Attachment, Definition, GherkinDocument, Pickle, ReportError, ReportOutput, TestCase,
    TestCaseFinished, TestCaseStarted, TestRunFinished, TestRunStarted, TestStepFinished,
};
use tracing::{debug, warn};

use super::aggregate::RunStatus;
use super::attempts::{assemble_scenario, AttemptState, AttemptTable};
use super::plan::{build_plan, Plan};
use super::registry::DefinitionRegistry;
use super::templates::TemplateStore;

/// Correlates templates, plans and attempts as envelopes arrive.
#[derive(Debug, Default)]
pub struct ReportEngine {
    definitions: DefinitionRegistry,
    templates: TemplateStore,
    plans: BTreeMap<String, Plan>,
    attempts: AttemptTable,
    run_status: RunStatus,
}

impl ReportEngine {
    pub fn new(run_status: RunStatus) -> Self {
        Self {
            run_status,
            ..Self::default()
        }
    }

    pub fn run_status(&self) -> &RunStatus {
        &self.run_status
    }

    pub fn attempt_state(&self, attempt_id: &str) -> Option<AttemptState> {
        self.attempts.get(attempt_id).map(|attempt| attempt.state)
    }

    /// Attempts still held: running ones and retried ones awaiting their
    /// successor. Counted attempts are dropped.
    pub fn attempt_count(&self) -> usize {
        self.attempts.len()
    }

    /// Drops attempt records and restarts the counters; registered
    /// definitions, templates and plans are kept.
    pub fn reset_run(&mut self) {
        self.attempts.clear();
        self.run_status.reset();
    }

    pub(crate) fn on_definition(&mut self, definition: &Definition) {
        self.definitions.register(definition);
    }

    pub(crate) fn on_document(&mut self, document: GherkinDocument) {
        self.templates.store_document(document);
    }

    pub(crate) fn on_compiled(&mut self, pickle: Pickle) {
        self.templates.store_pickle(pickle);
    }

    pub(crate) fn on_prepared(&mut self, test_case: &TestCase) -> Result<(), ReportError> {
        let plan = build_plan(
            test_case,
            self.templates.pickle(&test_case.pickle_id),
            &self.definitions,
        )?;
        self.plans.insert(plan.id.clone(), plan);
        Ok(())
    }

    pub(crate) fn on_attempt_started(&mut self, started: &TestCaseStarted) -> Result<(), ReportError> {
        let plan = self.plans.get(&started.test_case_id).ok_or_else(|| {
            ReportError::protocol_order(
                "testCase",
                &started.test_case_id,
                &format!("testCaseStarted {}", started.id),
            )
        })?;
        if self.attempts.project(&started.id, started.attempt, plan).is_some() {
            warn!(attempt_id = %started.id, "attempt id reused; previous attempt replaced");
        }
        Ok(())
    }

    pub(crate) fn on_step_finished(&mut self, finished: TestStepFinished) -> Result<(), ReportError> {
        let attempt_id = &finished.test_case_started_id;
        let attempt = self.attempts.get_mut(attempt_id).ok_or_else(|| {
            ReportError::protocol_order(
                "testCaseStarted",
                attempt_id,
                &format!("testStepFinished {}", finished.test_step_id),
            )
        })?;
        if attempt.state != AttemptState::Running {
            return Err(ReportError::new(
                ATTEMPT_ALREADY_FINISHED,
                format!("Step {} finished after attempt {} ended.", finished.test_step_id, attempt_id),
            ));
        }
        let Some(slot) = attempt
            .plan
            .slot_index(&finished.test_step_id)
            .and_then(|index| attempt.slots.get_mut(index))
        else {
            warn!(
                attempt_id = %attempt_id,
                step_id = %finished.test_step_id,
                "step is not part of the attempt's plan; result ignored"
            );
            return Ok(());
        };

        if slot.result.is_some() {
            return Err(ReportError::new(
                STEP_ALREADY_FINISHED,
                format!(
                    "Step {} of attempt {} reported a second result.",
                    finished.test_step_id, attempt_id
                ),
            ));
        }
        slot.result = Some(finished.test_step_result.into());
        Ok(())
    }

    pub(crate) fn on_attachment(&mut self, attachment: Attachment) -> Result<(), ReportError> {
        let Some(attempt_id) = attachment.test_case_started_id.clone() else {
            debug!(media_type = %attachment.media_type, "run-level attachment ignored");
            return Ok(());
        };
        let attempt = self.attempts.get_mut(&attempt_id).ok_or_else(|| {
            ReportError::protocol_order("testCaseStarted", &attempt_id, "attachment")
        })?;
        if attempt.state != AttemptState::Running {
            warn!(attempt_id = %attempt_id, "attachment after attempt ended; ignored");
            return Ok(());
        }
        let slot = attachment
            .test_step_id
            .as_deref()
            .and_then(|step_id| attempt.plan.slot_index(step_id))
            .and_then(|index| attempt.slots.get_mut(index));
        match slot {
            Some(slot) => slot.attachments.push(attachment.into()),
            None => warn!(
                attempt_id = %attempt_id,
                step_id = ?attachment.test_step_id,
                "attachment does not belong to a step of the attempt; ignored"
            ),
        }
        Ok(())
    }

    pub(crate) fn on_attempt_finished(
        &mut self,
        finished: &TestCaseFinished,
    ) -> Result<Option<ReportOutput>, ReportError> {
        let attempt_id = &finished.test_case_started_id;
        let attempt = self.attempts.get_mut(attempt_id).ok_or_else(|| {
            ReportError::protocol_order("testCaseStarted", attempt_id, "testCaseFinished")
        })?;
        if attempt.state != AttemptState::Running {
            return Err(ReportError::new(
                ATTEMPT_ALREADY_FINISHED,
                format!("Attempt {attempt_id} finished twice."),
            ));
        }

        if finished.will_be_retried {
            attempt.state = AttemptState::FinishedRetried;
            debug!(attempt_id = %attempt_id, "attempt will be retried; not counted");
            return Ok(None);
        }

        let pickle = self.templates.pickle(&attempt.plan.template_id).ok_or_else(|| {
            ReportError::protocol_order(
                "pickle",
                &attempt.plan.template_id,
                &format!("testCase {}", attempt.plan.id),
            )
        })?;
        let document = self.templates.document_for(pickle);
        let Some(attempt) = self.attempts.remove(attempt_id) else {
            return Err(ReportError::protocol_order("testCaseStarted", attempt_id, "testCaseFinished"));
        };

        let scenario = assemble_scenario(
            &attempt.id,
            attempt.attempt,
            attempt.slots,
            &attempt.plan,
            pickle,
            document,
        );
        self.run_status.record(scenario.passed());
        Ok(Some(ReportOutput::Scenario(scenario)))
    }

    pub(crate) fn on_run_started(&mut self, started: &TestRunStarted) {
        self.run_status.mark_run_started(started.timestamp);
    }

    pub(crate) fn on_run_finished(&mut self, finished: &TestRunFinished) -> ReportOutput {
        ReportOutput::Summary(self.run_status.finish(finished.timestamp))
    }
}
