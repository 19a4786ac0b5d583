use std::collections::BTreeMap;

use pf_core::{AttachmentRecord, GherkinDocument, Pickle, ScenarioResult, StepOutcome, StepResult};

use super::attachments::split_logs;
use super::backtrack::gherkin_location;
use super::plan::Plan;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptState {
    Running,
    FinishedRetried,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct SlotState {
    pub(crate) result: Option<StepResult>,
    pub(crate) attachments: Vec<AttachmentRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Attempt {
    pub(crate) id: String,
    /// Snapshot taken when the attempt started; a later `testCase` with the
    /// same id never reshapes a live attempt.
    pub(crate) plan: Plan,
    pub(crate) attempt: u32,
    pub(crate) state: AttemptState,
    pub(crate) slots: Vec<SlotState>,
}

#[derive(Debug, Default)]
pub(crate) struct AttemptTable {
    attempts: BTreeMap<String, Attempt>,
}

impl AttemptTable {
    /// Projects `plan` under a fresh attempt id. Retried attempts of the same
    /// plan are superseded and dropped.
    pub(crate) fn project(&mut self, id: &str, attempt: u32, plan: &Plan) -> Option<Attempt> {
        self.attempts.retain(|_, existing| {
            !(existing.plan.id == plan.id && existing.state == AttemptState::FinishedRetried)
        });
        self.attempts.insert(
            id.to_string(),
            Attempt {
                id: id.to_string(),
                plan: plan.clone(),
                attempt,
                state: AttemptState::Running,
                slots: vec![SlotState::default(); plan.slots.len()],
            },
        )
    }

    pub(crate) fn get(&self, id: &str) -> Option<&Attempt> {
        self.attempts.get(id)
    }

    pub(crate) fn get_mut(&mut self, id: &str) -> Option<&mut Attempt> {
        self.attempts.get_mut(id)
    }

    pub(crate) fn remove(&mut self, id: &str) -> Option<Attempt> {
        self.attempts.remove(id)
    }

    pub(crate) fn len(&self) -> usize {
        self.attempts.len()
    }

    pub(crate) fn clear(&mut self) {
        self.attempts.clear();
    }
}

pub(crate) fn assemble_scenario(
    attempt_id: &str,
    attempt: u32,
    slots: Vec<SlotState>,
    plan: &Plan,
    pickle: &Pickle,
    document: Option<&GherkinDocument>,
) -> ScenarioResult {
    let steps = plan
        .slots
        .iter()
        .zip(slots)
        .map(|(slot, state)| {
            let gherkin_location = slot
                .static_step_id
                .as_deref()
                .and_then(|id| pickle.steps.iter().find(|step| step.id == id))
                .map(|step| gherkin_location(step, pickle, document))
                .unwrap_or_default();
            let (logs, attachments) = split_logs(state.attachments);
            StepOutcome {
                id: slot.id.clone(),
                kind: slot.kind,
                label: slot.label.clone(),
                location: slot.location.clone(),
                gherkin_location,
                argument: slot.argument.clone(),
                result: state.result.unwrap_or_else(StepResult::unknown),
                logs,
                attachments,
            }
        })
        .collect();

    ScenarioResult {
        attempt_id: attempt_id.to_string(),
        attempt,
        uri: pickle.uri.clone(),
        tags: pickle.tags.iter().map(|tag| tag.name.clone()).collect(),
        name: pickle.name.clone(),
        steps,
    }
}
