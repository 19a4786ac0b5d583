use pf_core::{Pickle, PickleStep, ReportError, SlotKind, StepArgument, TestCase, TestStep};

use super::hooks::hook_label;
use super::registry::DefinitionRegistry;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PlanSlot {
    pub(crate) id: String,
    pub(crate) kind: SlotKind,
    pub(crate) static_step_id: Option<String>,
    pub(crate) label: String,
    pub(crate) argument: Option<StepArgument>,
    pub(crate) location: String,
}

/// A test case merged with its pickle. Holds the pickle id, never the pickle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Plan {
    pub(crate) id: String,
    pub(crate) template_id: String,
    pub(crate) slots: Vec<PlanSlot>,
}

impl Plan {
    pub(crate) fn slot_index(&self, slot_id: &str) -> Option<usize> {
        self.slots.iter().position(|slot| slot.id == slot_id)
    }
}

pub(crate) fn build_plan(
    test_case: &TestCase,
    pickle: Option<&Pickle>,
    registry: &DefinitionRegistry,
) -> Result<Plan, ReportError> {
    let pickle = pickle.ok_or_else(|| {
        ReportError::protocol_order(
            "pickle",
            &test_case.pickle_id,
            &format!("testCase {}", test_case.id),
        )
    })?;

    let matched = test_case
        .test_steps
        .iter()
        .map(|slot| static_step_for(slot, pickle))
        .collect::<Vec<_>>();
    let originates_from_step = matched.iter().map(Option::is_some).collect::<Vec<_>>();

    let slots = test_case
        .test_steps
        .iter()
        .zip(matched)
        .enumerate()
        .map(|(index, (slot, static_step))| {
            resolve_slot(slot, static_step, index, &originates_from_step, registry)
        })
        .collect();

    Ok(Plan {
        id: test_case.id.clone(),
        template_id: pickle.id.clone(),
        slots,
    })
}

fn static_step_for<'a>(slot: &TestStep, pickle: &'a Pickle) -> Option<&'a PickleStep> {
    let pickle_step_id = slot.pickle_step_id.as_deref()?;
    pickle.steps.iter().find(|step| step.id == pickle_step_id)
}

fn resolve_slot(
    slot: &TestStep,
    static_step: Option<&PickleStep>,
    index: usize,
    originates_from_step: &[bool],
    registry: &DefinitionRegistry,
) -> PlanSlot {
    let definition_id = slot
        .hook_id
        .as_deref()
        .or_else(|| slot.step_definition_ids.first().map(String::as_str));
    let location = registry.location(definition_id);

    match static_step {
        Some(step) => PlanSlot {
            id: slot.id.clone(),
            kind: SlotKind::Step,
            static_step_id: Some(step.id.clone()),
            label: step.text.clone().unwrap_or_default(),
            argument: step.argument.as_ref().and_then(StepArgument::from_pickle),
            location,
        },
        None => PlanSlot {
            id: slot.id.clone(),
            kind: SlotKind::Hook,
            static_step_id: None,
            label: hook_label(
                slot.hook_id.as_deref().and_then(|id| registry.get(id)),
                originates_from_step,
                index,
            ),
            argument: None,
            location,
        },
    }
}

#[cfg(test)]
mod plan_tests {
    use super::*;
    use pf_core::{
        Definition, Location, PickleDocString, PickleStepArgument, SourceReference,
    };

    fn registry() -> DefinitionRegistry {
        let mut registry = DefinitionRegistry::default();
        for (id, name, line) in [("h1", None, 3), ("h2", Some("named after"), 40), ("d1", None, 7)] {
            registry.register(&Definition {
                id: id.to_string(),
                name: name.map(str::to_string),
                hook_type: None,
                source_reference: SourceReference {
                    uri: Some("steps.js".to_string()),
                    location: Some(Location { line, column: None }),
                },
            });
        }
        registry
    }

    fn slot(id: &str, pickle_step_id: Option<&str>, hook_id: Option<&str>) -> TestStep {
        TestStep {
            id: id.to_string(),
            pickle_step_id: pickle_step_id.map(str::to_string),
            hook_id: hook_id.map(str::to_string),
            step_definition_ids: if hook_id.is_some() {
                Vec::new()
            } else {
                vec!["d1".to_string()]
            },
        }
    }

    fn pickle() -> Pickle {
        Pickle {
            id: "p1".to_string(),
            steps: vec![PickleStep {
                id: "ps1".to_string(),
                text: Some("a doc string step".to_string()),
                argument: Some(PickleStepArgument {
                    data_table: None,
                    doc_string: Some(PickleDocString {
                        content: "body".to_string(),
                        media_type: None,
                    }),
                }),
                ast_node_ids: vec!["a1".to_string()],
            }],
            ..Pickle::default()
        }
    }

    #[test]
    fn build_plan_resolves_steps_and_hooks() {
        let test_case = TestCase {
            id: "tc1".to_string(),
            pickle_id: "p1".to_string(),
            test_steps: vec![
                slot("t1", None, Some("h1")),
                slot("t2", Some("ps1"), None),
                slot("t3", None, Some("h1")),
                slot("t4", None, Some("h2")),
            ],
        };
        let plan = build_plan(&test_case, Some(&pickle()), &registry()).expect("plan should build");

        assert_eq!(plan.template_id, "p1");
        let labels = plan
            .slots
            .iter()
            .map(|slot| slot.label.as_str())
            .collect::<Vec<_>>();
        assert_eq!(labels, ["Before", "a doc string step", "After", "named after"]);
        assert_eq!(plan.slots[0].location, "steps.js:3");
        assert_eq!(plan.slots[1].location, "steps.js:7");
        assert_eq!(plan.slots[1].kind, SlotKind::Step);
        assert!(matches!(
            plan.slots[1].argument,
            Some(StepArgument::DocString { .. })
        ));
        assert_eq!(plan.slots[2].argument, None);
        assert_eq!(plan.slots[2].static_step_id, None);
        assert_eq!(plan.slot_index("t3"), Some(2));
        assert_eq!(plan.slot_index("missing"), None);
    }

    #[test]
    fn unmatched_pickle_step_becomes_a_hook_slot() {
        let test_case = TestCase {
            id: "tc1".to_string(),
            pickle_id: "p1".to_string(),
            test_steps: vec![slot("t1", Some("gone"), None)],
        };
        let plan = build_plan(&test_case, Some(&pickle()), &registry()).expect("plan should build");
        assert_eq!(plan.slots[0].kind, SlotKind::Hook);
        assert_eq!(plan.slots[0].label, "Before");
        assert_eq!(plan.slots[0].location, "steps.js:7");
    }

    #[test]
    fn build_plan_without_template_is_a_protocol_violation() {
        let test_case = TestCase {
            id: "tc1".to_string(),
            pickle_id: "p1".to_string(),
            test_steps: Vec::new(),
        };
        let error = build_plan(&test_case, None, &registry()).expect_err("missing pickle should fail");
        assert!(error.is_protocol_order());
    }
}
