use pf_core::{AstStep, FeatureChild, GherkinDocument, Pickle, PickleStep};

/// Recovers `uri:line ` of a pickle step from the document AST, or "".
pub(crate) fn gherkin_location(
    step: &PickleStep,
    pickle: &Pickle,
    document: Option<&GherkinDocument>,
) -> String {
    let (Some(document), Some(ast_node_id)) = (document, step.ast_node_ids.first()) else {
        return String::new();
    };
    let Some(feature) = &document.feature else {
        return String::new();
    };

    let scenario_ast_id = pickle.ast_node_ids.first().map(String::as_str).unwrap_or_default();
    let sources = step_sources(&feature.children, scenario_ast_id)
        .unwrap_or_else(|| backgrounds(&feature.children));

    let Some(source) = sources
        .into_iter()
        .flatten()
        .find(|source| &source.id == ast_node_id)
    else {
        return String::new();
    };

    let uri = document
        .uri
        .as_deref()
        .or(pickle.uri.as_deref())
        .unwrap_or_default();
    format!("{}:{} ", uri, source.location.line)
}

/// Step lists visible to the scenario: its own steps, then every background
/// on the path from the scenario up to the feature.
fn step_sources<'a>(children: &'a [FeatureChild], scenario_ast_id: &str) -> Option<Vec<&'a [AstStep]>> {
    for child in children {
        if let Some(scenario) = &child.scenario {
            if scenario.id == scenario_ast_id {
                let mut sources = vec![scenario.steps.as_slice()];
                sources.extend(backgrounds(children));
                return Some(sources);
            }
        }
        if let Some(rule) = &child.rule {
            if let Some(mut sources) = step_sources(&rule.children, scenario_ast_id) {
                sources.extend(backgrounds(children));
                return Some(sources);
            }
        }
    }
    None
}

fn backgrounds(children: &[FeatureChild]) -> Vec<&[AstStep]> {
    children
        .iter()
        .filter_map(|child| child.background.as_ref())
        .map(|background| background.steps.as_slice())
        .collect()
}
