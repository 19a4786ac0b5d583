use std::collections::BTreeMap;

use pf_core::{Definition, HookType, SourceReference};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DefinitionRecord {
    pub(crate) name: Option<String>,
    pub(crate) location: Option<String>,
    pub(crate) hook_type: Option<HookType>,
}

#[derive(Debug, Default)]
pub(crate) struct DefinitionRegistry {
    records: BTreeMap<String, DefinitionRecord>,
}

impl DefinitionRegistry {
    pub(crate) fn register(&mut self, definition: &Definition) {
        self.records.insert(
            definition.id.clone(),
            DefinitionRecord {
                name: definition.name.clone().filter(|name| !name.is_empty()),
                location: format_source_reference(&definition.source_reference),
                hook_type: definition.hook_type,
            },
        );
    }

    pub(crate) fn get(&self, id: &str) -> Option<&DefinitionRecord> {
        self.records.get(id)
    }

    /// `uri:line` of the definition, or an empty string when unresolved.
    pub(crate) fn location(&self, id: Option<&str>) -> String {
        id.and_then(|id| self.records.get(id))
            .and_then(|record| record.location.clone())
            .unwrap_or_default()
    }
}

fn format_source_reference(reference: &SourceReference) -> Option<String> {
    let uri = reference.uri.as_deref()?;
    Some(match reference.location {
        Some(location) => format!("{}:{}", uri, location.line),
        None => uri.to_string(),
    })
}
