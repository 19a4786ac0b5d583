use std::collections::BTreeMap;

use pf_core::{GherkinDocument, Pickle};

/// Templates and source documents; both live for the whole run.
#[derive(Debug, Default)]
pub(crate) struct TemplateStore {
    pickles: BTreeMap<String, Pickle>,
    documents: BTreeMap<String, GherkinDocument>,
}

impl TemplateStore {
    pub(crate) fn store_pickle(&mut self, pickle: Pickle) {
        self.pickles.insert(pickle.id.clone(), pickle);
    }

    pub(crate) fn store_document(&mut self, document: GherkinDocument) {
        let uri = document.uri.clone().unwrap_or_default();
        self.documents.insert(uri, document);
    }

    pub(crate) fn pickle(&self, id: &str) -> Option<&Pickle> {
        self.pickles.get(id)
    }

    pub(crate) fn document_for(&self, pickle: &Pickle) -> Option<&GherkinDocument> {
        self.documents.get(pickle.uri.as_deref().unwrap_or_default())
    }
}
