use pf_core::{Envelope, ReportError, ReportOutput};
use tracing::debug;

use super::lifecycle::ReportEngine;

impl ReportEngine {
    /// Routes one envelope to exactly one handler. Envelopes must be fed in
    /// arrival order; nothing here is deferred.
    pub fn handle_envelope(&mut self, envelope: Envelope) -> Result<Option<ReportOutput>, ReportError> {
        debug!(kind = envelope.kind_name(), "dispatching envelope");

        if let Some(definition) = envelope.step_definition.as_ref().or(envelope.hook.as_ref()) {
            self.on_definition(definition);
            return Ok(None);
        }
        if let Some(document) = envelope.gherkin_document {
            self.on_document(document);
            return Ok(None);
        }
        if let Some(pickle) = envelope.pickle {
            self.on_compiled(pickle);
            return Ok(None);
        }
        if let Some(test_case) = &envelope.test_case {
            self.on_prepared(test_case)?;
            return Ok(None);
        }
        if let Some(started) = &envelope.test_case_started {
            self.on_attempt_started(started)?;
            return Ok(None);
        }
        if let Some(finished) = envelope.test_step_finished {
            self.on_step_finished(finished)?;
            return Ok(None);
        }
        if let Some(attachment) = envelope.attachment {
            self.on_attachment(attachment)?;
            return Ok(None);
        }
        if let Some(finished) = &envelope.test_case_finished {
            return self.on_attempt_finished(finished);
        }
        if let Some(started) = &envelope.test_run_started {
            self.on_run_started(started);
            return Ok(None);
        }
        if let Some(finished) = &envelope.test_run_finished {
            return Ok(Some(self.on_run_finished(finished)));
        }
        Ok(None)
    }
}
