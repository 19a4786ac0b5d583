use pf_core::AttachmentRecord;

/// Splits into `(logs, everything else)`, keeping arrival order in both.
pub fn split_logs(attachments: Vec<AttachmentRecord>) -> (Vec<AttachmentRecord>, Vec<AttachmentRecord>) {
    attachments.into_iter().partition(AttachmentRecord::is_log)
}
