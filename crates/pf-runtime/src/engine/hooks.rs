use super::registry::DefinitionRecord;

pub const BEFORE_LABEL: &str = "Before";
pub const AFTER_LABEL: &str = "After";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookPosition {
    Before,
    After,
}

impl HookPosition {
    pub fn label(self) -> &'static str {
        match self {
            Self::Before => BEFORE_LABEL,
            Self::After => AFTER_LABEL,
        }
    }

    /// Positional scan: a hook that runs after any step slot is an After hook.
    pub fn infer(originates_from_step: &[bool], index: usize) -> Self {
        let earlier = &originates_from_step[..index.min(originates_from_step.len())];
        if earlier.iter().any(|from_step| *from_step) {
            Self::After
        } else {
            Self::Before
        }
    }
}

/// Declared name, then an explicit protocol marker, then position.
pub(crate) fn hook_label(
    record: Option<&DefinitionRecord>,
    originates_from_step: &[bool],
    index: usize,
) -> String {
    if let Some(name) = record.and_then(|record| record.name.as_deref()) {
        return name.to_string();
    }
    let position = match record.and_then(|record| record.hook_type) {
        Some(hook_type) if hook_type.is_before() => HookPosition::Before,
        Some(_) => HookPosition::After,
        None => HookPosition::infer(originates_from_step, index),
    };
    position.label().to_string()
}
