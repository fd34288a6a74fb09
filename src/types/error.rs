use thiserror::Error;

use crate::selector::ParseError;

#[derive(Debug, Error)]
pub enum RuleSetError {
    #[error("duplicate rule name '{name}'")]
    DuplicateRule { name: String },

    #[error("rule '{rule}' has no trigger tag names")]
    EmptyTriggerTags { rule: String },

    #[error("rule '{rule}' has no match text; it could never select a control")]
    EmptyMatchText { rule: String },

    #[error("rule '{rule}' has an empty text entry; it would match any element")]
    EmptyTextEntry { rule: String },

    #[error("attribute-triggered rule '{rule}' has no qualifying attribute")]
    MissingQualifyingAttribute { rule: String },

    #[error("rule '{rule}' has no candidate control selector")]
    MissingControls { rule: String },

    #[error("invalid control selector in rule '{rule}': {source}")]
    InvalidSelector {
        rule: String,
        #[source]
        source: ParseError,
    },

    #[error("interrupt prompt is missing its {field}")]
    IncompletePrompt { field: &'static str },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("poll interval must be greater than zero")]
    ZeroPollInterval,

    #[error("no watched attributes configured; the change feed would never fire")]
    NoWatchedAttributes,

    #[error("rule '{rule}' qualifies on '{attribute}', which is not a watched attribute")]
    UnwatchedAttribute { rule: String, attribute: String },
}

/// Failure to synthesize an activation. Always recovered locally.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DispatchError {
    #[error("element is no longer attached to the document")]
    Detached,

    #[error("host rejected activation: {0}")]
    Rejected(String),
}
