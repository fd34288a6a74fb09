use thiserror::Error;

use crate::selector::ParseError;
use crate::types::{ConfigError, RuleSetError};

/// Unified error type covering selector parsing, rule set compilation and
/// engine configuration.
///
/// [`Engine::from_builder()`](crate::Engine::from_builder) returns the
/// `RuleSet` and `Config` variants; selector failures inside a rule arrive
/// wrapped in [`RuleSetError::InvalidSelector`]. The `Selector` variant
/// serves callers that parse standalone selectors with
/// `Selector::parse(..)?`.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Selector(#[from] ParseError),

    #[error(transparent)]
    RuleSet(#[from] RuleSetError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
