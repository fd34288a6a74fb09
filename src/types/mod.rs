mod config;
mod error;
mod notification;
mod outcome;
mod rule;
mod ruleset;

pub use config::EngineConfig;
pub use error::{ConfigError, DispatchError, RuleSetError};
pub use notification::ChangeNotification;
pub use outcome::{BatchOutcome, Classification, PollOutcome};
pub use rule::{DispatchPolicy, InterruptPrompt, InterruptRule, Trigger};
pub use ruleset::{PromptBuilder, RuleBuilder, RuleSet, RuleSetBuilder};
pub(crate) use ruleset::ControlSource;
