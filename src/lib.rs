//! Watches a live document for transient interrupt dialogs ("are you still
//! watching?") and dismisses them by activating a matching control.
//!
//! The host environment is reached only through the ports in [`Host`],
//! [`Element`] and [`Timers`]. [`runtime::watch`] drives an [`Engine`] on a
//! tokio `LocalSet`.

mod classify;
mod compile;
mod dispatch;
mod engine;
mod error;
mod host;
mod limiter;
pub mod matcher;
mod poll;
mod resolve;
pub mod runtime;
mod selector;
mod types;

pub use engine::Engine;
pub use error::Error;
pub use host::{Element, Host, QueryAll, Timers};
pub use limiter::RateLimiter;
pub use selector::{ParseError, Selector};
pub use types::{
    BatchOutcome, ChangeNotification, Classification, ConfigError, DispatchError, DispatchPolicy,
    EngineConfig, InterruptPrompt, InterruptRule, PollOutcome, PromptBuilder, RuleBuilder,
    RuleSet, RuleSetBuilder, RuleSetError, Trigger,
};
