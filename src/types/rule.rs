use std::time::Duration;

use crate::selector::Selector;

/// Which detection path evaluates a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Trigger {
    /// Mutation path. The changed attribute must equal the rule's qualifying
    /// attribute.
    #[default]
    AttributeChange,
    /// Polling path only. There is no attribute-change context, so the
    /// qualifying attribute is not checked.
    Polling,
}

/// How a matched control is activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchPolicy {
    /// Wait this long before activating. Zero activates synchronously.
    pub delay: Duration,
    /// Record the dispatch in the rate limiter at initiation time.
    pub updates_rate_limit: bool,
}

impl DispatchPolicy {
    /// Delayed activation that updates the rate limiter.
    #[must_use]
    pub const fn delayed(delay: Duration) -> Self {
        Self {
            delay,
            updates_rate_limit: true,
        }
    }

    /// Zero-delay activation that leaves the rate limiter untouched.
    #[must_use]
    pub const fn immediate() -> Self {
        Self {
            delay: Duration::ZERO,
            updates_rate_limit: false,
        }
    }

    #[must_use]
    pub const fn with_rate_limit(mut self, updates: bool) -> Self {
        self.updates_rate_limit = updates;
        self
    }
}

impl Default for DispatchPolicy {
    fn default() -> Self {
        Self::delayed(Duration::from_millis(250))
    }
}

/// One interrupt signature.
///
/// A target qualifies when its tag is one of `trigger_tag_names`, its class
/// string contains `required_class_substring`, its visible text contains one
/// of `required_text` (if any are given) and, for
/// [`Trigger::AttributeChange`] rules, the changed attribute is
/// `qualifying_attribute`. The first descendant matching
/// `candidate_control_selector` whose text contains any of `match_text` is
/// the control to activate.
#[derive(Debug, Clone)]
pub struct InterruptRule {
    pub name: String,
    pub trigger_tag_names: Vec<String>,
    pub required_class_substring: String,
    pub qualifying_attribute: String,
    pub required_text: Vec<String>,
    pub candidate_control_selector: Selector,
    pub match_text: Vec<String>,
    pub policy: DispatchPolicy,
    pub trigger: Trigger,
}

/// The "best experience" promo signature handled by
/// [`Engine::try_resolve`](crate::Engine::try_resolve).
///
/// Unlike [`InterruptRule`], it is resolved by exact text and exact
/// accessible label rather than substring matching, and it never touches
/// the rate limiter.
#[derive(Debug, Clone)]
pub struct InterruptPrompt {
    pub scope_selector: Selector,
    pub class_substring: String,
    pub phrase: String,
    pub dismiss_label: String,
}

impl InterruptPrompt {
    /// Selector for the dismissal control: any element whose `aria-label`
    /// equals the dismiss label.
    #[must_use]
    pub fn dismiss_selector(&self) -> Selector {
        Selector::any().with_attribute_eq("aria-label", self.dismiss_label.clone())
    }
}
