use std::fmt;
use std::time::Duration;

use super::error::RuleSetError;
use super::rule::{DispatchPolicy, InterruptPrompt, InterruptRule, Trigger};
use crate::selector::Selector;

/// Builder for constructing a [`RuleSet`].
///
/// Rules are evaluated in the order they are defined; the first rule that
/// yields a control wins for a given notification.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use autoconfirm::{DispatchPolicy, RuleSetBuilder};
///
/// let rules = RuleSetBuilder::new()
///     .rule("continue_watching", |r| {
///         r.tags(["tp-yt-paper-dialog"])
///             .class_contains("ytd-popup-container")
///             .on_attribute("aria-hidden")
///             .controls("yt-button-renderer")
///             .click_when_text(["YES"])
///             .policy(DispatchPolicy::delayed(Duration::from_millis(250)))
///     })
///     .compile()
///     .unwrap();
/// assert_eq!(rules.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct RuleSetBuilder {
    pub(crate) rules: Vec<RuleBuilder>,
    pub(crate) prompt: Option<PromptBuilder>,
}

/// Intermediate builder passed to the rule definition closure.
#[derive(Debug, Default)]
pub struct RuleBuilder {
    pub(crate) name: String,
    pub(crate) tags: Vec<String>,
    pub(crate) class_substring: String,
    pub(crate) attribute: Option<String>,
    pub(crate) required_text: Vec<String>,
    pub(crate) controls: Option<ControlSource>,
    pub(crate) match_text: Vec<String>,
    pub(crate) policy: DispatchPolicy,
    pub(crate) trigger: Trigger,
}

#[derive(Debug)]
pub(crate) enum ControlSource {
    Text(String),
    Selector(Selector),
}

/// Intermediate builder passed to the prompt definition closure.
#[derive(Debug, Default)]
pub struct PromptBuilder {
    pub(crate) scope: Option<String>,
    pub(crate) class_substring: String,
    pub(crate) phrase: Option<String>,
    pub(crate) dismiss_label: Option<String>,
}

impl RuleSetBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Define a rule. The closure sets the signature fields.
    #[must_use]
    pub fn rule(mut self, name: &str, f: impl FnOnce(RuleBuilder) -> RuleBuilder) -> Self {
        let builder = f(RuleBuilder {
            name: name.to_owned(),
            ..RuleBuilder::default()
        });
        self.rules.push(builder);
        self
    }

    /// Define the exact-text interrupt prompt. A later call replaces an
    /// earlier one.
    #[must_use]
    pub fn prompt(mut self, f: impl FnOnce(PromptBuilder) -> PromptBuilder) -> Self {
        self.prompt = Some(f(PromptBuilder::default()));
        self
    }

    /// Validate and compile into an immutable [`RuleSet`].
    ///
    /// # Errors
    ///
    /// Returns [`RuleSetError`] if a rule is incomplete, duplicated, or has
    /// an unparseable control selector.
    pub fn compile(self) -> Result<RuleSet, RuleSetError> {
        crate::compile::compile(self)
    }
}

impl RuleBuilder {
    /// Tag names that can carry this interrupt. Compared ignoring case.
    #[must_use]
    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Literal substring the target's class string must contain.
    #[must_use]
    pub fn class_contains(mut self, substring: &str) -> Self {
        substring.clone_into(&mut self.class_substring);
        self
    }

    /// The attribute whose change signals the interrupt became visible.
    #[must_use]
    pub fn on_attribute(mut self, attribute: &str) -> Self {
        self.attribute = Some(attribute.to_owned());
        self
    }

    /// Require the target's own text to contain one of these strings.
    #[must_use]
    pub fn text_contains<I, S>(mut self, text: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_text.extend(text.into_iter().map(Into::into));
        self
    }

    /// Selector text for candidate controls, parsed at compile time.
    #[must_use]
    pub fn controls(mut self, selector: &str) -> Self {
        self.controls = Some(ControlSource::Text(selector.to_owned()));
        self
    }

    /// Pre-built selector for candidate controls.
    #[must_use]
    pub fn control_selector(mut self, selector: Selector) -> Self {
        self.controls = Some(ControlSource::Selector(selector));
        self
    }

    /// Activate the first candidate whose text contains one of these.
    #[must_use]
    pub fn click_when_text<I, S>(mut self, text: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.match_text.extend(text.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn policy(mut self, policy: DispatchPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Only evaluate this rule from the polling scanner.
    #[must_use]
    pub fn polling_only(mut self) -> Self {
        self.trigger = Trigger::Polling;
        self
    }
}

impl PromptBuilder {
    /// Selector text for the scope element, parsed at compile time.
    #[must_use]
    pub fn scope(mut self, selector: &str) -> Self {
        self.scope = Some(selector.to_owned());
        self
    }

    #[must_use]
    pub fn class_contains(mut self, substring: &str) -> Self {
        substring.clone_into(&mut self.class_substring);
        self
    }

    /// Exact visible text identifying the prompt.
    #[must_use]
    pub fn phrase(mut self, phrase: &str) -> Self {
        self.phrase = Some(phrase.to_owned());
        self
    }

    /// Exact accessible label of the dismissal control.
    #[must_use]
    pub fn dismiss_label(mut self, label: &str) -> Self {
        self.dismiss_label = Some(label.to_owned());
        self
    }
}

/// A compiled, immutable, ordered set of interrupt signatures.
#[derive(Debug, Clone)]
pub struct RuleSet {
    pub(crate) rules: Vec<InterruptRule>,
    pub(crate) prompt: Option<InterruptPrompt>,
}

const CONTROL_TAG: &str = "yt-button-renderer";
const CONFIRM_TEXT: [&str; 2] = ["YES", "NO THANKS"];

impl RuleSet {
    /// The built-in YouTube signatures: the "continue watching?" dialog, the
    /// "video will pause soon" toast and the "best experience" promo.
    #[must_use]
    pub fn builtin() -> Self {
        let continue_watching = InterruptRule {
            name: "continue_watching".into(),
            trigger_tag_names: vec!["paper-dialog".into(), "tp-yt-paper-dialog".into()],
            required_class_substring: "ytd-popup-container".into(),
            qualifying_attribute: "aria-hidden".into(),
            required_text: Vec::new(),
            candidate_control_selector: Selector::tag(CONTROL_TAG),
            match_text: CONFIRM_TEXT.iter().map(|s| (*s).to_owned()).collect(),
            policy: DispatchPolicy::delayed(Duration::from_millis(250)),
            trigger: Trigger::AttributeChange,
        };
        // The toast is visible too briefly to wait on, and a missed click
        // must not block the dialog that follows it.
        let pause_warning = InterruptRule {
            name: "pause_warning".into(),
            trigger_tag_names: vec!["paper-toast".into(), "tp-yt-paper-toast".into()],
            required_class_substring: "yt-notification-action-renderer".into(),
            qualifying_attribute: "aria-hidden".into(),
            required_text: vec!["Still watching? Video will pause soon".into()],
            candidate_control_selector: Selector::tag(CONTROL_TAG),
            match_text: CONFIRM_TEXT.iter().map(|s| (*s).to_owned()).collect(),
            policy: DispatchPolicy::immediate(),
            trigger: Trigger::AttributeChange,
        };
        let prompt = InterruptPrompt {
            scope_selector: Selector::tag("ytd-mealbar-promo-renderer"),
            class_substring: "ytd-popup-container".into(),
            phrase: "Get the best YouTube experience".into(),
            dismiss_label: "Not Now".into(),
        };
        Self {
            rules: vec![continue_watching, pause_warning],
            prompt: Some(prompt),
        }
    }

    /// All rules in evaluation order.
    #[must_use]
    pub fn rules(&self) -> &[InterruptRule] {
        &self.rules
    }

    /// Rules evaluated by the mutation path, with their indices.
    pub fn attribute_rules(&self) -> impl Iterator<Item = (usize, &InterruptRule)> {
        self.by_trigger(Trigger::AttributeChange)
    }

    /// Rules evaluated only by the polling scanner, with their indices.
    pub fn polling_rules(&self) -> impl Iterator<Item = (usize, &InterruptRule)> {
        self.by_trigger(Trigger::Polling)
    }

    #[must_use]
    pub fn prompt(&self) -> Option<&InterruptPrompt> {
        self.prompt.as_ref()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Returns the rule names in evaluation order.
    #[must_use]
    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name.as_str()).collect()
    }

    fn by_trigger(&self, trigger: Trigger) -> impl Iterator<Item = (usize, &InterruptRule)> {
        self.rules
            .iter()
            .enumerate()
            .filter(move |(_, r)| r.trigger == trigger)
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::builtin()
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RuleSet({} attribute rules, {} polling rules, prompt: {})",
            self.attribute_rules().count(),
            self.polling_rules().count(),
            if self.prompt.is_some() { "yes" } else { "no" },
        )
    }
}
