use std::rc::Rc;
use std::time::Instant;

use tracing::debug;

use crate::classify::{classify_notification, has_trigger_tag, is_prompt_scope, select_control};
use crate::dispatch::Dispatcher;
use crate::host::{Element, Host, Timers};
use crate::limiter::RateLimiter;
use crate::poll::PollingScanner;
use crate::resolve::find_dismiss_control;
use crate::types::{
    BatchOutcome, ChangeNotification, Classification, ConfigError, EngineConfig, PollOutcome,
    RuleSet, RuleSetBuilder,
};

/// The interrupt detection and dismissal engine.
///
/// Owns the rule set, the rate limiter and the polling location. All entry
/// points take `&mut self`; the host is expected to call them from a single
/// event queue, one callback at a time.
pub struct Engine<H, T> {
    rules: RuleSet,
    config: EngineConfig,
    dispatcher: Dispatcher<H, T>,
    limiter: RateLimiter,
    scanner: PollingScanner,
}

impl<H, T> Engine<H, T>
where
    H: Host + 'static,
    T: Timers,
{
    /// Create an engine. The polling location starts at the host's current
    /// location.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `config` is invalid for `rules`.
    pub fn new(
        rules: RuleSet,
        config: EngineConfig,
        host: Rc<H>,
        timers: Rc<T>,
    ) -> Result<Self, ConfigError> {
        config.validate(&rules)?;
        let scanner = PollingScanner::new(host.location());
        let limiter = RateLimiter::new(config.debounce);
        debug!(%rules, location = scanner.location(), "engine created");
        Ok(Self {
            rules,
            config,
            dispatcher: Dispatcher::new(host, timers),
            limiter,
            scanner,
        })
    }

    /// Compile `builder` and create an engine from it.
    ///
    /// # Errors
    ///
    /// Returns [`Error`](crate::Error) on rule set or config failure.
    pub fn from_builder(
        builder: RuleSetBuilder,
        config: EngineConfig,
        host: Rc<H>,
        timers: Rc<T>,
    ) -> Result<Self, crate::Error> {
        let rules = builder.compile()?;
        Ok(Self::new(rules, config, host, timers)?)
    }

    /// Classify one batch of change notifications.
    ///
    /// The whole batch is dropped if the debounce window has not elapsed.
    /// Otherwise notifications are examined in delivery order and the first
    /// one that leads to an activation ends the batch.
    pub fn classify(&mut self, batch: &[ChangeNotification<H::Element>]) -> BatchOutcome {
        let now = self.dispatcher.timers().now();
        if !self.limiter.try_consume(now) {
            debug!(len = batch.len(), "batch throttled");
            return BatchOutcome::Throttled;
        }

        for (position, notification) in batch.iter().enumerate() {
            match classify_notification(&self.rules, notification) {
                Classification::NoMatch => {}
                Classification::Matched { rule, control } => {
                    let rule = &self.rules.rules()[rule];
                    debug!(
                        rule = %rule.name,
                        position,
                        control = %control.visible_text(),
                        "matched interrupt"
                    );
                    self.dispatcher
                        .dispatch(control, rule.policy, &mut self.limiter);
                    return BatchOutcome::Dispatched {
                        rule: rule.name.clone(),
                        position,
                    };
                }
                Classification::Prompt => {
                    if self.try_resolve(&notification.target) {
                        return BatchOutcome::Resolved { position };
                    }
                }
            }
        }
        BatchOutcome::Consumed
    }

    /// Evaluate a single notification without dispatching anything.
    pub fn classify_notification(
        &self,
        notification: &ChangeNotification<H::Element>,
    ) -> Classification<H::Element> {
        classify_notification(&self.rules, notification)
    }

    /// Dismiss the interrupt prompt inside `scope`, if present.
    ///
    /// Activates immediately and leaves the rate limiter untouched. Returns
    /// `false` when no prompt is configured, the phrase is absent, or the
    /// dismiss control is missing.
    pub fn try_resolve(&self, scope: &H::Element) -> bool {
        let Some(prompt) = self.rules.prompt() else {
            return false;
        };
        match find_dismiss_control(prompt, scope) {
            Some(control) => {
                debug!(label = %prompt.dismiss_label, "dismissing interrupt prompt");
                self.dispatcher.activate_now(&control);
                true
            }
            None => false,
        }
    }

    /// One polling tick.
    ///
    /// Does nothing while the location matches the last successful scan.
    /// After a navigation, scans the document for prompt scopes and then
    /// for polling-only rules; the new location is recorded only when
    /// something was dismissed.
    pub fn poll(&mut self) -> PollOutcome {
        let current = self.dispatcher.host().location();
        if !self.scanner.has_changed(&current) {
            return PollOutcome::Unchanged;
        }
        debug!(from = self.scanner.location(), to = %current, "location changed; scanning");
        if self.scan_document() {
            self.scanner.commit(current);
            PollOutcome::Resolved
        } else {
            debug!("scan found nothing; will retry");
            PollOutcome::Pending
        }
    }

    fn scan_document(&mut self) -> bool {
        let root = self.dispatcher.host().document();

        if let Some(prompt) = self.rules.prompt() {
            for scope in root.query_all(&prompt.scope_selector) {
                if is_prompt_scope(prompt, &scope) && self.try_resolve(&scope) {
                    return true;
                }
            }
        }

        for (_, rule) in self.rules.polling_rules() {
            let hit = root
                .descendants()
                .filter(|el| has_trigger_tag(rule, &el.tag_name()))
                .find_map(|target| select_control(rule, &target));
            if let Some(control) = hit {
                debug!(rule = %rule.name, "polling matched interrupt");
                self.dispatcher
                    .dispatch(control, rule.policy, &mut self.limiter);
                return true;
            }
        }
        false
    }

    #[must_use]
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Attributes the host's change subscription must report.
    #[must_use]
    pub fn watched_attributes(&self) -> &[String] {
        &self.config.watched_attributes
    }

    /// Initiation time of the last rate-limited dispatch.
    #[must_use]
    pub fn last_action(&self) -> Option<Instant> {
        self.limiter.last_consumed()
    }

    /// Location recorded by the last successful polling scan.
    #[must_use]
    pub fn session_location(&self) -> &str {
        self.scanner.location()
    }
}
