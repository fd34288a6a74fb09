use std::time::Duration;

use super::error::ConfigError;
use super::ruleset::RuleSet;

/// Engine tuning. Compiled in; there is no file or environment layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Minimum gap between two rate-limited dispatch initiations.
    pub debounce: Duration,
    /// How often the polling scanner checks the location.
    pub poll_interval: Duration,
    /// Attributes the change subscription reports. Keep this short: every
    /// change of a watched attribute anywhere in the tree produces a
    /// notification.
    pub watched_attributes: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(1000),
            poll_interval: Duration::from_millis(1000),
            watched_attributes: vec!["aria-hidden".to_owned()],
        }
    }
}

impl EngineConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Replace the watched attribute set.
    #[must_use]
    pub fn with_watched_attributes<I, S>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.watched_attributes = attributes.into_iter().map(Into::into).collect();
        self
    }

    /// Check the config on its own and against the rules it will drive.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if polling is disabled, nothing is watched, or
    /// an attribute-triggered rule qualifies on an unwatched attribute.
    pub fn validate(&self, rules: &RuleSet) -> Result<(), ConfigError> {
        if self.poll_interval.is_zero() {
            return Err(ConfigError::ZeroPollInterval);
        }
        if self.watched_attributes.is_empty() {
            return Err(ConfigError::NoWatchedAttributes);
        }
        for (_, rule) in rules.attribute_rules() {
            if !self.watched_attributes.contains(&rule.qualifying_attribute) {
                return Err(ConfigError::UnwatchedAttribute {
                    rule: rule.name.clone(),
                    attribute: rule.qualifying_attribute.clone(),
                });
            }
        }
        Ok(())
    }
}
