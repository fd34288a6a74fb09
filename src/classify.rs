use tracing::trace;

use crate::host::Element;
use crate::matcher::{class_list_contains, tag_name_equals, text_contains_any};
use crate::types::{ChangeNotification, Classification, InterruptPrompt, InterruptRule, RuleSet};

/// Evaluate one notification against the attribute-triggered rules, in
/// order. Pure: no dispatch, no state.
pub(crate) fn classify_notification<E: Element>(
    rules: &RuleSet,
    notification: &ChangeNotification<E>,
) -> Classification<E> {
    let target = &notification.target;
    let tag = target.tag_name();
    let mut tag_matched = false;

    for (index, rule) in rules.attribute_rules() {
        if !has_trigger_tag(rule, &tag) {
            continue;
        }
        tag_matched = true;
        if notification.attribute_name != rule.qualifying_attribute {
            continue;
        }
        if let Some(control) = select_control(rule, target) {
            return Classification::Matched {
                rule: index,
                control,
            };
        }
    }

    if !tag_matched {
        if let Some(prompt) = rules.prompt() {
            if is_prompt_scope(prompt, target) {
                return Classification::Prompt;
            }
        }
    }

    trace!(
        tag = %tag,
        class = %target.class_name(),
        attribute = %notification.attribute_name,
        "unmatched notification"
    );
    Classification::NoMatch
}

pub(crate) fn has_trigger_tag(rule: &InterruptRule, tag: &str) -> bool {
    rule.trigger_tag_names
        .iter()
        .any(|t| tag_name_equals(tag, t))
}

/// Check the target-level conditions of `rule` (class and required text,
/// not tag or attribute) and return the first candidate control whose text
/// matches.
pub(crate) fn select_control<E: Element>(rule: &InterruptRule, target: &E) -> Option<E> {
    if !class_list_contains(&target.class_name(), &rule.required_class_substring) {
        return None;
    }
    if !rule.required_text.is_empty()
        && !text_contains_any(&target.visible_text(), &rule.required_text)
    {
        trace!(rule = %rule.name, "target text did not match");
        return None;
    }
    target
        .query_all(&rule.candidate_control_selector)
        .find(|control| {
            let text = control.visible_text();
            let hit = text_contains_any(&text, &rule.match_text);
            if !hit {
                trace!(rule = %rule.name, text = %text, "skipping control");
            }
            hit
        })
}

pub(crate) fn is_prompt_scope<E: Element>(prompt: &InterruptPrompt, element: &E) -> bool {
    prompt.scope_selector.matches(element)
        && class_list_contains(&element.class_name(), &prompt.class_substring)
}
