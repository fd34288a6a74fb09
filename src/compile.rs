use std::collections::HashSet;

use crate::types::{
    ControlSource, InterruptPrompt, InterruptRule, PromptBuilder, RuleBuilder, RuleSet,
    RuleSetBuilder, RuleSetError, Trigger,
};
use crate::Selector;

pub(crate) fn compile(builder: RuleSetBuilder) -> Result<RuleSet, RuleSetError> {
    check_duplicates(&builder.rules)?;

    let rules = builder
        .rules
        .into_iter()
        .map(compile_rule)
        .collect::<Result<Vec<_>, _>>()?;

    let prompt = builder.prompt.map(compile_prompt).transpose()?;

    Ok(RuleSet { rules, prompt })
}

fn check_duplicates(rules: &[RuleBuilder]) -> Result<(), RuleSetError> {
    let mut seen = HashSet::new();
    for rule in rules {
        if !seen.insert(rule.name.as_str()) {
            return Err(RuleSetError::DuplicateRule {
                name: rule.name.clone(),
            });
        }
    }
    Ok(())
}

fn compile_rule(rule: RuleBuilder) -> Result<InterruptRule, RuleSetError> {
    if rule.tags.is_empty() {
        return Err(RuleSetError::EmptyTriggerTags { rule: rule.name });
    }
    if rule.match_text.is_empty() {
        return Err(RuleSetError::EmptyMatchText { rule: rule.name });
    }
    if rule
        .match_text
        .iter()
        .chain(&rule.required_text)
        .any(String::is_empty)
    {
        return Err(RuleSetError::EmptyTextEntry { rule: rule.name });
    }

    let qualifying_attribute = match (rule.trigger, rule.attribute) {
        (_, Some(attribute)) => attribute,
        (Trigger::Polling, None) => String::new(),
        (Trigger::AttributeChange, None) => {
            return Err(RuleSetError::MissingQualifyingAttribute { rule: rule.name });
        }
    };

    let candidate_control_selector = match rule.controls {
        Some(ControlSource::Selector(selector)) => selector,
        Some(ControlSource::Text(text)) => match Selector::parse(&text) {
            Ok(selector) => selector,
            Err(source) => {
                return Err(RuleSetError::InvalidSelector {
                    rule: rule.name,
                    source,
                });
            }
        },
        None => return Err(RuleSetError::MissingControls { rule: rule.name }),
    };

    Ok(InterruptRule {
        name: rule.name,
        trigger_tag_names: rule.tags,
        required_class_substring: rule.class_substring,
        qualifying_attribute,
        required_text: rule.required_text,
        candidate_control_selector,
        match_text: rule.match_text,
        policy: rule.policy,
        trigger: rule.trigger,
    })
}

fn compile_prompt(prompt: PromptBuilder) -> Result<InterruptPrompt, RuleSetError> {
    let scope = prompt
        .scope
        .ok_or(RuleSetError::IncompletePrompt { field: "scope" })?;
    let scope_selector = Selector::parse(&scope).map_err(|source| RuleSetError::InvalidSelector {
        rule: "prompt".into(),
        source,
    })?;
    let phrase = prompt
        .phrase
        .ok_or(RuleSetError::IncompletePrompt { field: "phrase" })?;
    let dismiss_label = prompt
        .dismiss_label
        .ok_or(RuleSetError::IncompletePrompt {
            field: "dismiss label",
        })?;
    Ok(InterruptPrompt {
        scope_selector,
        class_substring: prompt.class_substring,
        phrase,
        dismiss_label,
    })
}
