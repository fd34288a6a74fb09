mod support;

use autoconfirm::{Element, RuleSet, RuleSetBuilder};
use support::{el, experience_promo, harness};

const PHRASE: &str = "Get the best YouTube experience";

#[test]
fn scenario_d_prompt_with_label_is_dismissed() {
    let promo = experience_promo(PHRASE, Some("Not Now"));
    let h = harness(RuleSet::builtin(), el("html"));

    assert!(h.engine.try_resolve(&promo));

    let clicked = h.host.activations();
    assert_eq!(clicked.len(), 1);
    assert_eq!(clicked[0].attribute("aria-label").as_deref(), Some("Not Now"));
    assert_eq!(h.timers.pending(), 0);
    assert_eq!(h.engine.last_action(), None);
}

#[test]
fn absent_phrase_dispatches_nothing() {
    let promo = experience_promo("Try YouTube Premium", Some("Not Now"));
    let h = harness(RuleSet::builtin(), el("html"));

    assert!(!h.engine.try_resolve(&promo));
    assert!(h.host.activations().is_empty());
}

#[test]
fn missing_dismiss_label_dispatches_nothing() {
    let promo = experience_promo(PHRASE, None);
    let h = harness(RuleSet::builtin(), el("html"));

    assert!(!h.engine.try_resolve(&promo));
    assert!(h.host.activations().is_empty());
}

#[test]
fn phrase_must_match_exactly() {
    let promo = el("ytd-mealbar-promo-renderer")
        .class("ytd-popup-container")
        .child(el("span").text("Get the best YouTube experience today"))
        .child(el("button").attr("aria-label", "Not Now"));
    let h = harness(RuleSet::builtin(), el("html"));

    assert!(!h.engine.try_resolve(&promo));
}

#[test]
fn label_must_match_exactly() {
    let promo = el("ytd-mealbar-promo-renderer")
        .child(el("span").text(PHRASE))
        .child(el("button").attr("aria-label", "not now"))
        .child(el("button").attr("aria-label", "Not Now please"));
    let h = harness(RuleSet::builtin(), el("html"));

    assert!(!h.engine.try_resolve(&promo));
}

#[test]
fn only_the_labelled_control_is_clicked() {
    let not_now = el("button").attr("aria-label", "Not Now").text("Not now");
    let promo = el("div")
        .child(el("button").attr("aria-label", "Sign in").text("Sign in"))
        .child(el("span").text(PHRASE))
        .child(el("div").child(not_now.clone()))
        .child(el("button").attr("aria-label", "Learn more"));
    let h = harness(RuleSet::builtin(), el("html"));

    assert!(h.engine.try_resolve(&promo));
    assert_eq!(h.host.activations(), vec![not_now]);
}

#[test]
fn no_prompt_configured_never_resolves() {
    let rules = RuleSetBuilder::new()
        .rule("r", |r| {
            r.tags(["x-dialog"])
                .on_attribute("aria-hidden")
                .controls("button")
                .click_when_text(["OK"])
        })
        .compile()
        .unwrap();
    let h = harness(rules, el("html"));

    assert!(!h.engine.try_resolve(&experience_promo(PHRASE, Some("Not Now"))));
}

#[test]
fn custom_prompt() {
    let rules = RuleSetBuilder::new()
        .prompt(|p| {
            p.scope("x-promo")
                .phrase("Turn on notifications?")
                .dismiss_label("Dismiss")
        })
        .compile()
        .unwrap();
    let dismiss = el("x-icon-button").attr("aria-label", "Dismiss");
    let promo = el("x-promo")
        .child(el("p").text("Turn on notifications?"))
        .child(dismiss.clone());
    let h = harness(rules, el("html"));

    assert!(h.engine.try_resolve(&promo));
    assert_eq!(h.host.activations(), vec![dismiss]);
}
