//! Text and tag predicates shared by the classifier, the polling scanner and
//! selector matching.
//!
//! Host markup is inconsistent about case (`PAPER-DIALOG` vs `paper-dialog`,
//! `Yes` vs `YES`), so tag and text comparisons fold case. Folding is to
//! upper case, which maps `ς`/`σ` to one letter and expands `ß` to `SS` the
//! way CSS `text-transform: uppercase` renders it. Class lists are compared
//! literally.

/// Case-insensitive tag name equality. No trimming or other normalization.
#[must_use]
pub fn tag_name_equals(a: &str, b: &str) -> bool {
    a.to_uppercase() == b.to_uppercase()
}

/// Literal substring test against a raw class attribute.
///
/// This is not token matching: generated class lists often glue several
/// tokens together, so `"style-scope ytd-popup-container"` contains
/// `"popup-container"`.
#[must_use]
pub fn class_list_contains(class_string: &str, substring: &str) -> bool {
    class_string.contains(substring)
}

/// Returns `true` if the case-folded `text` contains any case-folded
/// candidate. An empty candidate list never matches.
#[must_use]
pub fn text_contains_any<S: AsRef<str>>(text: &str, candidates: &[S]) -> bool {
    if candidates.is_empty() {
        return false;
    }
    let folded = text.to_uppercase();
    candidates
        .iter()
        .any(|c| folded.contains(&c.as_ref().to_uppercase()))
}
