use tracing::trace;

use crate::host::Element;
use crate::types::InterruptPrompt;

/// Find the dismissal control for an interrupt prompt inside `scope`.
///
/// Both checks are exact: some descendant's visible text must equal the
/// prompt phrase, and the control's `aria-label` must equal the dismiss
/// label. Returns the first such control in document order.
pub(crate) fn find_dismiss_control<E: Element>(prompt: &InterruptPrompt, scope: &E) -> Option<E> {
    let has_phrase = scope
        .descendants()
        .any(|el| el.visible_text() == prompt.phrase);
    if !has_phrase {
        trace!(phrase = %prompt.phrase, "prompt phrase not present");
        return None;
    }
    let control = scope.query_all(&prompt.dismiss_selector()).next();
    if control.is_none() {
        trace!(label = %prompt.dismiss_label, "prompt phrase present but no dismiss control");
    }
    control
}
