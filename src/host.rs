//! Capability ports the engine consumes from its host environment.
//!
//! The engine never touches a real document tree. A host supplies element
//! handles, the current navigable location, synthetic activation and timers;
//! tests supply a scripted fake of each.

use std::time::{Duration, Instant};

use crate::selector::Selector;
use crate::types::DispatchError;

/// A read-only handle to an element in the host document.
///
/// Handles are cheap to clone and may outlive the element's attachment to
/// the tree; activation of a detached handle is expected to fail with
/// [`DispatchError::Detached`].
pub trait Element: Clone {
    /// Document-order iterator over every descendant, excluding `self`.
    type Descendants: Iterator<Item = Self>;

    fn tag_name(&self) -> String;

    /// The raw `class` attribute, empty when absent.
    fn class_name(&self) -> String;

    /// Rendered text of this element and its descendants.
    fn visible_text(&self) -> String;

    fn attribute(&self, name: &str) -> Option<String>;

    fn descendants(&self) -> Self::Descendants;

    /// Lazily yield descendants matching `selector`, in document order.
    fn query_all<'s>(&self, selector: &'s Selector) -> QueryAll<'s, Self::Descendants> {
        QueryAll {
            inner: self.descendants(),
            selector,
        }
    }
}

/// Iterator returned by [`Element::query_all`].
#[derive(Debug)]
pub struct QueryAll<'s, I> {
    inner: I,
    selector: &'s Selector,
}

impl<I> Iterator for QueryAll<'_, I>
where
    I: Iterator,
    I::Item: Element,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        let selector = self.selector;
        self.inner.find(|el| selector.matches(el))
    }
}

/// The hosting page session.
pub trait Host {
    type Element: Element + 'static;

    /// Root of the whole document, used by the polling scanner.
    fn document(&self) -> Self::Element;

    /// Current navigable location. Changes on in-app navigation without a
    /// full reload.
    fn location(&self) -> String;

    /// Deliver an event indistinguishable from a genuine user activation.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError`] if the host could not deliver the event,
    /// typically because the element was detached in the meantime.
    fn activate(&self, element: &Self::Element) -> Result<(), DispatchError>;
}

/// Clock and one-shot scheduling.
pub trait Timers {
    /// Monotonic current time.
    fn now(&self) -> Instant;

    /// Run `task` once after `delay`. Fire-and-forget: there is no handle and
    /// no cancellation.
    fn schedule_once(&self, delay: Duration, task: Box<dyn FnOnce()>);
}
