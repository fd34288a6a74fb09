#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use std::time::{Duration, Instant};

use autoconfirm::{
    ChangeNotification, DispatchError, Element, Engine, EngineConfig, Host, RuleSet, Timers,
};

// --- Fake DOM ---------------------------------------------------------------

struct Node {
    tag: String,
    class: RefCell<String>,
    text: RefCell<String>,
    attrs: RefCell<HashMap<String, String>>,
    children: RefCell<Vec<FakeElement>>,
    attached: Cell<bool>,
    tag_reads: Cell<usize>,
}

/// Reference-counted element handle. Equality is identity.
#[derive(Clone)]
pub struct FakeElement(Rc<Node>);

pub fn el(tag: &str) -> FakeElement {
    FakeElement(Rc::new(Node {
        tag: tag.to_owned(),
        class: RefCell::new(String::new()),
        text: RefCell::new(String::new()),
        attrs: RefCell::new(HashMap::new()),
        children: RefCell::new(Vec::new()),
        attached: Cell::new(true),
        tag_reads: Cell::new(0),
    }))
}

impl FakeElement {
    pub fn class(self, class: &str) -> Self {
        *self.0.class.borrow_mut() = class.to_owned();
        self
    }

    pub fn text(self, text: &str) -> Self {
        *self.0.text.borrow_mut() = text.to_owned();
        self
    }

    pub fn attr(self, name: &str, value: &str) -> Self {
        self.0
            .attrs
            .borrow_mut()
            .insert(name.to_owned(), value.to_owned());
        self
    }

    pub fn child(self, child: FakeElement) -> Self {
        self.0.children.borrow_mut().push(child);
        self
    }

    pub fn append(&self, child: FakeElement) {
        self.0.children.borrow_mut().push(child);
    }

    /// Mark this element and its subtree as removed from the document.
    pub fn detach(&self) {
        self.0.attached.set(false);
        for child in self.0.children.borrow().iter() {
            child.detach();
        }
    }

    pub fn is_attached(&self) -> bool {
        self.0.attached.get()
    }

    /// How many times the engine asked for this element's tag name.
    pub fn tag_reads(&self) -> usize {
        self.0.tag_reads.get()
    }

    fn collect(&self, out: &mut Vec<FakeElement>) {
        for child in self.0.children.borrow().iter() {
            out.push(child.clone());
            child.collect(out);
        }
    }
}

impl PartialEq for FakeElement {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for FakeElement {}

impl fmt::Debug for FakeElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>{:?}", self.0.tag, self.0.text.borrow())
    }
}

impl Element for FakeElement {
    type Descendants = std::vec::IntoIter<FakeElement>;

    fn tag_name(&self) -> String {
        self.0.tag_reads.set(self.0.tag_reads.get() + 1);
        self.0.tag.clone()
    }

    fn class_name(&self) -> String {
        self.0.class.borrow().clone()
    }

    fn visible_text(&self) -> String {
        let mut parts = Vec::new();
        let own = self.0.text.borrow();
        if !own.is_empty() {
            parts.push(own.clone());
        }
        for child in self.0.children.borrow().iter() {
            let text = child.visible_text();
            if !text.is_empty() {
                parts.push(text);
            }
        }
        parts.join("\n")
    }

    fn attribute(&self, name: &str) -> Option<String> {
        if name == "class" {
            return Some(self.class_name());
        }
        self.0.attrs.borrow().get(name).cloned()
    }

    fn descendants(&self) -> Self::Descendants {
        let mut out = Vec::new();
        self.collect(&mut out);
        out.into_iter()
    }
}

// --- Fake host --------------------------------------------------------------

pub struct FakeHost {
    root: FakeElement,
    location: RefCell<String>,
    activations: RefCell<Vec<FakeElement>>,
    failures: Cell<usize>,
    document_reads: Cell<usize>,
}

impl FakeHost {
    pub fn new(root: FakeElement, location: &str) -> Self {
        Self {
            root,
            location: RefCell::new(location.to_owned()),
            activations: RefCell::new(Vec::new()),
            failures: Cell::new(0),
            document_reads: Cell::new(0),
        }
    }

    pub fn navigate(&self, location: &str) {
        *self.location.borrow_mut() = location.to_owned();
    }

    /// Successfully activated elements, in order.
    pub fn activations(&self) -> Vec<FakeElement> {
        self.activations.borrow().clone()
    }

    pub fn failures(&self) -> usize {
        self.failures.get()
    }

    /// Number of whole-document scans started.
    pub fn document_reads(&self) -> usize {
        self.document_reads.get()
    }
}

impl Host for FakeHost {
    type Element = FakeElement;

    fn document(&self) -> FakeElement {
        self.document_reads.set(self.document_reads.get() + 1);
        self.root.clone()
    }

    fn location(&self) -> String {
        self.location.borrow().clone()
    }

    fn activate(&self, element: &FakeElement) -> Result<(), DispatchError> {
        if !element.is_attached() {
            self.failures.set(self.failures.get() + 1);
            return Err(DispatchError::Detached);
        }
        self.activations.borrow_mut().push(element.clone());
        Ok(())
    }
}

// --- Manual clock -----------------------------------------------------------

type Task = Box<dyn FnOnce()>;

/// Simulated clock. One-shot tasks run only when time is advanced past them.
pub struct ManualTimers {
    origin: Instant,
    offset: Cell<Duration>,
    pending: RefCell<Vec<(Duration, Task)>>,
}

impl ManualTimers {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            offset: Cell::new(Duration::ZERO),
            pending: RefCell::new(Vec::new()),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.offset.get()
    }

    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Move time forward, running due tasks in due order.
    pub fn advance(&self, by: Duration) {
        let target = self.offset.get() + by;
        loop {
            let next = {
                let mut pending = self.pending.borrow_mut();
                let earliest = pending
                    .iter()
                    .enumerate()
                    .filter(|(_, (due, _))| *due <= target)
                    .min_by_key(|(_, (due, _))| *due)
                    .map(|(i, _)| i);
                earliest.map(|i| pending.remove(i))
            };
            match next {
                Some((due, task)) => {
                    self.offset.set(due);
                    task();
                }
                None => break,
            }
        }
        self.offset.set(target);
    }
}

impl Timers for ManualTimers {
    fn now(&self) -> Instant {
        self.origin + self.offset.get()
    }

    fn schedule_once(&self, delay: Duration, task: Box<dyn FnOnce()>) {
        let due = self.offset.get() + delay;
        self.pending.borrow_mut().push((due, task));
    }
}

// --- Fixtures ---------------------------------------------------------------

pub const WATCH_URL: &str = "https://www.youtube.com/watch?v=abc";

pub struct Harness {
    pub engine: Engine<FakeHost, ManualTimers>,
    pub host: Rc<FakeHost>,
    pub timers: Rc<ManualTimers>,
}

pub fn harness(rules: RuleSet, root: FakeElement) -> Harness {
    harness_with(rules, EngineConfig::default(), root)
}

pub fn harness_with(rules: RuleSet, config: EngineConfig, root: FakeElement) -> Harness {
    init_tracing();
    let host = Rc::new(FakeHost::new(root, WATCH_URL));
    let timers = Rc::new(ManualTimers::new());
    let engine = Engine::new(rules, config, Rc::clone(&host), Rc::clone(&timers))
        .expect("valid engine config");
    Harness {
        engine,
        host,
        timers,
    }
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn button(text: &str) -> FakeElement {
    el("yt-button-renderer").text(text)
}

/// The built-in "continue watching?" dialog with the given buttons.
pub fn watching_dialog(buttons: &[&str]) -> FakeElement {
    let dialog = el("tp-yt-paper-dialog")
        .class("style-scope ytd-popup-container")
        .child(el("yt-formatted-string").text("Video paused. Continue watching?"));
    for text in buttons {
        dialog.append(button(text));
    }
    dialog
}

/// The built-in "video will pause soon" toast.
pub fn pause_toast(message: &str, buttons: &[&str]) -> FakeElement {
    let toast = el("tp-yt-paper-toast")
        .class("toast-button style-scope yt-notification-action-renderer")
        .child(el("yt-formatted-string").text(message));
    for text in buttons {
        toast.append(button(text));
    }
    toast
}

/// The built-in "best experience" promo, optionally with its dismiss button.
pub fn experience_promo(phrase: &str, label: Option<&str>) -> FakeElement {
    let promo = el("ytd-mealbar-promo-renderer")
        .class("style-scope ytd-popup-container")
        .child(el("yt-formatted-string").text(phrase))
        .child(el("button").attr("aria-label", "Learn more").text("Learn more"));
    if let Some(label) = label {
        promo.append(el("button").attr("aria-label", label).text(label));
    }
    promo
}

pub fn hidden(target: &FakeElement) -> ChangeNotification<FakeElement> {
    ChangeNotification::new(target.clone(), "aria-hidden")
}
