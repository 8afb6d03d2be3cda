//! crates/fw_core/src/notify.rs
//! Operator notification seam. Front ends inject their own implementation:
//! the command line logs, an interactive shell might raise a dialog.

use core::cell::RefCell;

pub trait Notifier {
    /// Something the operator should know about; the run continues.
    fn warn(&self, msg: &str);
    /// A failure the operator must see (per-question failures included).
    fn fail(&self, msg: &str);
}

/// Explicit per-invocation context handed to every entry point.
pub struct RunContext<'a> {
    pub notifier: &'a dyn Notifier,
}

impl<'a> RunContext<'a> {
    pub fn new(notifier: &'a dyn Notifier) -> Self {
        Self { notifier }
    }
}

/// Notifier that keeps every message. Useful for tests and dry runs.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    warnings: RefCell<Vec<String>>,
    failures: RefCell<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.warnings.borrow().clone()
    }

    pub fn failures(&self) -> Vec<String> {
        self.failures.borrow().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn warn(&self, msg: &str) {
        self.warnings.borrow_mut().push(msg.to_owned());
    }

    fn fail(&self, msg: &str) {
        self.failures.borrow_mut().push(msg.to_owned());
    }
}
