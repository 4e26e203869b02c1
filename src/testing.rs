//! Shared test fixtures.

use std::cell::RefCell;
use std::rc::Rc;

use crate::engine::{Behavior, EventCx, Tree};
use crate::event::{Event, default_response};
use crate::types::Vec2;

pub type ProbeLog = Rc<RefCell<Vec<String>>>;

pub fn probe_log() -> ProbeLog {
    Rc::new(RefCell::new(Vec::new()))
}

/// Behavior logging every event it receives as `"label:event-name"`.
pub struct Probe {
    label: String,
    log: ProbeLog,
    /// Leave pointer presses, releases and moves unconsumed.
    pass_through: bool,
}

impl Probe {
    pub fn new(label: &str, log: &ProbeLog) -> Self {
        Self {
            label: label.to_string(),
            log: log.clone(),
            pass_through: false,
        }
    }

    pub fn pass_through(label: &str, log: &ProbeLog) -> Self {
        Self {
            pass_through: true,
            ..Self::new(label, log)
        }
    }
}

impl Behavior for Probe {
    fn handle_event(&mut self, _cx: &mut EventCx<'_>, event: &Event) -> bool {
        self.log
            .borrow_mut()
            .push(format!("{}:{}", self.label, event.name()));
        match event {
            Event::MousePress(_) | Event::MouseRelease(_) | Event::MouseMove(_)
                if self.pass_through =>
            {
                false
            }
            _ => default_response(event),
        }
    }
}

/// Entries of `log` whose event name is one of `names`.
pub fn filtered(log: &ProbeLog, names: &[&str]) -> Vec<String> {
    log.borrow()
        .iter()
        .filter(|entry| {
            entry
                .rsplit(':')
                .next()
                .is_some_and(|name| names.contains(&name))
        })
        .cloned()
        .collect()
}

/// Run solve / update / notify until nothing moves.
///
/// # Panics
///
/// If the tree does not settle within 32 passes.
pub fn settle(tree: &mut Tree, available: Vec2) {
    for _ in 0..32 {
        tree.compute_layout(available).unwrap();
        let root = tree.root();
        let changed = tree.update_layout(root, Vec2::ZERO).unwrap();
        tree.notify_layout_changes(root);
        if !changed {
            return;
        }
    }
    panic!("layout did not settle");
}
