//! Platform - window services the controller polls at dispatch time.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crate::types::{CursorType, Modifiers};

pub trait Platform {
    /// Modifier keys held right now.
    fn modifiers(&self) -> Modifiers;

    /// Change the pointer shape. Called only when the hovered node changes.
    fn set_cursor(&mut self, cursor: CursorType);

    fn now(&self) -> Instant {
        Instant::now()
    }

    /// Longest gap between the presses of a multi-click.
    fn double_click_interval(&self) -> Duration {
        Duration::from_millis(500)
    }
}

// =============================================================================
// HeadlessPlatform
// =============================================================================

/// Platform with a manual clock, for tests and offscreen use.
///
/// Clones share state, so a test can keep one handle while the [`Ui`](super::Ui)
/// owns another.
#[derive(Debug, Clone)]
pub struct HeadlessPlatform {
    modifiers: Rc<Cell<Modifiers>>,
    clock: Rc<Cell<Instant>>,
    cursor: Rc<Cell<CursorType>>,
    cursor_changes: Rc<Cell<usize>>,
}

impl Default for HeadlessPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessPlatform {
    pub fn new() -> Self {
        Self {
            modifiers: Rc::new(Cell::new(Modifiers::empty())),
            clock: Rc::new(Cell::new(Instant::now())),
            cursor: Rc::new(Cell::new(CursorType::Arrow)),
            cursor_changes: Rc::new(Cell::new(0)),
        }
    }

    pub fn set_modifiers(&self, modifiers: Modifiers) {
        self.modifiers.set(modifiers);
    }

    /// Move the clock forward.
    pub fn advance(&self, elapsed: Duration) {
        self.clock.set(self.clock.get() + elapsed);
    }

    /// Last cursor requested.
    pub fn cursor(&self) -> CursorType {
        self.cursor.get()
    }

    pub fn cursor_changes(&self) -> usize {
        self.cursor_changes.get()
    }
}

impl Platform for HeadlessPlatform {
    fn modifiers(&self) -> Modifiers {
        self.modifiers.get()
    }

    fn set_cursor(&mut self, cursor: CursorType) {
        self.cursor.set(cursor);
        self.cursor_changes.set(self.cursor_changes.get() + 1);
    }

    fn now(&self) -> Instant {
        self.clock.get()
    }
}
