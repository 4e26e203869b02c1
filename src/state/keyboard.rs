//! Keyboard routing.
//!
//! Key and text input go to the focused node only; nothing bubbles. Whether
//! a press is a repeat is decided here from the registry of keys currently
//! down, not taken from the input source.

use crate::event::{Event, KeyEvent};
use crate::pipeline::Ui;
use crate::types::Key;

/// Which keys are currently held.
#[derive(Debug)]
pub struct KeyRegistry {
    down: [bool; Key::COUNT],
}

impl Default for KeyRegistry {
    fn default() -> Self {
        Self {
            down: [false; Key::COUNT],
        }
    }
}

impl KeyRegistry {
    /// Mark `key` down. Returns true if it already was (a repeat).
    ///
    /// `Key::Unknown` is never tracked.
    pub fn press(&mut self, key: Key) -> bool {
        if key == Key::Unknown {
            return false;
        }
        std::mem::replace(&mut self.down[key.index()], true)
    }

    pub fn release(&mut self, key: Key) {
        self.down[key.index()] = false;
    }

    pub fn is_down(&self, key: Key) -> bool {
        self.down[key.index()]
    }

    pub fn clear(&mut self) {
        self.down = [false; Key::COUNT];
    }
}

impl Ui {
    /// Returns whether the focused node consumed the press.
    pub fn on_key_pressed(&mut self, key: Key) -> bool {
        let repeat = self.keys.press(key);
        let event = Event::KeyPress(KeyEvent {
            key,
            modifiers: self.platform.modifiers(),
            repeat,
        });
        self.send_to_focus(&event)
    }

    pub fn on_key_released(&mut self, key: Key) -> bool {
        self.keys.release(key);
        let event = Event::KeyRelease(KeyEvent {
            key,
            modifiers: self.platform.modifiers(),
            repeat: false,
        });
        self.send_to_focus(&event)
    }

    /// A unicode character typed by the user.
    pub fn on_text_entered(&mut self, ch: char) -> bool {
        self.send_to_focus(&Event::Text(ch))
    }

    pub fn is_key_down(&self, key: Key) -> bool {
        self.keys.is_down(key)
    }

    fn send_to_focus(&mut self, event: &Event) -> bool {
        match self.focused {
            Some(focused) => self.tree.send_event(focused, event),
            None => false,
        }
    }
}
