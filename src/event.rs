//! Events - the closed set of notifications a node can receive.
//!
//! Input events carry their position both in the receiver's local space and
//! in window space. Bubbling rewrites `local` as the event moves up.

use std::rc::Rc;

use crate::engine::NodeId;
use crate::state::TimerId;
use crate::theme::Style;
use crate::types::{Key, Modifiers, MouseButton, MouseButtons, Vec2};

// =============================================================================
// PAYLOADS
// =============================================================================

/// Mouse button press or release.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseButtonEvent {
    pub local: Vec2,
    pub global: Vec2,
    pub button: MouseButton,
    /// Buttons held after this event was applied.
    pub buttons: MouseButtons,
    pub modifiers: Modifiers,
    /// 0 for a single click, 1 for double, 2 for triple... Always 0 on release.
    pub click_index: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseMoveEvent {
    pub local: Vec2,
    pub global: Vec2,
    pub buttons: MouseButtons,
    pub modifiers: Modifiers,
}

/// Wheel scroll. Positive deltas scroll toward the end of the content
/// (down on `y`, right on `x`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseScrollEvent {
    pub local: Vec2,
    pub global: Vec2,
    pub delta: Vec2,
    pub buttons: MouseButtons,
    pub modifiers: Modifiers,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
    /// The key was already down when this press arrived.
    pub repeat: bool,
}

// =============================================================================
// EVENT
// =============================================================================

#[derive(Debug, Clone)]
pub enum Event {
    MousePress(MouseButtonEvent),
    MouseRelease(MouseButtonEvent),
    MouseMove(MouseMoveEvent),
    MouseScroll(MouseScrollEvent),
    KeyPress(KeyEvent),
    KeyRelease(KeyEvent),
    Text(char),
    StyleChange {
        old: Option<Rc<Style>>,
        new: Option<Rc<Style>>,
    },
    ParentChange {
        old: Option<NodeId>,
        new: Option<NodeId>,
    },
    ChildAdd {
        child: NodeId,
    },
    LayoutChange,
    ChildrenLayoutChange,
    Enter,
    Leave,
    Hover,
    Unhover,
    Focus,
    Unfocus,
    Timer(TimerId),
}

impl Event {
    /// Short variant name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Event::MousePress(_) => "mouse-press",
            Event::MouseRelease(_) => "mouse-release",
            Event::MouseMove(_) => "mouse-move",
            Event::MouseScroll(_) => "mouse-scroll",
            Event::KeyPress(_) => "key-press",
            Event::KeyRelease(_) => "key-release",
            Event::Text(_) => "text",
            Event::StyleChange { .. } => "style-change",
            Event::ParentChange { .. } => "parent-change",
            Event::ChildAdd { .. } => "child-add",
            Event::LayoutChange => "layout-change",
            Event::ChildrenLayoutChange => "children-layout-change",
            Event::Enter => "enter",
            Event::Leave => "leave",
            Event::Hover => "hover",
            Event::Unhover => "unhover",
            Event::Focus => "focus",
            Event::Unfocus => "unfocus",
            Event::Timer(_) => "timer",
        }
    }

    /// Receiver-local position of mouse events.
    pub fn local_position(&self) -> Option<Vec2> {
        match self {
            Event::MousePress(e) | Event::MouseRelease(e) => Some(e.local),
            Event::MouseMove(e) => Some(e.local),
            Event::MouseScroll(e) => Some(e.local),
            _ => None,
        }
    }

    /// Shift the local position of a mouse event; other events are untouched.
    pub fn translate(&mut self, offset: Vec2) {
        match self {
            Event::MousePress(e) | Event::MouseRelease(e) => e.local += offset,
            Event::MouseMove(e) => e.local += offset,
            Event::MouseScroll(e) => e.local += offset,
            _ => {}
        }
    }
}

/// What a node answers when its behavior does not handle an event.
///
/// Pointer presses, releases and moves are consumed so the node captures the
/// mouse. Scrolls and keyboard input fall through to ancestors.
pub fn default_response(event: &Event) -> bool {
    match event {
        Event::MousePress(_) | Event::MouseRelease(_) | Event::MouseMove(_) => true,
        Event::MouseScroll(_) => false,
        Event::KeyPress(_) | Event::KeyRelease(_) | Event::Text(_) => false,
        Event::Hover | Event::Unhover | Event::Focus | Event::Unfocus => true,
        Event::StyleChange { .. }
        | Event::ParentChange { .. }
        | Event::ChildAdd { .. }
        | Event::LayoutChange
        | Event::ChildrenLayoutChange
        | Event::Enter
        | Event::Leave
        | Event::Timer(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press_at(local: Vec2) -> Event {
        Event::MousePress(MouseButtonEvent {
            local,
            global: local,
            button: MouseButton::Left,
            buttons: MouseButtons::LEFT,
            modifiers: Modifiers::empty(),
            click_index: 0,
        })
    }

    #[test]
    fn test_default_responses() {
        assert!(default_response(&press_at(Vec2::ZERO)));
        assert!(default_response(&Event::Hover));
        assert!(!default_response(&Event::Text('x')));
        assert!(!default_response(&Event::MouseScroll(MouseScrollEvent {
            local: Vec2::ZERO,
            global: Vec2::ZERO,
            delta: Vec2::new(0.0, 1.0),
            buttons: MouseButtons::empty(),
            modifiers: Modifiers::empty(),
        })));
    }

    #[test]
    fn test_translate_only_moves_local() {
        let mut event = press_at(Vec2::new(1.0, 2.0));
        event.translate(Vec2::new(10.0, 20.0));
        let Event::MousePress(e) = event else {
            panic!("variant changed");
        };
        assert_eq!(e.local, Vec2::new(11.0, 22.0));
        assert_eq!(e.global, Vec2::new(1.0, 2.0));

        let mut focus = Event::Focus;
        focus.translate(Vec2::new(5.0, 5.0));
        assert_eq!(focus.local_position(), None);
    }
}
