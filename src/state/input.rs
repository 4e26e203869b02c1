//! Terminal input - bridges crossterm events onto the [`Ui`] controller.
//!
//! Terminal cells become points (scaled by `cell_size`), wheel notches
//! become ±1 deltas with positive meaning "toward the end of the content",
//! key codes map onto [`Key`] and printable characters also produce text
//! input.
//!
//! # Example
//!
//! ```ignore
//! let input = TerminalInput::new();
//! let mut ui = Ui::new(size, UiConfig::default(), Box::new(input.platform()))?;
//! loop {
//!     if crossterm::event::poll(Duration::from_millis(16))? {
//!         input.dispatch(&mut ui, &crossterm::event::read()?);
//!     }
//!     ui.draw(&mut backend)?;
//! }
//! ```

use std::cell::Cell;
use std::io::stdout;
use std::rc::Rc;

use crossterm::cursor::SetCursorStyle;
use crossterm::event::{
    Event as CrosstermEvent, KeyCode, KeyEvent as CrosstermKeyEvent, KeyEventKind, KeyModifiers,
    MouseButton as CrosstermMouseButton, MouseEvent as CrosstermMouseEvent, MouseEventKind,
};
use crossterm::execute;

use crate::pipeline::{Platform, Ui};
use crate::types::{CursorType, Key, Modifiers, MouseButton, Vec2, Wheel};

// =============================================================================
// CONVERSION
// =============================================================================

pub fn convert_modifiers(mods: KeyModifiers) -> Modifiers {
    let mut modifiers = Modifiers::empty();
    modifiers.set(Modifiers::SHIFT, mods.contains(KeyModifiers::SHIFT));
    modifiers.set(Modifiers::CONTROL, mods.contains(KeyModifiers::CONTROL));
    modifiers.set(Modifiers::ALT, mods.contains(KeyModifiers::ALT));
    modifiers.set(
        Modifiers::SYSTEM,
        mods.intersects(KeyModifiers::SUPER | KeyModifiers::META),
    );
    modifiers
}

pub fn convert_mouse_button(button: CrosstermMouseButton) -> MouseButton {
    match button {
        CrosstermMouseButton::Left => MouseButton::Left,
        CrosstermMouseButton::Right => MouseButton::Right,
        CrosstermMouseButton::Middle => MouseButton::Middle,
    }
}

/// Map a key code, or `None` for codes with no [`Key`] counterpart.
pub fn convert_key(code: KeyCode) -> Option<Key> {
    let key = match code {
        KeyCode::Char(ch) => match Key::from_char(ch) {
            Key::Unknown => return None,
            key => key,
        },
        KeyCode::Esc => Key::Escape,
        KeyCode::Enter => Key::Enter,
        KeyCode::Tab | KeyCode::BackTab => Key::Tab,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        KeyCode::Insert => Key::Insert,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        KeyCode::F(n) => match Key::function(n) {
            Key::Unknown => return None,
            key => key,
        },
        _ => return None,
    };
    Some(key)
}

/// Wheel axis and signed notch count of a scroll event.
pub fn scroll_delta(kind: MouseEventKind) -> Option<(Wheel, f32)> {
    match kind {
        MouseEventKind::ScrollDown => Some((Wheel::Vertical, 1.0)),
        MouseEventKind::ScrollUp => Some((Wheel::Vertical, -1.0)),
        MouseEventKind::ScrollRight => Some((Wheel::Horizontal, 1.0)),
        MouseEventKind::ScrollLeft => Some((Wheel::Horizontal, -1.0)),
        _ => None,
    }
}

pub fn convert_cursor(cursor: CursorType) -> SetCursorStyle {
    match cursor {
        CursorType::Text => SetCursorStyle::SteadyBar,
        CursorType::Wait | CursorType::ArrowWait => SetCursorStyle::BlinkingBlock,
        CursorType::Hand => SetCursorStyle::SteadyUnderScore,
        CursorType::NotAllowed => SetCursorStyle::BlinkingUnderScore,
        _ => SetCursorStyle::DefaultUserShape,
    }
}

// =============================================================================
// PLATFORM
// =============================================================================

/// Platform for a crossterm terminal.
///
/// Modifiers are the ones carried by the latest event fed through the
/// paired [`TerminalInput`].
#[derive(Debug)]
pub struct TerminalPlatform {
    modifiers: Rc<Cell<Modifiers>>,
}

impl Platform for TerminalPlatform {
    fn modifiers(&self) -> Modifiers {
        self.modifiers.get()
    }

    fn set_cursor(&mut self, cursor: CursorType) {
        if let Err(err) = execute!(stdout(), convert_cursor(cursor)) {
            tracing::debug!(%err, ?cursor, "failed to set cursor style");
        }
    }
}

// =============================================================================
// INPUT
// =============================================================================

#[derive(Debug)]
pub struct TerminalInput {
    modifiers: Rc<Cell<Modifiers>>,
    /// Size of one terminal cell in UI units.
    pub cell_size: Vec2,
    /// The terminal sends key release events (keyboard enhancement on).
    /// Without them every press is followed by a synthesized release.
    pub reports_release: bool,
}

impl Default for TerminalInput {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalInput {
    pub fn new() -> Self {
        Self {
            modifiers: Rc::new(Cell::new(Modifiers::empty())),
            cell_size: Vec2::new(1.0, 1.0),
            reports_release: false,
        }
    }

    /// A platform reading this adapter's modifier state.
    pub fn platform(&self) -> TerminalPlatform {
        TerminalPlatform {
            modifiers: self.modifiers.clone(),
        }
    }

    /// Center of a cell in UI units.
    pub fn cell_to_point(&self, column: u16, row: u16) -> Vec2 {
        Vec2::new(
            (column as f32 + 0.5) * self.cell_size.x,
            (row as f32 + 0.5) * self.cell_size.y,
        )
    }

    /// Feed one terminal event to the controller. Returns whether a node
    /// consumed it.
    pub fn dispatch(&self, ui: &mut Ui, event: &CrosstermEvent) -> bool {
        match event {
            CrosstermEvent::Mouse(mouse) => self.dispatch_mouse(ui, mouse),
            CrosstermEvent::Key(key) => self.dispatch_key(ui, key),
            CrosstermEvent::Paste(text) => {
                let mut handled = false;
                for ch in text.chars() {
                    handled |= ui.on_text_entered(ch);
                }
                handled
            }
            CrosstermEvent::Resize(columns, rows) => {
                ui.set_size(Vec2::new(
                    *columns as f32 * self.cell_size.x,
                    *rows as f32 * self.cell_size.y,
                ));
                false
            }
            _ => false,
        }
    }

    fn dispatch_mouse(&self, ui: &mut Ui, mouse: &CrosstermMouseEvent) -> bool {
        self.modifiers.set(convert_modifiers(mouse.modifiers));
        let position = self.cell_to_point(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(button) => ui.on_mouse_pressed(position, convert_mouse_button(button)),
            MouseEventKind::Up(button) => ui.on_mouse_released(position, convert_mouse_button(button)),
            MouseEventKind::Drag(_) | MouseEventKind::Moved => {
                ui.on_mouse_moved(position);
                false
            }
            kind => match scroll_delta(kind) {
                Some((wheel, delta)) => ui.on_mouse_scrolled(position, wheel, delta),
                None => false,
            },
        }
    }

    fn dispatch_key(&self, ui: &mut Ui, key: &CrosstermKeyEvent) -> bool {
        self.modifiers.set(convert_modifiers(key.modifiers));
        let mapped = convert_key(key.code);

        match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                let mut handled = mapped.is_some_and(|k| ui.on_key_pressed(k));
                if let KeyCode::Char(ch) = key.code {
                    let shortcut = key
                        .modifiers
                        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
                    if !shortcut {
                        handled |= ui.on_text_entered(ch);
                    }
                }
                if !self.reports_release {
                    if let Some(k) = mapped {
                        ui.on_key_released(k);
                    }
                }
                handled
            }
            KeyEventKind::Release => mapped.is_some_and(|k| ui.on_key_released(k)),
        }
    }
}
