//! State - interaction state owned by the [`Ui`](crate::pipeline::Ui).
//!
//! - **Mouse** - capture, hover, enter/leave, bubbling, wheel
//! - **Click** - double/triple click numbering
//! - **Keyboard** - key registry and focus routing
//! - **Focus** - focus transitions
//! - **Timer** - interval and single-shot timers
//! - **Input** - crossterm adapter and terminal platform

mod click;
mod focus;
mod input;
mod keyboard;
mod mouse;
mod timer;

pub use click::*;
pub use input::*;
pub use keyboard::*;
pub use mouse::*;
pub use timer::*;
