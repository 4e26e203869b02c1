//! Multi-click detection.

use std::time::{Duration, Instant};

use crate::types::{MouseButton, Vec2};

/// Tracks consecutive left presses to number double and triple clicks.
#[derive(Debug, Default)]
pub struct ClickTracker {
    last: Option<(Vec2, Instant)>,
    index: u32,
}

impl ClickTracker {
    /// Record a press and return its click index.
    ///
    /// A left press close to the previous one in time (within `interval`) and
    /// space (within `distance` on each axis) continues the sequence. Any
    /// other press starts over at 0.
    pub fn register(
        &mut self,
        button: MouseButton,
        position: Vec2,
        now: Instant,
        interval: Duration,
        distance: f32,
    ) -> u32 {
        if button != MouseButton::Left {
            self.reset();
            return 0;
        }

        let continues = self.last.is_some_and(|(last_position, last_time)| {
            let moved = (position - last_position).abs();
            now.saturating_duration_since(last_time) <= interval
                && moved.x <= distance
                && moved.y <= distance
        });
        self.index = if continues { self.index + 1 } else { 0 };
        self.last = Some((position, now));
        self.index
    }

    pub fn reset(&mut self) {
        self.last = None;
        self.index = 0;
    }
}
