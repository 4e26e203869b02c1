//! Timers - interval and single-shot callbacks delivered as events.
//!
//! The queue has no clock of its own; the host advances it with the time
//! elapsed since the previous call.

use std::collections::BTreeMap;
use std::time::Duration;

use crate::engine::NodeId;
use crate::event::Event;
use crate::pipeline::Ui;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Debug, Clone)]
struct Timer {
    owner: NodeId,
    interval: Duration,
    remaining: Duration,
    single_shot: bool,
}

#[derive(Debug, Default)]
pub struct TimerQueue {
    timers: BTreeMap<TimerId, Timer>,
    next_id: u64,
}

impl TimerQueue {
    pub fn start(&mut self, owner: NodeId, interval: Duration, single_shot: bool) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.insert(
            id,
            Timer {
                owner,
                interval,
                remaining: interval,
                single_shot,
            },
        );
        id
    }

    /// Returns false if the timer was not running.
    pub fn stop(&mut self, id: TimerId) -> bool {
        self.timers.remove(&id).is_some()
    }

    /// Start the current interval over. Returns false if the timer is not
    /// running.
    pub fn restart(&mut self, id: TimerId) -> bool {
        match self.timers.get_mut(&id) {
            Some(timer) => {
                timer.remaining = timer.interval;
                true
            }
            None => false,
        }
    }

    pub fn is_active(&self, id: TimerId) -> bool {
        self.timers.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Advance every timer and return the ones that fired, oldest first.
    ///
    /// A timer fires at most once per call; overshoot carries into its next
    /// interval. Single-shot timers are removed when they fire.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<(TimerId, NodeId)> {
        let mut fired = Vec::new();
        self.timers.retain(|&id, timer| {
            if elapsed < timer.remaining {
                timer.remaining -= elapsed;
                return true;
            }
            fired.push((id, timer.owner));
            if timer.single_shot {
                return false;
            }
            let overshoot = elapsed - timer.remaining;
            timer.remaining = if timer.interval.is_zero() {
                Duration::ZERO
            } else {
                let into_next = Duration::from_nanos(
                    (overshoot.as_nanos() % timer.interval.as_nanos()) as u64,
                );
                timer.interval - into_next
            };
            true
        });
        fired
    }
}

impl Ui {
    /// Deliver [`Event::Timer`] to `owner` every `interval` (or once).
    pub fn start_timer(&mut self, owner: NodeId, interval: Duration, single_shot: bool) -> TimerId {
        let id = self.timers.start(owner, interval, single_shot);
        tracing::debug!(timer = ?id, node = ?owner, ?interval, single_shot, "timer started");
        id
    }

    pub fn stop_timer(&mut self, id: TimerId) -> bool {
        self.timers.stop(id)
    }

    pub fn restart_timer(&mut self, id: TimerId) -> bool {
        self.timers.restart(id)
    }

    /// Move timers forward and dispatch the ones that fired. Returns how many
    /// fired.
    pub fn advance_timers(&mut self, elapsed: Duration) -> usize {
        let fired = self.timers.advance(elapsed);
        for &(id, owner) in &fired {
            if self.tree.node(owner).is_some() {
                self.tree.send_event(owner, &Event::Timer(id));
            } else {
                self.timers.stop(id);
            }
        }
        fired.len()
    }
}
