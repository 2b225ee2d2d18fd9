use crate::error::NbResult;
use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};
use strum_macros::Display;

/// Monotonic time source. Substituting [`ManualClock`] makes the
/// whole session machine deterministic.
pub trait Clock {
    /// Time elapsed since an arbitrary fixed origin.
    fn now(&self) -> Duration;
}

/// Wall clock backed by `Instant`.
pub struct MonotonicClock {
    origin: Instant,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Hand-cranked clock for tests and seeded simulation. Clones share
/// the same underlying time, so a driver can advance the clock a
/// controller holds.
#[derive(Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TimerKind {
    Round,
    Countdown,
}

/// Identity of a scheduled callback. The generation is bumped by the
/// controller on every start/reset, so a timer that fires after a
/// reset carries a stale id and is discarded instead of mutating the
/// fresh session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerId {
    pub kind: TimerKind,
    pub generation: u64,
}

/// Owns the two session timers. Scheduling a kind replaces any prior
/// timer of that kind, so at most one of each is ever pending.
/// `schedule` is fallible: a host that cannot allocate a timer must
/// surface that, not swallow it.
pub trait Scheduler {
    fn schedule(&mut self, id: TimerId, due: Duration) -> NbResult<()>;
    fn cancel(&mut self, kind: TimerKind);
    fn cancel_all(&mut self);
    /// Earliest pending deadline, if any.
    fn next_due(&self) -> Option<(TimerId, Duration)>;
    /// Removes and returns one timer whose deadline has passed.
    fn pop_due(&mut self, now: Duration) -> Option<TimerId>;
}

/// In-process scheduler: two deadline slots polled by the host loop.
#[derive(Default)]
pub struct DeadlineQueue {
    slots: [Option<(TimerId, Duration)>; 2],
}

impl DeadlineQueue {
    pub fn new() -> Self {
        Self::default()
    }

    // Countdown sits in slot 0 so a tie at the session's final
    // instant ends the session instead of spawning a zero-length
    // round first.
    fn slot(kind: TimerKind) -> usize {
        match kind {
            TimerKind::Countdown => 0,
            TimerKind::Round => 1,
        }
    }
}

impl Scheduler for DeadlineQueue {
    fn schedule(&mut self, id: TimerId, due: Duration) -> NbResult<()> {
        self.slots[Self::slot(id.kind)] = Some((id, due));
        Ok(())
    }

    fn cancel(&mut self, kind: TimerKind) {
        self.slots[Self::slot(kind)] = None;
    }

    fn cancel_all(&mut self) {
        self.slots = [None, None];
    }

    fn next_due(&self) -> Option<(TimerId, Duration)> {
        self.slots
            .iter()
            .flatten()
            .copied()
            .min_by_key(|(_, due)| *due)
    }

    fn pop_due(&mut self, now: Duration) -> Option<TimerId> {
        let (idx, id) = self
            .slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.map(|(id, due)| (i, id, due)))
            .filter(|(_, _, due)| *due <= now)
            .min_by_key(|(_, _, due)| *due)
            .map(|(i, id, _)| (i, id))?;
        self.slots[idx] = None;
        Some(id)
    }
}
