//! Deferred phase transitions.
//!
//! Timers are plain data: the owner polls `take_due` from its tick. Each one
//! carries the generation it was scheduled in so a fire that outlives a
//! teardown can be recognised and dropped.

use fnv::FnvHashMap;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TimerKind {
    BeginTravel,
    Arrive,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Deferred {
    pub kind: TimerKind,
    /// Clock time in seconds at which the timer is due.
    pub due: f64,
    pub generation: u64,
}

#[derive(Default, Debug)]
pub struct TimerQueue {
    pending: FnvHashMap<TimerKind, Deferred>,
}

impl TimerQueue {
    /// Schedule `timer`, replacing any pending timer of the same kind.
    pub fn schedule(&mut self, timer: Deferred) {
        self.pending.insert(timer.kind, timer);
    }

    pub fn cancel(&mut self, kind: TimerKind) -> Option<Deferred> {
        self.pending.remove(&kind)
    }

    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    pub fn get(&self, kind: TimerKind) -> Option<&Deferred> {
        self.pending.get(&kind)
    }

    /// Remove and return every timer due at `now`, earliest first.
    pub fn take_due(&mut self, now: f64) -> SmallVec<[Deferred; 2]> {
        let mut due: SmallVec<[Deferred; 2]> = self
            .pending
            .values()
            .filter(|t| t.due <= now)
            .copied()
            .collect();
        due.sort_by(|a, b| a.due.total_cmp(&b.due));
        for t in &due {
            self.pending.remove(&t.kind);
        }
        due
    }

    pub fn iter(&self) -> impl Iterator<Item = &Deferred> {
        self.pending.values()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
