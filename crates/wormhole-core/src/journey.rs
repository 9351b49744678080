//! The journey state machine: Idle → Clicked → Traveling → Arrived.
//!
//! Every transition returns the side effects it implies as `JourneyEvent`s;
//! the scene applies them to the entry object, camera, orbit rig, particle
//! fields and overlay. Nothing here is reversible except a full `reset`.

use crate::constants::{ARRIVAL_PROGRESS, CLICK_TO_TRAVEL_SECS, TRAVEL_DURATION_SECS};
use crate::timer::{Deferred, TimerKind, TimerQueue};
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum JourneyPhase {
    #[default]
    Idle,
    Clicked,
    Traveling,
    Arrived,
}

impl JourneyPhase {
    /// Converging particles stop once the camera is moving.
    pub fn freezes_convergence(self) -> bool {
        matches!(self, JourneyPhase::Traveling | JourneyPhase::Arrived)
    }

    /// Whether the free orbit rig may write the camera.
    pub fn orbit_enabled(self) -> bool {
        matches!(self, JourneyPhase::Idle | JourneyPhase::Clicked)
    }

    pub fn label(self) -> &'static str {
        match self {
            JourneyPhase::Idle => "idle",
            JourneyPhase::Clicked => "clicked",
            JourneyPhase::Traveling => "traveling",
            JourneyPhase::Arrived => "arrived",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JourneyEvent {
    /// Clicked: the entry object stops taking clicks and starts receding.
    EntryDisabled,
    /// Traveling: the camera director takes the camera.
    CameraArmed,
    OrbitDisabled,
    ConvergenceFrozen,
    /// Arrived: the overlay becomes visible and interactive. Fires once.
    OverlayRevealed,
}

pub type JourneyEvents = SmallVec<[JourneyEvent; 4]>;

#[derive(Clone, Debug)]
pub struct JourneyTimings {
    pub click_to_travel_secs: f64,
    pub travel_duration_secs: f64,
    pub arrival_progress: f32,
}

impl Default for JourneyTimings {
    fn default() -> Self {
        Self {
            click_to_travel_secs: CLICK_TO_TRAVEL_SECS,
            travel_duration_secs: TRAVEL_DURATION_SECS,
            arrival_progress: ARRIVAL_PROGRESS,
        }
    }
}

pub struct Journey {
    phase: JourneyPhase,
    timings: JourneyTimings,
    clock: f64,
    generation: u64,
    timers: TimerQueue,
    progress: f32,
    revealed: bool,
}

impl Journey {
    pub fn new(timings: JourneyTimings) -> Self {
        Self {
            phase: JourneyPhase::Idle,
            timings,
            clock: 0.0,
            generation: 0,
            timers: TimerQueue::default(),
            progress: 0.0,
            revealed: false,
        }
    }

    pub fn phase(&self) -> JourneyPhase {
        self.phase
    }

    /// Travel progress in [0, 1); only moves while traveling.
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Seconds since construction.
    pub fn clock(&self) -> f64 {
        self.clock
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn overlay_revealed(&self) -> bool {
        self.revealed
    }

    pub fn pending_timers(&self) -> impl Iterator<Item = &Deferred> {
        self.timers.iter()
    }

    /// A click on the entry object. Only the first click from Idle counts.
    pub fn click(&mut self) -> JourneyEvents {
        let mut events = JourneyEvents::new();
        if self.phase != JourneyPhase::Idle {
            log::debug!("[journey] click ignored while {}", self.phase.label());
            return events;
        }
        self.phase = JourneyPhase::Clicked;
        self.timers.schedule(Deferred {
            kind: TimerKind::BeginTravel,
            due: self.clock + self.timings.click_to_travel_secs,
            generation: self.generation,
        });
        log::info!("[journey] clicked at {:.3}s", self.clock);
        events.push(JourneyEvent::EntryDisabled);
        events
    }

    /// Advance the clock by `dt` seconds and fire whatever timers fell due.
    pub fn tick(&mut self, dt: f64) -> JourneyEvents {
        self.clock += dt.max(0.0);
        let mut events = JourneyEvents::new();
        loop {
            let due = self.timers.take_due(self.clock);
            if due.is_empty() {
                break;
            }
            for timer in due {
                events.extend(self.fire(timer));
            }
        }
        events
    }

    /// Apply a deferred transition. Timers from an earlier generation, or
    /// that no longer match the phase, are dropped without effect.
    pub fn fire(&mut self, timer: Deferred) -> JourneyEvents {
        if timer.generation != self.generation {
            log::debug!(
                "[journey] stale {:?} timer (generation {} != {})",
                timer.kind,
                timer.generation,
                self.generation
            );
            return JourneyEvents::new();
        }
        match (timer.kind, self.phase) {
            (TimerKind::BeginTravel, JourneyPhase::Clicked) => self.begin_travel(timer.due),
            (TimerKind::Arrive, JourneyPhase::Traveling) => self.arrive(),
            (kind, phase) => {
                log::debug!("[journey] {:?} timer ignored while {}", kind, phase.label());
                JourneyEvents::new()
            }
        }
    }

    /// Feed the camera's progress. Progress never goes backwards, and
    /// reaching the arrival threshold ends the journey early.
    pub fn observe_progress(&mut self, progress: f32) -> JourneyEvents {
        if self.phase != JourneyPhase::Traveling {
            return JourneyEvents::new();
        }
        self.progress = self.progress.max(progress.min(1.0));
        if self.progress >= self.timings.arrival_progress {
            return self.arrive();
        }
        JourneyEvents::new()
    }

    /// Tear down the session: pending timers are cancelled and any fire still
    /// in flight becomes stale.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.timers.cancel_all();
        self.phase = JourneyPhase::Idle;
        self.progress = 0.0;
        self.revealed = false;
        log::info!("[journey] reset (generation {})", self.generation);
    }

    // Chained on the due time, not on the frame that noticed it, so frame
    // jitter does not accumulate across phases.
    fn begin_travel(&mut self, at: f64) -> JourneyEvents {
        self.phase = JourneyPhase::Traveling;
        self.progress = 0.0;
        self.timers.schedule(Deferred {
            kind: TimerKind::Arrive,
            due: at + self.timings.travel_duration_secs,
            generation: self.generation,
        });
        log::info!("[journey] traveling at {:.3}s", self.clock);
        let mut events = JourneyEvents::new();
        events.push(JourneyEvent::CameraArmed);
        events.push(JourneyEvent::OrbitDisabled);
        events.push(JourneyEvent::ConvergenceFrozen);
        events
    }

    fn arrive(&mut self) -> JourneyEvents {
        let mut events = JourneyEvents::new();
        self.phase = JourneyPhase::Arrived;
        self.timers.cancel(TimerKind::Arrive);
        log::info!("[journey] arrived at {:.3}s", self.clock);
        if !self.revealed {
            self.revealed = true;
            events.push(JourneyEvent::OverlayRevealed);
        }
        events
    }
}

impl Default for Journey {
    fn default() -> Self {
        Self::new(JourneyTimings::default())
    }
}
