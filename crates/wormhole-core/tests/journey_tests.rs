use wormhole_core::timer::{Deferred, TimerKind, TimerQueue};
use wormhole_core::{Journey, JourneyEvent, JourneyPhase, JourneyTimings};

const DT: f64 = 1.0 / 60.0;

fn pending(j: &Journey) -> Vec<Deferred> {
    let mut v: Vec<Deferred> = j.pending_timers().copied().collect();
    v.sort_by(|a, b| a.due.total_cmp(&b.due));
    v
}

#[test]
fn idle_without_click_never_moves() {
    let mut j = Journey::default();
    for _ in 0..600 {
        assert!(j.tick(DT).is_empty());
        assert!(j.observe_progress(1.0).is_empty());
    }
    assert_eq!(j.phase(), JourneyPhase::Idle);
    assert_eq!(pending(&j).len(), 0);
    assert!(!j.overlay_revealed());
}

#[test]
fn click_from_idle_enters_clicked() {
    let mut j = Journey::default();
    let events = j.click();
    assert_eq!(events.as_slice(), &[JourneyEvent::EntryDisabled]);
    assert_eq!(j.phase(), JourneyPhase::Clicked);
    let timers = pending(&j);
    assert_eq!(timers.len(), 1);
    assert_eq!(timers[0].kind, TimerKind::BeginTravel);
    assert!((timers[0].due - 1.0).abs() < 1e-9);
}

#[test]
fn timeline_follows_the_fixed_delays() {
    let mut j = Journey::default();
    j.click();
    let mut traveling_at = None;
    let mut arrived_at = None;
    let mut reveals = 0;
    while j.clock() < 9.0 {
        let events = j.tick(DT);
        let now = j.clock();
        if events.contains(&JourneyEvent::CameraArmed) {
            assert!(traveling_at.is_none());
            traveling_at = Some(now);
            assert!(events.contains(&JourneyEvent::OrbitDisabled));
            assert!(events.contains(&JourneyEvent::ConvergenceFrozen));
        }
        reveals += events
            .iter()
            .filter(|e| **e == JourneyEvent::OverlayRevealed)
            .count();
        if events.contains(&JourneyEvent::OverlayRevealed) {
            arrived_at = Some(now);
        }
        match j.phase() {
            JourneyPhase::Clicked => assert!(now < 1.0),
            JourneyPhase::Traveling => assert!(now >= 1.0 && now < 7.0),
            JourneyPhase::Arrived => assert!(now >= 7.0),
            JourneyPhase::Idle => panic!("fell back to idle"),
        }
    }
    let traveling_at = traveling_at.unwrap();
    let arrived_at = arrived_at.unwrap();
    assert!(traveling_at >= 1.0 && traveling_at < 1.0 + DT + 1e-9);
    assert!(arrived_at >= 7.0 && arrived_at < 7.0 + DT + 1e-9);
    assert_eq!(reveals, 1);
    assert!(j.overlay_revealed());
}

#[test]
fn one_big_tick_fires_chained_timers_in_order() {
    let mut j = Journey::default();
    j.click();
    let events = j.tick(10.0);
    assert_eq!(
        events.as_slice(),
        &[
            JourneyEvent::CameraArmed,
            JourneyEvent::OrbitDisabled,
            JourneyEvent::ConvergenceFrozen,
            JourneyEvent::OverlayRevealed,
        ]
    );
    assert_eq!(j.phase(), JourneyPhase::Arrived);
}

#[test]
fn later_clicks_are_no_ops() {
    let mut j = Journey::default();
    j.click();
    for target in [0.5, 2.0, 8.0] {
        while j.clock() < target {
            j.tick(DT);
        }
        let phase = j.phase();
        let timers = pending(&j);
        assert!(j.click().is_empty());
        assert_eq!(j.phase(), phase);
        assert_eq!(pending(&j), timers);
    }
}

#[test]
fn progress_can_end_the_journey_early() {
    let mut j = Journey::default();
    j.click();
    while j.phase() != JourneyPhase::Traveling {
        j.tick(DT);
    }
    assert!(j.observe_progress(0.5).is_empty());
    assert!(j.observe_progress(0.3).is_empty());
    assert_eq!(j.progress(), 0.5);

    let events = j.observe_progress(0.996);
    assert_eq!(events.as_slice(), &[JourneyEvent::OverlayRevealed]);
    assert_eq!(j.phase(), JourneyPhase::Arrived);
    assert!(pending(&j).is_empty());

    // The duration timer was cancelled; nothing fires twice.
    for _ in 0..600 {
        assert!(j.tick(DT).is_empty());
    }
    assert!(j.observe_progress(0.999).is_empty());
}

#[test]
fn stale_timers_fire_as_no_ops() {
    let mut j = Journey::default();
    j.click();
    let stale = pending(&j);
    let old_generation = j.generation();
    j.reset();
    assert_eq!(j.generation(), old_generation + 1);
    assert_eq!(j.phase(), JourneyPhase::Idle);
    assert!(pending(&j).is_empty());

    for timer in stale {
        assert!(j.fire(timer).is_empty());
    }
    assert_eq!(j.phase(), JourneyPhase::Idle);
    for _ in 0..600 {
        assert!(j.tick(DT).is_empty());
    }
    assert_eq!(j.phase(), JourneyPhase::Idle);
}

#[test]
fn mismatched_timer_kind_is_ignored() {
    let mut j = Journey::default();
    j.click();
    let bogus = Deferred {
        kind: TimerKind::Arrive,
        due: 0.0,
        generation: j.generation(),
    };
    assert!(j.fire(bogus).is_empty());
    assert_eq!(j.phase(), JourneyPhase::Clicked);
}

#[test]
fn reset_allows_a_fresh_journey() {
    let mut j = Journey::default();
    j.click();
    j.tick(3.0);
    assert_eq!(j.phase(), JourneyPhase::Traveling);
    j.reset();
    assert_eq!(j.progress(), 0.0);
    let start = j.clock();
    j.click();
    assert_eq!(j.phase(), JourneyPhase::Clicked);
    let timers = pending(&j);
    assert!((timers[0].due - (start + 1.0)).abs() < 1e-9);
    assert_eq!(timers[0].generation, j.generation());
}

#[test]
fn custom_timings_are_honoured() {
    let mut j = Journey::new(JourneyTimings {
        click_to_travel_secs: 0.25,
        travel_duration_secs: 0.5,
        arrival_progress: 0.9,
    });
    j.click();
    j.tick(0.3);
    assert_eq!(j.phase(), JourneyPhase::Traveling);
    j.tick(0.5);
    assert_eq!(j.phase(), JourneyPhase::Arrived);
}

#[test]
fn phase_flags() {
    assert!(JourneyPhase::Idle.orbit_enabled());
    assert!(JourneyPhase::Clicked.orbit_enabled());
    assert!(!JourneyPhase::Traveling.orbit_enabled());
    assert!(!JourneyPhase::Arrived.orbit_enabled());
    assert!(!JourneyPhase::Clicked.freezes_convergence());
    assert!(JourneyPhase::Traveling.freezes_convergence());
    assert_eq!(JourneyPhase::Arrived.label(), "arrived");
}

#[test]
fn timer_queue_replaces_and_orders() {
    let mut q = TimerQueue::default();
    q.schedule(Deferred {
        kind: TimerKind::Arrive,
        due: 5.0,
        generation: 0,
    });
    q.schedule(Deferred {
        kind: TimerKind::BeginTravel,
        due: 2.0,
        generation: 0,
    });
    q.schedule(Deferred {
        kind: TimerKind::BeginTravel,
        due: 1.0,
        generation: 0,
    });
    assert_eq!(q.len(), 2);
    assert!(q.take_due(0.5).is_empty());

    let due = q.take_due(6.0);
    assert_eq!(due.len(), 2);
    assert_eq!(due[0].kind, TimerKind::BeginTravel);
    assert_eq!(due[0].due, 1.0);
    assert_eq!(due[1].kind, TimerKind::Arrive);
    assert!(q.is_empty());

    q.schedule(Deferred {
        kind: TimerKind::Arrive,
        due: 1.0,
        generation: 3,
    });
    assert_eq!(q.get(TimerKind::Arrive).map(|t| t.generation), Some(3));
    assert!(q.cancel(TimerKind::Arrive).is_some());
    assert!(q.cancel(TimerKind::Arrive).is_none());
}
