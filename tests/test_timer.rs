//! Integration tests for the pomodoro timer.
//!
//! Tests cover:
//! - Countdown and the focus -> break -> focus cycle
//! - Long break after every fourth focus interval
//! - Duration changes, resets and mode switches

use studydesk::core::timer::{CompletedSession, TimerError};
use studydesk::{PomodoroTimer, TimerDurations, TimerEvent, TimerMode};
use uuid::Uuid;

/// Tick until the timer stops or `limit` ticks pass, returning the event that
/// ended the interval together with the number of ticks it took.
fn run_interval(timer: &mut PomodoroTimer, limit: u32) -> (Option<TimerEvent>, u32) {
    for n in 1..=limit {
        if let Some(event) = timer.tick() {
            return (Some(event), n);
        }
    }
    (None, limit)
}

fn short_durations() -> TimerDurations {
    TimerDurations {
        focus_minutes: 1,
        short_break_minutes: 1,
        long_break_minutes: 2,
    }
}

#[test]
fn test_focus_interval_completes_after_full_duration() {
    // 1. Default timer, focused on an assignment
    let mut timer = PomodoroTimer::default();
    let assignment = Uuid::new_v4();
    timer.select_assignment(Some(assignment));
    assert_eq!(timer.display(), "25:00");

    // 2. Run the whole interval
    timer.start();
    let (event, ticks) = run_interval(&mut timer, 2000);

    // 3. Exactly 25 minutes, one session credited to the assignment
    assert_eq!(ticks, 1500);
    assert_eq!(
        event,
        Some(TimerEvent::Completed {
            finished: TimerMode::Focus,
            next: TimerMode::ShortBreak,
            session: Some(CompletedSession {
                assignment_id: Some(assignment),
                minutes: 25,
            }),
        })
    );

    // 4. Timer waits, paused, in the short break with the focus counter refilled
    assert_eq!(timer.mode(), TimerMode::ShortBreak);
    assert!(!timer.is_running());
    assert_eq!(timer.remaining(TimerMode::Focus), 1500);
    assert_eq!(timer.completed_focus_count(), 1);
}

#[test]
fn test_fourth_focus_is_followed_by_long_break() -> anyhow::Result<()> {
    let mut timer = PomodoroTimer::new(short_durations())?;
    let mut breaks = Vec::new();

    for _ in 0..4 {
        timer.start();
        let (event, _) = run_interval(&mut timer, 120);
        let Some(TimerEvent::Completed { next, .. }) = event else {
            panic!("focus interval did not finish");
        };
        breaks.push(next);

        // Break finishes back into focus without a session
        timer.start();
        let (event, _) = run_interval(&mut timer, 200);
        let Some(TimerEvent::Completed { next, session, .. }) = event else {
            panic!("break did not finish");
        };
        assert_eq!(next, TimerMode::Focus);
        assert_eq!(session, None);
    }

    assert_eq!(
        breaks,
        vec![
            TimerMode::ShortBreak,
            TimerMode::ShortBreak,
            TimerMode::ShortBreak,
            TimerMode::LongBreak,
        ]
    );
    Ok(())
}

#[test]
fn test_paused_timer_does_not_count_down() {
    let mut timer = PomodoroTimer::default();
    for _ in 0..10 {
        assert_eq!(timer.tick(), None);
    }
    assert_eq!(timer.remaining_active(), 1500);

    timer.start();
    timer.tick();
    timer.pause();
    timer.tick();
    assert_eq!(timer.display(), "24:59");
}

#[test]
fn test_changing_durations_restarts_all_counters() -> anyhow::Result<()> {
    // 1. Half-way through a focus interval
    let mut timer = PomodoroTimer::default();
    timer.start();
    for _ in 0..600 {
        timer.tick();
    }
    assert_eq!(timer.remaining_active(), 900);

    // 2. New durations apply immediately and halt the timer
    timer.set_durations(TimerDurations {
        focus_minutes: 50,
        short_break_minutes: 10,
        long_break_minutes: 20,
    })?;
    assert!(!timer.is_running());
    assert_eq!(timer.mode(), TimerMode::Focus);
    assert_eq!(timer.remaining(TimerMode::Focus), 3000);
    assert_eq!(timer.remaining(TimerMode::ShortBreak), 600);
    assert_eq!(timer.remaining(TimerMode::LongBreak), 1200);

    // 3. Zero-length intervals are refused and change nothing
    let result = timer.set_durations(TimerDurations {
        focus_minutes: 0,
        ..TimerDurations::default()
    });
    assert_eq!(result, Err(TimerError::ZeroDuration(TimerMode::Focus)));
    assert_eq!(timer.remaining(TimerMode::Focus), 3000);
    Ok(())
}

#[test]
fn test_reset_refills_only_active_mode() -> anyhow::Result<()> {
    let mut timer = PomodoroTimer::new(short_durations())?;

    // Spend some of the short break, then some of focus
    timer.switch_mode(TimerMode::ShortBreak)?;
    timer.start();
    for _ in 0..10 {
        timer.tick();
    }
    timer.pause();
    timer.switch_mode(TimerMode::Focus)?;
    timer.start();
    for _ in 0..5 {
        timer.tick();
    }

    timer.reset();
    assert!(!timer.is_running());
    assert_eq!(timer.remaining(TimerMode::Focus), 60);
    assert_eq!(timer.remaining(TimerMode::ShortBreak), 50);
    Ok(())
}

#[test]
fn test_mode_switch_refused_while_running() -> anyhow::Result<()> {
    let mut timer = PomodoroTimer::default();
    timer.start();
    assert_eq!(
        timer.switch_mode(TimerMode::LongBreak),
        Err(TimerError::SwitchWhileRunning)
    );
    assert_eq!(timer.mode(), TimerMode::Focus);

    timer.toggle();
    timer.switch_mode(TimerMode::LongBreak)?;
    assert_eq!(timer.display(), "15:00");
    Ok(())
}

#[test]
fn test_progress_tracks_elapsed_fraction() {
    let mut timer = PomodoroTimer::default();
    assert_eq!(timer.progress(), 0.0);
    timer.start();
    for _ in 0..750 {
        timer.tick();
    }
    assert!((timer.progress() - 0.5).abs() < f32::EPSILON);
}
