//! Pomodoro countdown engine.
//!
//! The engine never looks at a clock. Whoever drives it calls [`PomodoroTimer::tick`]
//! once per elapsed second while it is running, which keeps the state machine
//! testable without waiting in real time.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Completed focus intervals between long breaks.
pub const LONG_BREAK_EVERY: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerMode {
    Focus,
    ShortBreak,
    LongBreak,
}

impl TimerMode {
    pub const ALL: [TimerMode; 3] = [TimerMode::Focus, TimerMode::ShortBreak, TimerMode::LongBreak];

    pub fn label(self) -> &'static str {
        match self {
            TimerMode::Focus => "Pomodoro",
            TimerMode::ShortBreak => "Short Break",
            TimerMode::LongBreak => "Long Break",
        }
    }

    fn index(self) -> usize {
        match self {
            TimerMode::Focus => 0,
            TimerMode::ShortBreak => 1,
            TimerMode::LongBreak => 2,
        }
    }
}

impl fmt::Display for TimerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimerError {
    #[error("cannot switch modes while the timer is running")]
    SwitchWhileRunning,

    #[error("{0} duration must be at least one minute")]
    ZeroDuration(TimerMode),
}

/// Configured length of each mode, in whole minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimerDurations {
    pub focus_minutes: u32,
    pub short_break_minutes: u32,
    pub long_break_minutes: u32,
}

impl Default for TimerDurations {
    fn default() -> Self {
        Self {
            focus_minutes: 25,
            short_break_minutes: 5,
            long_break_minutes: 15,
        }
    }
}

impl TimerDurations {
    pub fn minutes(&self, mode: TimerMode) -> u32 {
        match mode {
            TimerMode::Focus => self.focus_minutes,
            TimerMode::ShortBreak => self.short_break_minutes,
            TimerMode::LongBreak => self.long_break_minutes,
        }
    }

    pub fn seconds(&self, mode: TimerMode) -> u32 {
        self.minutes(mode).saturating_mul(60)
    }

    pub fn validate(&self) -> Result<(), TimerError> {
        match TimerMode::ALL.into_iter().find(|mode| self.minutes(*mode) == 0) {
            Some(mode) => Err(TimerError::ZeroDuration(mode)),
            None => Ok(()),
        }
    }
}

/// A finished focus interval, ready to be recorded as a study session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletedSession {
    pub assignment_id: Option<Uuid>,
    pub minutes: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// `finished` ran out; the timer now sits paused in `next`.
    Completed {
        finished: TimerMode,
        next: TimerMode,
        session: Option<CompletedSession>,
    },
}

#[derive(Debug, Clone)]
pub struct PomodoroTimer {
    durations: TimerDurations,
    remaining: [u32; 3],
    mode: TimerMode,
    running: bool,
    completed_focus: u32,
    selected_assignment: Option<Uuid>,
}

impl Default for PomodoroTimer {
    fn default() -> Self {
        Self::with_durations(TimerDurations::default())
    }
}

impl PomodoroTimer {
    pub fn new(durations: TimerDurations) -> Result<Self, TimerError> {
        durations.validate()?;
        Ok(Self::with_durations(durations))
    }

    fn with_durations(durations: TimerDurations) -> Self {
        Self {
            durations,
            remaining: TimerMode::ALL.map(|mode| durations.seconds(mode)),
            mode: TimerMode::Focus,
            running: false,
            completed_focus: 0,
            selected_assignment: None,
        }
    }

    pub fn durations(&self) -> TimerDurations {
        self.durations
    }

    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn completed_focus_count(&self) -> u32 {
        self.completed_focus
    }

    pub fn selected_assignment(&self) -> Option<Uuid> {
        self.selected_assignment
    }

    /// Assignment credited with the next completed focus interval.
    pub fn select_assignment(&mut self, assignment_id: Option<Uuid>) {
        self.selected_assignment = assignment_id;
    }

    pub fn remaining(&self, mode: TimerMode) -> u32 {
        self.remaining[mode.index()]
    }

    pub fn remaining_active(&self) -> u32 {
        self.remaining(self.mode)
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn toggle(&mut self) {
        self.running = !self.running;
    }

    /// Select another mode. Counters of every mode are left as they are.
    pub fn switch_mode(&mut self, mode: TimerMode) -> Result<(), TimerError> {
        if self.running {
            return Err(TimerError::SwitchWhileRunning);
        }
        self.mode = mode;
        Ok(())
    }

    /// Refill the active mode's counter and stop.
    pub fn reset(&mut self) {
        self.running = false;
        self.remaining[self.mode.index()] = self.durations.seconds(self.mode);
    }

    /// Replace the configured durations. All counters restart from the new
    /// values and the timer stops, whichever mode is active.
    pub fn set_durations(&mut self, durations: TimerDurations) -> Result<(), TimerError> {
        durations.validate()?;
        self.durations = durations;
        self.remaining = TimerMode::ALL.map(|mode| durations.seconds(mode));
        self.running = false;
        Ok(())
    }

    /// Advance by one second.
    pub fn tick(&mut self) -> Option<TimerEvent> {
        if !self.running {
            return None;
        }
        let slot = &mut self.remaining[self.mode.index()];
        *slot = slot.saturating_sub(1);
        if *slot > 0 {
            return None;
        }
        Some(self.complete_interval())
    }

    fn complete_interval(&mut self) -> TimerEvent {
        let finished = self.mode;
        self.remaining[finished.index()] = self.durations.seconds(finished);

        let (next, session) = match finished {
            TimerMode::Focus => {
                self.completed_focus += 1;
                let next = if self.completed_focus % LONG_BREAK_EVERY == 0 {
                    TimerMode::LongBreak
                } else {
                    TimerMode::ShortBreak
                };
                let session = CompletedSession {
                    assignment_id: self.selected_assignment,
                    minutes: self.durations.focus_minutes,
                };
                (next, Some(session))
            }
            TimerMode::ShortBreak | TimerMode::LongBreak => (TimerMode::Focus, None),
        };

        self.running = false;
        self.mode = next;
        tracing::debug!(%finished, %next, completed = self.completed_focus, "timer interval finished");
        TimerEvent::Completed {
            finished,
            next,
            session,
        }
    }

    /// Remaining time of the active mode as `MM:SS`.
    pub fn display(&self) -> String {
        let remaining = self.remaining_active();
        format!("{:02}:{:02}", remaining / 60, remaining % 60)
    }

    /// Elapsed fraction of the active mode, 0.0 to 1.0.
    pub fn progress(&self) -> f32 {
        let total = self.durations.seconds(self.mode);
        if total == 0 {
            return 0.0;
        }
        (total - self.remaining_active().min(total)) as f32 / total as f32
    }
}
