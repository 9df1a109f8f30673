//! Side effects raised when a timer interval finishes.

use std::io::Write;

use crate::core::timer::{TimerEvent, TimerMode};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NotificationPermission {
    /// Not asked yet.
    #[default]
    Default,
    Granted,
    Denied,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notification {
    pub title: &'static str,
    pub body: &'static str,
}

impl Notification {
    pub fn for_finished(mode: TimerMode) -> Self {
        match mode {
            TimerMode::Focus => Notification {
                title: "Pomodoro Finished!",
                body: "Time for a break. Great work!",
            },
            TimerMode::ShortBreak | TimerMode::LongBreak => Notification {
                title: "Break Over!",
                body: "Time to get back to it!",
            },
        }
    }
}

/// Host platform hooks. Failures stay inside the sink.
pub trait AlertSink {
    fn play_alert(&mut self);
    fn notify(&mut self, notification: &Notification);
    fn request_permission(&mut self) -> NotificationPermission;
}

#[derive(Debug)]
pub struct Alerts<S> {
    sink: S,
    permission: NotificationPermission,
}

impl<S: AlertSink> Alerts<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            permission: NotificationPermission::Default,
        }
    }

    pub fn with_permission(sink: S, permission: NotificationPermission) -> Self {
        Self { sink, permission }
    }

    pub fn permission(&self) -> NotificationPermission {
        self.permission
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn request_permission(&mut self) -> NotificationPermission {
        self.permission = self.sink.request_permission();
        self.permission
    }

    /// Play the alert and, when permitted, raise a notification. Returns the
    /// notification that was shown, if any.
    pub fn on_timer_event(&mut self, event: &TimerEvent) -> Option<Notification> {
        let TimerEvent::Completed { finished, .. } = event;
        self.sink.play_alert();
        if self.permission != NotificationPermission::Granted {
            return None;
        }
        let notification = Notification::for_finished(*finished);
        self.sink.notify(&notification);
        Some(notification)
    }
}

/// Terminal bell plus a one-line message on stdout.
#[derive(Debug, Default)]
pub struct TerminalAlerts;

impl AlertSink for TerminalAlerts {
    fn play_alert(&mut self) {
        let mut stdout = std::io::stdout();
        if let Err(e) = stdout.write_all(b"\x07").and_then(|_| stdout.flush()) {
            tracing::debug!(error = %e, "alert sound failed");
        }
    }

    fn notify(&mut self, notification: &Notification) {
        println!("{} {}", notification.title, notification.body);
    }

    fn request_permission(&mut self) -> NotificationPermission {
        NotificationPermission::Granted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct RecordingSink {
        alerts: usize,
        shown: Vec<Notification>,
        answer: NotificationPermission,
    }

    impl AlertSink for RecordingSink {
        fn play_alert(&mut self) {
            self.alerts += 1;
        }

        fn notify(&mut self, notification: &Notification) {
            self.shown.push(*notification);
        }

        fn request_permission(&mut self) -> NotificationPermission {
            self.answer
        }
    }

    fn finished(mode: TimerMode) -> TimerEvent {
        TimerEvent::Completed {
            finished: mode,
            next: TimerMode::Focus,
            session: None,
        }
    }

    #[test]
    fn sound_plays_without_permission() {
        let mut alerts = Alerts::new(RecordingSink::default());
        assert_eq!(alerts.on_timer_event(&finished(TimerMode::Focus)), None);
        assert_eq!(alerts.sink().alerts, 1);
        assert!(alerts.sink().shown.is_empty());
    }

    #[test]
    fn denied_permission_suppresses_notifications() {
        let sink = RecordingSink {
            answer: NotificationPermission::Denied,
            ..Default::default()
        };
        let mut alerts = Alerts::new(sink);
        assert_eq!(alerts.request_permission(), NotificationPermission::Denied);
        alerts.on_timer_event(&finished(TimerMode::ShortBreak));
        assert!(alerts.sink().shown.is_empty());
    }

    #[test]
    fn granted_permission_shows_mode_message() {
        let mut alerts =
            Alerts::with_permission(RecordingSink::default(), NotificationPermission::Granted);
        let shown = alerts.on_timer_event(&finished(TimerMode::LongBreak));
        assert_eq!(shown.map(|n| n.title), Some("Break Over!"));
        let shown = alerts.on_timer_event(&finished(TimerMode::Focus));
        assert_eq!(shown.map(|n| n.title), Some("Pomodoro Finished!"));
        assert_eq!(alerts.sink().alerts, 2);
        assert_eq!(alerts.sink().shown.len(), 2);
    }
}
