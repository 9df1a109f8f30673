use std::{fmt, path::PathBuf};

use iced::widget::text_editor;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    config::AppConfig,
    core::{
        alerts::{AlertSink, Alerts, Notification, NotificationPermission},
        forms::{AssignmentForm, CourseForm, DetailError, DetailView},
        timer::{PomodoroTimer, TimerDurations},
    },
    gui::theme::TimerTheme,
    models::{COURSE_PALETTE, Color, Course},
    Planner, PlannerDb,
};

/// Alert hooks for the desktop window. The chime is a visual flash on the
/// timer panel; notifications become the banner.
#[derive(Debug, Default)]
pub struct WindowAlerts {
    notifications_enabled: bool,
    /// Set by the chime, cleared once the user touches the timer again.
    pub flash: bool,
}

impl WindowAlerts {
    /// `notifications_enabled` is the answer given when the user asks for
    /// notification permission.
    pub fn new(notifications_enabled: bool) -> Self {
        Self {
            notifications_enabled,
            flash: false,
        }
    }
}

impl AlertSink for WindowAlerts {
    fn play_alert(&mut self) {
        self.flash = true;
    }

    fn notify(&mut self, notification: &Notification) {
        tracing::info!(title = notification.title, "timer notification");
    }

    fn request_permission(&mut self) -> NotificationPermission {
        if self.notifications_enabled {
            NotificationPermission::Granted
        } else {
            NotificationPermission::Denied
        }
    }
}

/// Entry of the study-target picker. `id: None` is general study.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetChoice {
    pub id: Option<Uuid>,
    pub label: String,
}

impl TargetChoice {
    pub fn general() -> Self {
        Self {
            id: None,
            label: "General study".to_string(),
        }
    }
}

impl fmt::Display for TargetChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseChoice {
    pub id: Uuid,
    pub label: String,
}

impl CourseChoice {
    pub fn from_course(course: &Course) -> Self {
        Self {
            id: course.id,
            label: format!("{} ({})", course.name, course.code),
        }
    }
}

impl fmt::Display for CourseChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteChoice {
    pub name: &'static str,
    pub color: Color,
}

impl PaletteChoice {
    pub fn all() -> Vec<Self> {
        COURSE_PALETTE
            .iter()
            .map(|&(name, color)| Self { name, color })
            .collect()
    }

    /// The palette entry for `color`, if it is one.
    pub fn find(color: Color) -> Option<Self> {
        Self::all().into_iter().find(|c| c.color == color)
    }
}

impl fmt::Display for PaletteChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Panel shown beside the dashboard, at most one at a time.
#[derive(Default)]
pub enum Overlay {
    #[default]
    None,
    CourseForm {
        editing: Option<Uuid>,
        form: CourseForm,
    },
    CourseDetail(Uuid),
    AssignmentForm {
        editing: Option<Uuid>,
        form: AssignmentForm,
        /// Hours exactly as typed; parsed on submit.
        hours: String,
        description: text_editor::Content,
    },
    AssignmentDetail(DetailView),
    ConfirmReset,
}

impl Overlay {
    pub fn assignment_form(editing: Option<Uuid>, form: AssignmentForm) -> Self {
        Overlay::AssignmentForm {
            editing,
            hours: form.estimated_hours.to_string(),
            description: text_editor::Content::with_text(&form.description),
            form,
        }
    }

    /// Swap in `next` unless an assignment detail still holds an unsaved
    /// status change.
    pub fn replace(&mut self, next: Overlay) -> Result<(), DetailError> {
        if let Overlay::AssignmentDetail(view) = self {
            view.try_close()?;
        }
        *self = next;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

#[derive(Debug, Clone)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }
}

/// Duration fields as typed in the timer settings.
#[derive(Debug, Clone)]
pub struct DurationInputs {
    pub focus: String,
    pub short_break: String,
    pub long_break: String,
}

impl DurationInputs {
    pub fn from_durations(durations: TimerDurations) -> Self {
        Self {
            focus: durations.focus_minutes.to_string(),
            short_break: durations.short_break_minutes.to_string(),
            long_break: durations.long_break_minutes.to_string(),
        }
    }

    pub fn parse(&self) -> Option<TimerDurations> {
        Some(TimerDurations {
            focus_minutes: self.focus.trim().parse().ok()?,
            short_break_minutes: self.short_break.trim().parse().ok()?,
            long_break_minutes: self.long_break.trim().parse().ok()?,
        })
    }
}

pub struct AppState {
    pub data_file: PathBuf,
    pub timer_theme: TimerTheme,
    pub config: AppConfig,
    pub config_path: PathBuf,
    /// `None` until the store has loaded.
    pub planner: Option<Planner<PlannerDb>>,
    pub load_error: Option<String>,
    pub timer: PomodoroTimer,
    pub alerts: Alerts<WindowAlerts>,
    /// When the running focus interval was first started.
    pub focus_started: Option<OffsetDateTime>,
    pub durations: DurationInputs,
    pub overlay: Overlay,
    pub notice: Option<Notice>,
}

impl AppState {
    pub fn new(data_file: PathBuf, config: AppConfig, config_path: PathBuf) -> Self {
        let timer = PomodoroTimer::new(config.timer).unwrap_or_default();
        let alerts = Alerts::new(WindowAlerts::new(config.notifications));
        Self {
            data_file,
            timer_theme: TimerTheme::find(config.timer_theme.as_deref()),
            durations: DurationInputs::from_durations(timer.durations()),
            config,
            config_path,
            planner: None,
            load_error: None,
            timer,
            alerts,
            focus_started: None,
            overlay: Overlay::None,
            notice: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Assignment, Priority, Status};
    use time::macros::datetime;

    fn detail() -> DetailView {
        DetailView::open(&Assignment {
            id: Uuid::new_v4(),
            title: "Essay".to_string(),
            course_id: Uuid::new_v4(),
            description: String::new(),
            due_date: datetime!(2025-03-10 0:00),
            priority: Priority::Medium,
            status: Status::NotStarted,
            estimated_hours: 2.0,
        })
    }

    #[test]
    fn unsaved_detail_blocks_every_replacement() {
        let mut view = detail();
        view.set_status(Status::Done);
        let mut overlay = Overlay::AssignmentDetail(view);

        let candidates = [
            Overlay::None,
            Overlay::ConfirmReset,
            Overlay::CourseDetail(Uuid::new_v4()),
            Overlay::CourseForm {
                editing: None,
                form: CourseForm::default(),
            },
            Overlay::assignment_form(None, AssignmentForm::new(&[], None)),
        ];
        for next in candidates {
            assert_eq!(overlay.replace(next), Err(DetailError::UnsavedChanges));
            assert!(matches!(&overlay, Overlay::AssignmentDetail(v) if v.status() == Status::Done));
        }
    }

    #[test]
    fn clean_or_discarded_detail_can_be_replaced() {
        let mut overlay = Overlay::AssignmentDetail(detail());
        assert!(overlay.replace(Overlay::ConfirmReset).is_ok());
        assert!(matches!(overlay, Overlay::ConfirmReset));

        let mut view = detail();
        view.set_status(Status::InProgress);
        view.discard();
        let mut overlay = Overlay::AssignmentDetail(view);
        assert!(overlay.replace(Overlay::None).is_ok());
        assert!(matches!(overlay, Overlay::None));
    }

    #[test]
    fn permission_waits_for_the_user() {
        let config = AppConfig {
            notifications: true,
            ..AppConfig::default()
        };
        let mut state = AppState::new(PathBuf::from("planner.db"), config, PathBuf::from("config.toml"));
        assert_eq!(state.alerts.permission(), NotificationPermission::Default);
        assert_eq!(state.alerts.request_permission(), NotificationPermission::Granted);

        let mut state = AppState::new(
            PathBuf::from("planner.db"),
            AppConfig::default(),
            PathBuf::from("config.toml"),
        );
        assert_eq!(state.alerts.request_permission(), NotificationPermission::Denied);
    }
}
