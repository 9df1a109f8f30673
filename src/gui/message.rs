use iced::widget::text_editor;
use uuid::Uuid;

use crate::{
    core::timer::TimerMode,
    gui::{
        state::{CourseChoice, PaletteChoice, TargetChoice},
        theme::TimerTheme,
    },
    models::{Priority, Status},
    Planner, PlannerDb,
};

#[derive(Debug, Clone)]
pub enum Message {
    Loaded(Result<Planner<PlannerDb>, String>),
    Saved(Result<(), String>),
    Tick,
    Timer(TimerMessage),
    Course(CourseMessage),
    Assignment(AssignmentMessage),
    Detail(DetailMessage),
    OpenReset,
    ConfirmReset,
    CloseOverlay,
    DismissNotice,
}

#[derive(Debug, Clone)]
pub enum TimerMessage {
    Toggle,
    Reset,
    SwitchMode(TimerMode),
    SelectTarget(TargetChoice),
    FocusMinutes(String),
    ShortBreakMinutes(String),
    LongBreakMinutes(String),
    ApplyDurations,
    RequestPermission,
    Theme(TimerTheme),
}

#[derive(Debug, Clone)]
pub enum CourseMessage {
    OpenNew,
    OpenEdit(Uuid),
    Show(Uuid),
    Name(String),
    Code(String),
    Color(PaletteChoice),
    Submit,
    Complete(Uuid),
}

#[derive(Debug, Clone)]
pub enum AssignmentMessage {
    /// Blank form, optionally preselecting a course.
    OpenNew(Option<Uuid>),
    OpenEdit(Uuid),
    Title(String),
    Course(CourseChoice),
    Description(text_editor::Action),
    DueDate(String),
    Priority(Priority),
    Hours(String),
    Submit,
}

#[derive(Debug, Clone)]
pub enum DetailMessage {
    Open(Uuid),
    SetStatus(Status),
    Save,
    Discard,
    Close,
}
