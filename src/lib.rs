pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod models;

pub use crate::core::db::{KeyValueStore, MemoryStore, PlannerDb};
pub use crate::core::planner::Planner;
pub use crate::core::timer::{PomodoroTimer, TimerDurations, TimerEvent, TimerMode};
pub use error::PlannerError;
pub use models::{Assignment, Color, Course, Priority, Status, StudySession};

#[cfg(feature = "gui")]
pub mod gui;
