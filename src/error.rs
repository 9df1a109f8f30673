//! Error types for planner operations.

use uuid::Uuid;

use crate::core::{forms::FormError, timer::TimerError};

/// Errors raised by [`Planner`](crate::core::planner::Planner) mutations.
#[derive(Debug, thiserror::Error)]
pub enum PlannerError {
    #[error("course not found: {0}")]
    CourseNotFound(Uuid),

    #[error("assignment not found: {0}")]
    AssignmentNotFound(Uuid),

    #[error("course \"{0}\" is already completed")]
    CourseAlreadyCompleted(String),

    /// An assignment referenced a course that does not exist.
    #[error("unknown course: {0}")]
    UnknownCourse(Uuid),

    #[error("study session must last at least one minute")]
    EmptySession,

    #[error("reset was not confirmed")]
    ResetNotConfirmed,

    #[error(transparent)]
    Form(#[from] FormError),

    #[error(transparent)]
    Timer(#[from] TimerError),

    /// Serializing a collection for storage failed.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, PlannerError>;
