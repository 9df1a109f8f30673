mod fixtures;
pub use fixtures::*;

// Re-export commonly used types from studydesk for tests
pub use studydesk::core::planner::{ASSIGNMENTS_KEY, COURSES_KEY, SESSIONS_KEY};
pub use studydesk::core::timer::CompletedSession;
pub use studydesk::{
    Assignment, Color, Course, KeyValueStore, MemoryStore, Planner, PlannerDb, PlannerError,
    Priority, Status, StudySession,
};
