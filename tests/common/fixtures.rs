use studydesk::models::{NewAssignment, NewCourse};
use studydesk::{Color, Planner, PlannerDb, Priority};
use time::{Date, Duration, PrimitiveDateTime, Time, macros::datetime};

/// Fixed "now" used by the stats and matrix tests: a Monday, 09:00.
pub const NOW: PrimitiveDateTime = datetime!(2025-03-03 9:00);

pub fn today() -> Date {
    NOW.date()
}

/// Midnight `days` from [`today`] (negative for the past).
pub fn due_in(days: i64) -> PrimitiveDateTime {
    PrimitiveDateTime::new(today() + Duration::days(days), Time::MIDNIGHT)
}

/// Opens a PlannerDb in a fresh temporary directory.
/// Returns both the store and the directory (which must be kept alive).
pub async fn create_test_store() -> (PlannerDb, tempfile::TempDir) {
    let dir = tempfile::TempDir::new().expect("Failed to create temp directory");
    let path = dir.path().join("planner.db");
    let store = PlannerDb::open(&path)
        .await
        .expect("Failed to open test store");
    (store, dir)
}

/// A planner over a fresh temporary store.
pub async fn create_test_planner() -> (Planner<PlannerDb>, tempfile::TempDir) {
    let (store, dir) = create_test_store().await;
    let planner = Planner::load(store)
        .await
        .expect("Failed to load planner");
    (planner, dir)
}

pub fn make_new_course(name: &str, code: &str) -> NewCourse {
    NewCourse {
        name: name.to_string(),
        code: code.to_string(),
        color: Color::default(),
    }
}

pub fn make_new_assignment(
    title: &str,
    course_id: uuid::Uuid,
    due_date: PrimitiveDateTime,
    priority: Priority,
    estimated_hours: f64,
) -> NewAssignment {
    NewAssignment {
        title: title.to_string(),
        course_id,
        description: String::new(),
        due_date,
        priority,
        estimated_hours,
    }
}
