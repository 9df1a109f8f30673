//! Integration tests for the weekly priority matrix.

mod common;

use common::*;
use studydesk::core::matrix::{WEEK_DAYS, WeeklyMatrix};
use time::{
    Duration, PrimitiveDateTime, Time,
    macros::{date, time},
};
use uuid::Uuid;

fn assignment(title: &str, due_date: PrimitiveDateTime, priority: Priority) -> Assignment {
    Assignment {
        id: Uuid::new_v4(),
        title: title.to_string(),
        course_id: Uuid::new_v4(),
        description: String::new(),
        due_date,
        priority,
        status: Status::NotStarted,
        estimated_hours: 1.0,
    }
}

fn titles(cell: &[&Assignment]) -> Vec<String> {
    cell.iter().map(|a| a.title.clone()).collect()
}

#[test]
fn test_assignments_land_in_day_and_priority_cell() {
    let assignments = vec![
        assignment("today high", due_in(0), Priority::High),
        assignment("tomorrow low", due_in(1), Priority::Low),
        assignment("last day medium", due_in(6), Priority::Medium),
    ];
    let matrix = WeeklyMatrix::build(today(), &assignments);

    assert_eq!(matrix.len(), 3);
    assert_eq!(titles(matrix.bucket(0, Priority::High)), vec!["today high"]);
    assert_eq!(titles(matrix.bucket(1, Priority::Low)), vec!["tomorrow low"]);
    assert_eq!(titles(matrix.bucket(6, Priority::Medium)), vec!["last day medium"]);
    assert!(matrix.bucket(0, Priority::Low).is_empty());
    assert!(matrix.bucket(WEEK_DAYS, Priority::High).is_empty());
}

#[test]
fn test_days_start_today() {
    let none: Vec<Assignment> = Vec::new();
    let matrix = WeeklyMatrix::build(today(), &none);
    assert!(matrix.is_empty());
    assert_eq!(matrix.days()[0], today());
    assert_eq!(matrix.days()[6], today() + Duration::days(6));
    assert_eq!(matrix.day_index(today() + Duration::days(3)), Some(3));
    assert_eq!(matrix.day_index(today() - Duration::days(1)), None);
}

#[test]
fn test_assignments_outside_window_are_dropped() {
    let assignments = vec![
        assignment("yesterday", due_in(-1), Priority::High),
        assignment("a week out", due_in(7), Priority::High),
        assignment("late today", PrimitiveDateTime::new(today(), time!(23:59)), Priority::High),
    ];
    let matrix = WeeklyMatrix::build(today(), &assignments);

    assert_eq!(matrix.len(), 1);
    assert_eq!(titles(matrix.bucket(0, Priority::High)), vec!["late today"]);
}

#[test]
fn test_cell_keeps_input_order() {
    let assignments = vec![
        assignment("first", due_in(2), Priority::Medium),
        assignment("second", due_in(2), Priority::Medium),
        assignment("third", due_in(2), Priority::Medium),
    ];
    let matrix = WeeklyMatrix::build(today(), &assignments);
    assert_eq!(
        titles(matrix.bucket(2, Priority::Medium)),
        vec!["first", "second", "third"]
    );

    // Same input, same grid
    let again = WeeklyMatrix::build(today(), &assignments);
    for day in 0..WEEK_DAYS {
        for priority in Priority::ALL {
            assert_eq!(titles(matrix.bucket(day, priority)), titles(again.bucket(day, priority)));
        }
    }
}

#[test]
fn test_week_crossing_new_year() {
    let today = date!(2025 - 12 - 29);
    let at = |days: i64| PrimitiveDateTime::new(today + Duration::days(days), Time::MIDNIGHT);
    let assignments = vec![
        assignment("new year's eve", at(2), Priority::Low),
        assignment("new year's day", at(3), Priority::High),
        assignment("sunday", at(6), Priority::Medium),
        assignment("next monday", at(7), Priority::Medium),
    ];
    let matrix = WeeklyMatrix::build(today, &assignments);

    assert_eq!(matrix.days()[3], date!(2026 - 01 - 01));
    assert_eq!(matrix.days()[6], date!(2026 - 01 - 04));
    assert_eq!(titles(matrix.bucket(2, Priority::Low)), vec!["new year's eve"]);
    assert_eq!(titles(matrix.bucket(3, Priority::High)), vec!["new year's day"]);
    assert_eq!(titles(matrix.bucket(6, Priority::Medium)), vec!["sunday"]);
    assert_eq!(matrix.day_index(date!(2026 - 01 - 05)), None);
    assert_eq!(matrix.len(), 3);
}

#[test]
fn test_week_crossing_month_end() {
    let today = date!(2025 - 02 - 26);
    let due = PrimitiveDateTime::new(date!(2025 - 03 - 01), time!(18:00));
    let assignments = vec![assignment("first of march", due, Priority::High)];
    let matrix = WeeklyMatrix::build(today, &assignments);

    assert_eq!(titles(matrix.bucket(3, Priority::High)), vec!["first of march"]);
    assert_eq!(matrix.days()[6], date!(2025 - 03 - 04));
}

#[test]
fn test_each_day_and_priority_lands_in_exactly_one_cell() {
    for today in [today(), date!(2025 - 12 - 29), date!(2024 - 02 - 26)] {
        for k in 0..WEEK_DAYS {
            for priority in Priority::ALL {
                let due = PrimitiveDateTime::new(today + Duration::days(k as i64), time!(12:30));
                let assignments = vec![assignment("only", due, priority)];
                let matrix = WeeklyMatrix::build(today, &assignments);

                for day in 0..WEEK_DAYS {
                    for other in Priority::ALL {
                        let expected = usize::from(day == k && other == priority);
                        assert_eq!(
                            matrix.bucket(day, other).len(),
                            expected,
                            "today {today}, due day {k} {priority:?}, cell {day} {other:?}"
                        );
                    }
                }
            }
        }
    }
}

#[tokio::test]
async fn test_planner_matrix_hides_done_assignments() -> anyhow::Result<()> {
    let mut planner = Planner::load(MemoryStore::new()).await?;
    let course = planner.add_course(make_new_course("Physics", "PHY101"))?;
    let open = planner.add_assignment(make_new_assignment(
        "Lab report",
        course.id,
        due_in(1),
        Priority::High,
        2.0,
    ))?;
    let done = planner.add_assignment(make_new_assignment(
        "Problem set",
        course.id,
        due_in(1),
        Priority::High,
        1.0,
    ))?;
    planner.set_assignment_status(done.id, Status::Done)?;

    let matrix = planner.weekly_matrix(today());
    let cell = matrix.bucket(1, Priority::High);
    assert_eq!(cell.len(), 1);
    assert_eq!(cell[0].id, open.id);
    Ok(())
}
