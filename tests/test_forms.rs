//! Integration tests for form validation and the assignment detail view.

mod common;

use common::*;
use studydesk::core::forms::{
    AssignmentForm, CourseForm, DetailError, DetailView, FormError, parse_due_date,
};
use time::macros::datetime;

#[tokio::test]
async fn test_assignment_form_round_trip_through_planner() -> anyhow::Result<()> {
    // 1. Blank form preselects the first course
    let mut planner = Planner::load(MemoryStore::new()).await?;
    let course = planner.add_course(make_new_course("Art History", "ART105"))?;
    let mut form = AssignmentForm::new(planner.courses(), None);
    assert_eq!(form.course_id, Some(course.id));
    assert_eq!(form.priority, Priority::Medium);

    // 2. Fill in and submit
    form.title = "  Museum visit ".to_string();
    form.due_date = "2025-05-02".to_string();
    form.estimated_hours = 3.0;
    let assignment = planner.add_assignment(form.validate(planner.courses())?)?;
    assert_eq!(assignment.title, "Museum visit");
    assert_eq!(assignment.due_date, datetime!(2025-05-02 0:00));

    // 3. Edit form starts from the stored values
    let mut edit = AssignmentForm::from_assignment(&assignment);
    assert_eq!(edit.due_date, "2025-05-02");
    edit.priority = Priority::High;
    let updated = planner.update_assignment(assignment.id, edit.validate_update(planner.courses())?)?;
    assert_eq!(updated.priority, Priority::High);
    assert_eq!(updated.title, "Museum visit");
    Ok(())
}

#[test]
fn test_missing_fields_are_reported() {
    let form = CourseForm {
        name: "Poetry".to_string(),
        code: "   ".to_string(),
        color: Color::default(),
    };
    assert_eq!(form.validate(), Err(FormError::MissingField("code")));

    let form = AssignmentForm {
        title: "Sonnet".to_string(),
        due_date: "2025-05-02".to_string(),
        ..AssignmentForm::default()
    };
    assert_eq!(form.validate(&[]), Err(FormError::MissingField("course")));
}

#[test]
fn test_assignment_form_checks_course_and_hours() {
    let course = Course {
        id: uuid::Uuid::new_v4(),
        name: "Music".to_string(),
        code: "MUS100".to_string(),
        color: Color::default(),
        is_completed: false,
    };
    let mut form = AssignmentForm {
        title: "Scales".to_string(),
        course_id: Some(uuid::Uuid::new_v4()),
        due_date: "2025-05-02".to_string(),
        ..AssignmentForm::default()
    };
    assert!(matches!(
        form.validate(std::slice::from_ref(&course)),
        Err(FormError::UnknownCourse(_))
    ));

    form.course_id = Some(course.id);
    form.estimated_hours = -1.0;
    assert_eq!(
        form.validate(std::slice::from_ref(&course)),
        Err(FormError::InvalidHours)
    );
}

#[test]
fn test_due_date_parsing() {
    assert_eq!(parse_due_date("2025-12-31"), Ok(datetime!(2025-12-31 0:00)));
    assert_eq!(parse_due_date("2999-12-31"), Ok(datetime!(2999-12-31 0:00)));
    assert_eq!(parse_due_date("3000-01-01"), Err(FormError::DateOutOfRange));
    assert!(matches!(parse_due_date("12/31/2025"), Err(FormError::InvalidDate(_))));
    assert!(matches!(parse_due_date("2025-02-30"), Err(FormError::InvalidDate(_))));
}

#[test]
fn test_detail_view_guards_unsaved_status() {
    let assignment = Assignment {
        id: uuid::Uuid::new_v4(),
        title: "Draft".to_string(),
        course_id: uuid::Uuid::new_v4(),
        description: "<p>Write the <b>intro</b></p>".to_string(),
        due_date: due_in(3),
        priority: Priority::Medium,
        status: Status::NotStarted,
        estimated_hours: 1.0,
    };

    // 1. Untouched view closes freely and has nothing to save
    let view = DetailView::open(&assignment);
    assert_eq!(view.try_close(), Ok(()));
    assert_eq!(view.clone().save(), None);

    // 2. A local change blocks closing until discarded
    let mut view = DetailView::open(&assignment);
    view.set_status(Status::InProgress);
    assert!(view.has_changes());
    assert_eq!(view.try_close(), Err(DetailError::UnsavedChanges));
    view.discard();
    assert_eq!(view.try_close(), Ok(()));

    // 3. Saving hands back the change to apply
    view.set_status(Status::Done);
    assert_eq!(view.save(), Some((assignment.id, Status::Done)));
}
