use iced::{
    Alignment, Element, Length,
    widget::{button, column, pick_list, row, text, text_editor, text_input},
};
use uuid::Uuid;

use crate::{
    core::{
        clock, display,
        forms::{AssignmentForm, DetailView},
    },
    gui::{
        Message,
        message::{AssignmentMessage, DetailMessage},
        state::CourseChoice,
        widgets::section,
    },
    models::{Priority, Status},
    Planner, PlannerDb,
};

fn assignment_message(message: AssignmentMessage) -> Message {
    Message::Assignment(message)
}

fn detail_message(message: DetailMessage) -> Message {
    Message::Detail(message)
}

pub fn form<'a>(
    planner: &'a Planner<PlannerDb>,
    editing: Option<Uuid>,
    form: &'a AssignmentForm,
    hours: &'a str,
    description: &'a text_editor::Content,
) -> Element<'a, Message> {
    let title = if editing.is_some() {
        "Edit Assignment"
    } else {
        "Add Assignment"
    };
    let courses: Vec<CourseChoice> = planner
        .active_courses()
        .map(CourseChoice::from_course)
        .collect();
    let selected = form
        .course_id
        .and_then(|id| planner.course(id))
        .map(CourseChoice::from_course);

    let content = column![
        text("Title"),
        text_input("e.g. Problem set 3", &form.title)
            .on_input(|v| assignment_message(AssignmentMessage::Title(v))),
        text("Course"),
        pick_list(courses, selected, |choice| {
            assignment_message(AssignmentMessage::Course(choice))
        })
        .placeholder("Choose a course"),
        text("Due date"),
        text_input("YYYY-MM-DD", &form.due_date)
            .on_input(|v| assignment_message(AssignmentMessage::DueDate(v))),
        row![
            column![
                text("Priority"),
                pick_list(Priority::ALL.to_vec(), Some(form.priority), |p| {
                    assignment_message(AssignmentMessage::Priority(p))
                }),
            ]
            .spacing(4),
            column![
                text("Estimated hours"),
                text_input("1.0", hours)
                    .on_input(|v| assignment_message(AssignmentMessage::Hours(v))),
            ]
            .spacing(4),
        ]
        .spacing(16),
        text("Description"),
        text_editor(description)
            .placeholder("Notes, links, instructions")
            .on_action(|action| assignment_message(AssignmentMessage::Description(action)))
            .height(Length::Fixed(140.0)),
        row![
            button("Save").on_press(assignment_message(AssignmentMessage::Submit)),
            button("Cancel")
                .style(button::secondary)
                .on_press(Message::CloseOverlay),
        ]
        .spacing(10),
    ]
    .spacing(8);
    section(title, content)
}

pub fn detail<'a>(planner: &'a Planner<PlannerDb>, view: &'a DetailView) -> Element<'a, Message> {
    let Some(assignment) = planner.assignment(view.assignment_id()) else {
        return section(
            "Assignment",
            column![
                text("This assignment no longer exists."),
                button("Close").on_press(Message::CloseOverlay),
            ]
            .spacing(8),
        );
    };

    let due = assignment.due_date.date();
    let description = display::plain_text(&assignment.description);
    let facts = column![
        text(assignment.title.as_str()).size(22),
        text(format!(
            "Course: {}",
            display::course_name(planner.courses(), assignment.course_id)
        )),
        text(format!(
            "Due: {} ({})",
            display::long_date(due),
            display::relative_due_label(due, clock::today())
        )),
        text(format!("Priority: {}", assignment.priority)),
        text(format!("Estimated: {} hours", assignment.estimated_hours)),
        text(if description.is_empty() {
            "No description.".to_string()
        } else {
            description
        })
        .size(14),
    ]
    .spacing(6);

    let status = row![
        text("Status"),
        pick_list(Status::ALL.to_vec(), Some(view.status()), |s| {
            detail_message(DetailMessage::SetStatus(s))
        }),
    ]
    .spacing(10)
    .align_y(Alignment::Center);

    let changed = view.has_changes();
    let mut actions = row![
        button("Save")
            .on_press_maybe(changed.then_some(detail_message(DetailMessage::Save))),
        button("Discard")
            .style(button::secondary)
            .on_press_maybe(changed.then_some(detail_message(DetailMessage::Discard))),
        button("Edit")
            .style(button::secondary)
            .on_press(assignment_message(AssignmentMessage::OpenEdit(assignment.id))),
        button("Close")
            .style(button::secondary)
            .on_press(detail_message(DetailMessage::Close)),
    ]
    .spacing(10);
    if changed {
        actions = actions.push(text("Unsaved changes").size(12));
    }

    section("Assignment", column![facts, status, actions].spacing(14))
}
