use iced::{
    Alignment, Element, Length,
    widget::{Column, Space, button, column, pick_list, row, text, text_input},
};
use uuid::Uuid;

use crate::{
    core::{clock, display, forms::CourseForm},
    gui::{
        Message,
        message::{AssignmentMessage, CourseMessage, DetailMessage},
        state::PaletteChoice,
        widgets::{course_chip, section},
    },
    Planner, PlannerDb,
};

fn course_message(message: CourseMessage) -> Message {
    Message::Course(message)
}

pub fn list(planner: &Planner<PlannerDb>) -> Element<'_, Message> {
    let mut rows = Column::new().spacing(8);

    for course in planner.active_courses() {
        rows = rows.push(
            row![
                course_chip(course.code.clone(), course.color),
                button(text(course.name.as_str()))
                    .style(button::text)
                    .on_press(course_message(CourseMessage::Show(course.id))),
                Space::new().width(Length::Fill),
                button("Edit")
                    .style(button::secondary)
                    .on_press(course_message(CourseMessage::OpenEdit(course.id))),
                button("Complete")
                    .style(button::success)
                    .on_press(course_message(CourseMessage::Complete(course.id))),
            ]
            .spacing(8)
            .align_y(Alignment::Center),
        );
    }

    let completed: Vec<_> = planner.completed_courses().collect();
    if !completed.is_empty() {
        rows = rows.push(text("Completed").size(14));
        for course in completed {
            rows = rows.push(
                row![
                    course_chip(course.code.clone(), course.color),
                    button(text(course.name.as_str()))
                        .style(button::text)
                        .on_press(course_message(CourseMessage::Show(course.id))),
                ]
                .spacing(8)
                .align_y(Alignment::Center),
            );
        }
    }

    if planner.courses().is_empty() {
        rows = rows.push(text("Add a course to get started.").size(13));
    }
    section("Courses", rows)
}

/// Done assignments per course.
pub fn progress(planner: &Planner<PlannerDb>) -> Element<'_, Message> {
    let mut rows = Column::new().spacing(8);
    for entry in planner.course_progress() {
        let titles: Vec<&str> = entry.done.iter().map(|a| a.title.as_str()).collect();
        rows = rows.push(
            column![
                course_chip(
                    format!("{} ({} done)", entry.course.code, entry.done.len()),
                    entry.course.color,
                ),
                text(titles.join(", ")).size(12),
            ]
            .spacing(4),
        );
    }
    section("Progress", rows)
}

pub fn form(editing: Option<Uuid>, form: &CourseForm) -> Element<'_, Message> {
    let title = if editing.is_some() { "Edit Course" } else { "Add Course" };
    let content = column![
        text("Course name"),
        text_input("e.g. Linear Algebra", &form.name)
            .on_input(|v| course_message(CourseMessage::Name(v)))
            .on_submit(course_message(CourseMessage::Submit)),
        text("Course code"),
        text_input("e.g. MATH221", &form.code)
            .on_input(|v| course_message(CourseMessage::Code(v)))
            .on_submit(course_message(CourseMessage::Submit)),
        text("Color"),
        row![
            pick_list(PaletteChoice::all(), PaletteChoice::find(form.color), |choice| {
                course_message(CourseMessage::Color(choice))
            }),
            course_chip(form.color.to_string(), form.color),
        ]
        .spacing(8)
        .align_y(Alignment::Center),
        row![
            button("Save").on_press(course_message(CourseMessage::Submit)),
            button("Cancel")
                .style(button::secondary)
                .on_press(Message::CloseOverlay),
        ]
        .spacing(10),
    ]
    .spacing(8);
    section(title, content)
}

pub fn detail(planner: &Planner<PlannerDb>, id: Uuid) -> Element<'_, Message> {
    let Some(course) = planner.course(id) else {
        return section(
            "Course",
            column![
                text("This course no longer exists."),
                button("Close").on_press(Message::CloseOverlay),
            ]
            .spacing(8),
        );
    };

    let today = clock::today();
    let mut assignments = Column::new().spacing(6);
    for assignment in planner.course_assignments(id) {
        assignments = assignments.push(
            button(
                row![
                    text(assignment.title.as_str()).width(Length::Fill),
                    text(display::relative_due_label(assignment.due_date.date(), today)).size(12),
                    text(assignment.status.label()).size(12),
                ]
                .spacing(10),
            )
            .style(button::secondary)
            .width(Length::Fill)
            .on_press(Message::Detail(DetailMessage::Open(assignment.id))),
        );
    }

    let heading = row![
        course_chip(course.code.clone(), course.color),
        text(course.name.as_str()).size(20),
        Space::new().width(Length::Fill),
        text(format!("{} hours", planner.course_hours(id))).size(13),
    ]
    .spacing(8)
    .align_y(Alignment::Center);

    let mut actions = row![].spacing(10);
    if !course.is_completed {
        actions = actions.push(
            button("Add Assignment")
                .on_press(Message::Assignment(AssignmentMessage::OpenNew(Some(id)))),
        );
    }
    actions = actions.push(
        button("Close")
            .style(button::secondary)
            .on_press(Message::CloseOverlay),
    );

    section("Course", column![heading, assignments, actions].spacing(12))
}
