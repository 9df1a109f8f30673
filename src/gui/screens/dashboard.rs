use iced::{
    Alignment, Element, Length,
    widget::{Space, button, column, container, row, scrollable, text},
};

use super::{assignments, courses, matrix, timer_panel};
use crate::{
    core::clock,
    gui::{
        AppState, Message,
        message::{AssignmentMessage, CourseMessage},
        state::{Notice, NoticeKind, Overlay},
        widgets::{layout, notice_style, section, stat_card},
    },
    Planner, PlannerDb,
};

pub fn view<'a>(state: &'a AppState, planner: &'a Planner<PlannerDb>) -> Element<'a, Message> {
    let add_assignment = (!planner.courses().is_empty())
        .then_some(Message::Assignment(AssignmentMessage::OpenNew(None)));
    let header = row![
        text("Study Desk").size(28),
        Space::new().width(Length::Fill),
        button("Add Course").on_press(Message::Course(CourseMessage::OpenNew)),
        button("Add Assignment").on_press_maybe(add_assignment),
        button("Reset").style(button::danger).on_press(Message::OpenReset),
    ]
    .spacing(10)
    .align_y(Alignment::Center);

    let mut page = column![header].spacing(16).padding(20);
    if let Some(notice) = &state.notice {
        page = page.push(notice_banner(notice));
    }
    page = page.push(stats_row(planner));

    let sidebar = column![
        timer_panel::view(state, planner),
        courses::list(planner),
        courses::progress(planner),
    ]
    .spacing(16);

    let main: Element<'a, Message> = match &state.overlay {
        Overlay::None => matrix::view(planner),
        Overlay::CourseForm { editing, form } => courses::form(*editing, form),
        Overlay::CourseDetail(id) => courses::detail(planner, *id),
        Overlay::AssignmentForm {
            editing,
            form,
            hours,
            description,
        } => assignments::form(planner, *editing, form, hours, description),
        Overlay::AssignmentDetail(view) => assignments::detail(planner, view),
        Overlay::ConfirmReset => confirm_reset(),
    };

    page.push(layout(scrollable(sidebar), scrollable(main))).into()
}

fn stats_row<'a>(planner: &Planner<PlannerDb>) -> Element<'a, Message> {
    let stats = planner.stats(clock::local_now());
    row![
        stat_card(
            "Total Hours Completed",
            format!("{} hrs", stats.hours_completed),
            stats.milestone().map(|m| m.subtitle),
        ),
        stat_card(
            "Study Hours Remaining",
            format!("{} hrs", stats.remaining_study_hours),
            None,
        ),
        stat_card("Due This Week", stats.due_this_week.to_string(), None),
        stat_card("Overdue", stats.overdue.to_string(), None),
    ]
    .spacing(12)
    .into()
}

fn notice_banner(notice: &Notice) -> Element<'_, Message> {
    let error = notice.kind == NoticeKind::Error;
    container(
        row![
            text(notice.text.as_str()).width(Length::Fill),
            button("Dismiss").style(button::text).on_press(Message::DismissNotice),
        ]
        .align_y(Alignment::Center),
    )
    .padding(10)
    .width(Length::Fill)
    .style(notice_style(error))
    .into()
}

fn confirm_reset<'a>() -> Element<'a, Message> {
    section(
        "Reset Planner",
        column![
            text(
                "This action cannot be undone. All of your courses, assignments, \
                 and study session data will be permanently deleted."
            ),
            row![
                button("Delete Everything")
                    .style(button::danger)
                    .on_press(Message::ConfirmReset),
                button("Cancel")
                    .style(button::secondary)
                    .on_press(Message::CloseOverlay),
            ]
            .spacing(10),
        ]
        .spacing(12),
    )
}
