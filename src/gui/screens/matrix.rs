use iced::{
    Element, Length,
    widget::{Column, Row, button, column, container, text},
};

use crate::{
    core::{clock, display},
    gui::{Message, message::DetailMessage, widgets::{filled_button, section}},
    models::Priority,
    Planner, PlannerDb,
};

const LABEL_WIDTH: f32 = 70.0;

pub fn view(planner: &Planner<PlannerDb>) -> Element<'_, Message> {
    let today = clock::today();
    let matrix = planner.weekly_matrix(today);

    let mut header = Row::new()
        .spacing(6)
        .push(container(text("")).width(Length::Fixed(LABEL_WIDTH)));
    for (index, day) in matrix.days().iter().enumerate() {
        let label = if index == 0 {
            "Today".to_string()
        } else {
            display::short_day(*day)
        };
        header = header.push(container(text(label).size(13)).width(Length::FillPortion(1)));
    }

    let mut grid = Column::new().spacing(8).push(header);
    for priority in Priority::ALL {
        let mut cells = Row::new()
            .spacing(6)
            .push(container(text(priority.label()).size(13)).width(Length::Fixed(LABEL_WIDTH)));
        for day in 0..matrix.days().len() {
            let entries = matrix.bucket(day, priority).iter().map(|assignment| {
                let color = planner
                    .course(assignment.course_id)
                    .map(|c| c.color)
                    .unwrap_or_default();
                button(text(assignment.title.clone()).size(12))
                    .width(Length::Fill)
                    .style(filled_button(color))
                    .on_press(Message::Detail(DetailMessage::Open(assignment.id)))
                    .into()
            });
            cells = cells.push(
                container(column(entries).spacing(4))
                    .width(Length::FillPortion(1))
                    .padding(2),
            );
        }
        grid = grid.push(cells);
    }

    let content: Element<'_, Message> = if matrix.is_empty() {
        column![grid, text("Nothing due in the next seven days.").size(13)]
            .spacing(12)
            .into()
    } else {
        grid.into()
    };
    section("This Week", content)
}
