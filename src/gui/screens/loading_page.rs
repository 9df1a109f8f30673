use iced::{
    Element, Length,
    widget::{column, container, text},
};

use crate::gui::{AppState, Message};

pub fn view(state: &AppState) -> Element<'_, Message> {
    let content = match &state.load_error {
        None => column![text("Loading...")],
        Some(error) => column![
            text("Could not open the planner").size(24),
            text(format!("{}", state.data_file.display())).size(13),
            text(error.as_str()),
        ]
        .spacing(10),
    };

    container(content)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}
