use iced::{
    Border, Element, Length, Theme, border,
    widget::{
        button, column, container,
        container::{Style, bordered_box},
        row, text,
    },
};

use crate::{core::display::contrasting_text, models::Color};

pub fn iced_color(color: Color) -> iced::Color {
    iced::Color::from_rgb8(color.r, color.g, color.b)
}

/// Solid background in the course color with readable text on top.
pub fn course_style(color: Color) -> impl Fn(&Theme) -> Style {
    move |_theme: &Theme| Style {
        background: Some(iced_color(color).into()),
        text_color: Some(iced_color(contrasting_text(color))),
        border: Border {
            radius: 4.0.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Button filled with `color`, dimmed while hovered or pressed.
pub fn filled_button(color: Color) -> impl Fn(&Theme, button::Status) -> button::Style {
    move |_theme, status| {
        let background = match status {
            button::Status::Hovered | button::Status::Pressed => {
                iced_color(color).scale_alpha(0.8)
            }
            button::Status::Disabled => iced_color(color).scale_alpha(0.4),
            _ => iced_color(color),
        };
        button::Style {
            background: Some(background.into()),
            text_color: iced_color(contrasting_text(color)),
            border: Border {
                radius: 4.0.into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

/// Highlighted panel border, used when the timer chimes.
pub fn flash_style(active: bool) -> impl Fn(&Theme) -> Style {
    move |theme: &Theme| {
        let style = bordered_box(theme);
        if active {
            style.border(border::width(3).color(theme.palette().primary))
        } else {
            style
        }
    }
}

/// Banner background: the weak danger shade for errors, weak success otherwise.
pub fn notice_style(error: bool) -> impl Fn(&Theme) -> Style {
    move |theme: &Theme| {
        let palette = theme.extended_palette();
        let pair = if error {
            palette.danger.weak
        } else {
            palette.success.weak
        };
        Style {
            background: Some(pair.color.into()),
            text_color: Some(pair.text),
            border: Border {
                radius: 4.0.into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

pub fn course_chip<'a, Message: 'a>(label: String, color: Color) -> Element<'a, Message> {
    container(text(label).size(13))
        .padding([2, 8])
        .style(course_style(color))
        .into()
}

pub fn stat_card<'a, Message: 'a>(
    title: &'a str,
    value: String,
    subtitle: Option<&'a str>,
) -> Element<'a, Message> {
    let mut content = column![text(title).size(13), text(value).size(26)].spacing(4);
    if let Some(subtitle) = subtitle {
        content = content.push(text(subtitle).size(12));
    }
    container(content)
        .padding(12)
        .width(Length::Fill)
        .style(bordered_box)
        .into()
}

pub fn section<'a, Message: 'a>(
    title: &'a str,
    content: impl Into<Element<'a, Message>>,
) -> Element<'a, Message> {
    container(column![text(title).size(18), content.into()].spacing(10))
        .padding(12)
        .width(Length::Fill)
        .style(bordered_box)
        .into()
}

/// Sidebar on the left, main content taking the remaining width.
pub fn layout<'a, Message>(
    sidebar: impl Into<Element<'a, Message>>,
    main_content: impl Into<Element<'a, Message>>,
) -> Element<'a, Message>
where
    Message: 'a,
{
    row![
        container(sidebar.into()).width(Length::FillPortion(2)),
        container(main_content.into()).width(Length::FillPortion(3)),
    ]
    .spacing(16)
    .height(Length::Fill)
    .into()
}
