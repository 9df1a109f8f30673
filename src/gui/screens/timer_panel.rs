use iced::{
    Alignment, Element, Length, Theme,
    widget::{button, column, container, pick_list, progress_bar, row, text, text_input},
};

use crate::{
    core::{alerts::NotificationPermission, timer::TimerMode},
    gui::{
        AppState, Message,
        message::TimerMessage,
        state::TargetChoice,
        theme::TIMER_THEMES,
        widgets::{filled_button, flash_style, iced_color},
    },
    Planner, PlannerDb,
};

fn target_choices(planner: &Planner<PlannerDb>) -> Vec<TargetChoice> {
    let mut choices = vec![TargetChoice::general()];
    for target in planner.session_targets() {
        choices.extend(target.assignments.iter().map(|a| TargetChoice {
            id: Some(a.id),
            label: format!("{} - {}", target.course.code, a.title),
        }));
    }
    choices
}

fn timer_message(message: TimerMessage) -> Message {
    Message::Timer(message)
}

pub fn view<'a>(state: &'a AppState, planner: &'a Planner<PlannerDb>) -> Element<'a, Message> {
    let timer = &state.timer;
    let accent = state.timer_theme.accent(timer.mode());

    let modes = row(TimerMode::ALL.map(|mode| {
        let style: fn(&Theme, button::Status) -> button::Style = if mode == timer.mode() {
            button::primary
        } else {
            button::secondary
        };
        button(text(mode.label()))
            .style(style)
            .on_press_maybe(
                (!timer.is_running()).then_some(timer_message(TimerMessage::SwitchMode(mode))),
            )
            .into()
    }))
    .spacing(8);

    let controls = row![
        button(if timer.is_running() { "Pause" } else { "Start" })
            .style(filled_button(accent))
            .on_press(timer_message(TimerMessage::Toggle)),
        button("Reset")
            .style(button::secondary)
            .on_press(timer_message(TimerMessage::Reset)),
    ]
    .spacing(8);

    let choices = target_choices(planner);
    let selected = choices
        .iter()
        .find(|c| c.id == timer.selected_assignment())
        .cloned();
    let target = pick_list(choices, selected, |choice| {
        timer_message(TimerMessage::SelectTarget(choice))
    })
    .placeholder("General study")
    .width(Length::Fill);

    let durations = row![
        duration_input("Focus", &state.durations.focus, TimerMessage::FocusMinutes),
        duration_input("Short", &state.durations.short_break, TimerMessage::ShortBreakMinutes),
        duration_input("Long", &state.durations.long_break, TimerMessage::LongBreakMinutes),
        button("Apply")
            .style(button::secondary)
            .on_press(timer_message(TimerMessage::ApplyDurations)),
    ]
    .spacing(8)
    .align_y(Alignment::End);

    let theme = row![
        text("Theme").size(12),
        pick_list(TIMER_THEMES.to_vec(), Some(state.timer_theme), |theme| {
            timer_message(TimerMessage::Theme(theme))
        }),
    ]
    .spacing(8)
    .align_y(Alignment::Center);

    let mut content = column![
        modes,
        text(timer.display()).size(56).color(iced_color(accent)),
        progress_bar(0.0..=1.0, timer.progress()),
        controls,
    ]
    .spacing(10)
    .align_x(Alignment::Center);

    if state.alerts.permission() == NotificationPermission::Default {
        content = content.push(
            column![
                text("Get an alert when your timer finishes!").size(13),
                button("Enable Notifications")
                    .style(button::secondary)
                    .on_press(timer_message(TimerMessage::RequestPermission)),
            ]
            .spacing(6)
            .align_x(Alignment::Center),
        );
    }

    let content = content
        .push(text("Studying"))
        .push(target)
        .push(text(format!("Completed pomodoros: {}", timer.completed_focus_count())).size(13))
        .push(durations)
        .push(theme);

    container(content)
        .padding(12)
        .width(Length::Fill)
        .style(flash_style(state.alerts.sink().flash))
        .into()
}

fn duration_input<'a>(
    label: &'a str,
    value: &'a str,
    on_input: fn(String) -> TimerMessage,
) -> Element<'a, Message> {
    column![
        text(label).size(12),
        text_input("min", value)
            .on_input(move |v| timer_message(on_input(v)))
            .on_submit(timer_message(TimerMessage::ApplyDurations))
            .width(Length::Fixed(60.0)),
    ]
    .spacing(2)
    .into()
}
