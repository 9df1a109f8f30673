use std::{path::PathBuf, sync::Arc, time::Duration};

use iced::{Element, Subscription, Task, time};

use super::{
    Message,
    message::{AssignmentMessage, CourseMessage, DetailMessage, TimerMessage},
    screens,
    state::{AppState, DurationInputs, Notice, Overlay},
};
use crate::{
    config::AppConfig,
    core::{
        clock,
        db::flush,
        alerts::NotificationPermission,
        forms::{AssignmentForm, CourseForm, DetailView, FormError},
        timer::{TimerEvent, TimerMode},
    },
    Planner, PlannerDb, PlannerError,
};

pub struct StudyDeskApp {
    state: AppState,
    /// Serializes store flushes; tokio's mutex is FIFO, so writes land in
    /// the order they were queued.
    write_gate: Arc<tokio::sync::Mutex<()>>,
}

fn show_overlay(overlay: &mut Overlay, notice: &mut Option<Notice>, next: Overlay) {
    if let Err(e) = overlay.replace(next) {
        *notice = Some(Notice::error(e.to_string()));
    }
}

async fn load_planner(path: PathBuf) -> Result<Planner<PlannerDb>, String> {
    let store = PlannerDb::open(&path).await.map_err(|e| format!("{e:#}"))?;
    Planner::load(store).await.map_err(|e| format!("{e:#}"))
}

impl StudyDeskApp {
    pub fn new(data_file: PathBuf, config: AppConfig, config_path: PathBuf) -> (Self, Task<Message>) {
        let load = Task::perform(load_planner(data_file.clone()), Message::Loaded);
        let app = Self {
            state: AppState::new(data_file, config, config_path),
            write_gate: Arc::default(),
        };
        (app, load)
    }

    pub fn title(&self) -> String {
        let timer = &self.state.timer;
        if timer.is_running() {
            format!("{} {} - Study Desk", timer.display(), timer.mode())
        } else {
            "Study Desk".to_string()
        }
    }

    pub fn subscription(&self) -> Subscription<Message> {
        let tick = if self.state.timer.is_running() {
            time::every(Duration::from_secs(1)).map(|_| Message::Tick)
        } else {
            Subscription::none()
        };
        let notice = if self.state.notice.is_some() {
            time::every(Duration::from_secs(6)).map(|_| Message::DismissNotice)
        } else {
            Subscription::none()
        };
        Subscription::batch([tick, notice])
    }

    pub fn view(&self) -> Element<'_, Message> {
        match &self.state.planner {
            Some(planner) => screens::dashboard::view(&self.state, planner),
            None => screens::loading_page::view(&self.state),
        }
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Loaded(Ok(planner)) => {
                self.state.planner = Some(planner);
                Task::none()
            }
            Message::Loaded(Err(e)) => {
                tracing::error!(error = %e, path = ?self.state.data_file, "failed to load planner");
                self.state.load_error = Some(e);
                Task::none()
            }
            Message::Saved(Ok(())) => Task::none(),
            Message::Saved(Err(e)) => {
                tracing::error!(error = %e, "failed to save planner");
                self.state.notice = Some(Notice::error(format!("Could not save changes: {e}")));
                Task::none()
            }
            Message::Tick => self.on_tick(),
            Message::Timer(message) => self.on_timer(message),
            Message::Course(message) => self.on_course(message),
            Message::Assignment(message) => self.on_assignment(message),
            Message::Detail(message) => self.on_detail(message),
            Message::OpenReset => {
                self.show(Overlay::ConfirmReset);
                Task::none()
            }
            Message::ConfirmReset => {
                let Some(planner) = self.state.planner.as_mut() else {
                    return Task::none();
                };
                if let Err(e) = planner.reset(true) {
                    return self.fail(e);
                }
                self.state.timer.select_assignment(None);
                self.state.overlay = Overlay::None;
                self.state.notice = Some(Notice::info("Planner has been reset successfully."));
                self.persist()
            }
            Message::CloseOverlay => {
                self.show(Overlay::None);
                Task::none()
            }
            Message::DismissNotice => {
                self.state.notice = None;
                Task::none()
            }
        }
    }

    /// Replace the side panel. Refused with a notice while an assignment
    /// detail has an unsaved status.
    fn show(&mut self, next: Overlay) {
        show_overlay(&mut self.state.overlay, &mut self.state.notice, next);
    }

    /// Hand queued writes to a background flush.
    fn persist(&mut self) -> Task<Message> {
        let Some(planner) = self.state.planner.as_mut() else {
            return Task::none();
        };
        let writes = planner.take_pending();
        if writes.is_empty() {
            return Task::none();
        }
        let store = planner.store().clone();
        let gate = Arc::clone(&self.write_gate);
        Task::perform(
            async move {
                let _guard = gate.lock().await;
                flush(&store, writes).await.map_err(|e| format!("{e:#}"))
            },
            Message::Saved,
        )
    }

    fn fail(&mut self, error: impl Into<PlannerError>) -> Task<Message> {
        let error = error.into();
        tracing::debug!(%error, "change rejected");
        self.state.notice = Some(Notice::error(error.to_string()));
        Task::none()
    }

    fn on_tick(&mut self) -> Task<Message> {
        let Some(event) = self.state.timer.tick() else {
            return Task::none();
        };
        if let Some(notification) = self.state.alerts.on_timer_event(&event) {
            self.state.notice = Some(Notice::info(format!(
                "{} {}",
                notification.title, notification.body
            )));
        }

        let TimerEvent::Completed { session, .. } = event;
        let Some(session) = session else {
            return Task::none();
        };
        let started_at = self.state.focus_started.take().unwrap_or_else(clock::now);
        let Some(planner) = self.state.planner.as_mut() else {
            return Task::none();
        };
        if let Err(e) = planner.record_session(session, started_at) {
            return self.fail(e);
        }
        self.persist()
    }

    fn on_timer(&mut self, message: TimerMessage) -> Task<Message> {
        let timer = &mut self.state.timer;
        self.state.alerts.sink_mut().flash = false;
        match message {
            TimerMessage::Toggle => {
                timer.toggle();
                if timer.is_running()
                    && timer.mode() == TimerMode::Focus
                    && self.state.focus_started.is_none()
                {
                    self.state.focus_started = Some(clock::now());
                }
            }
            TimerMessage::Reset => {
                timer.reset();
                self.state.focus_started = None;
            }
            TimerMessage::SwitchMode(mode) => {
                if let Err(e) = timer.switch_mode(mode) {
                    return self.fail(e);
                }
                self.state.focus_started = None;
            }
            TimerMessage::SelectTarget(choice) => timer.select_assignment(choice.id),
            TimerMessage::FocusMinutes(value) => self.state.durations.focus = value,
            TimerMessage::ShortBreakMinutes(value) => self.state.durations.short_break = value,
            TimerMessage::LongBreakMinutes(value) => self.state.durations.long_break = value,
            TimerMessage::RequestPermission => {
                let notice = match self.state.alerts.request_permission() {
                    NotificationPermission::Granted => Notice::info("Notifications enabled."),
                    _ => Notice::error(
                        "Notifications are turned off. Set `notifications = true` in the config file.",
                    ),
                };
                self.state.notice = Some(notice);
            }
            TimerMessage::Theme(theme) => {
                self.state.timer_theme = theme;
                self.state.config.timer_theme = Some(theme.name.to_string());
                if let Err(e) = self.state.config.save_to_file(&self.state.config_path) {
                    tracing::warn!(error = %e, "could not store timer theme");
                }
            }
            TimerMessage::ApplyDurations => {
                let Some(durations) = self.state.durations.parse() else {
                    self.state.notice = Some(Notice::error("Durations must be whole minutes."));
                    return Task::none();
                };
                if let Err(e) = timer.set_durations(durations) {
                    return self.fail(e);
                }
                self.state.focus_started = None;
                self.state.durations = DurationInputs::from_durations(durations);
                self.state.config.timer = durations;
                if let Err(e) = self.state.config.save_to_file(&self.state.config_path) {
                    tracing::warn!(error = %e, "could not store timer durations");
                }
            }
        }
        Task::none()
    }

    fn on_course(&mut self, message: CourseMessage) -> Task<Message> {
        let Some(planner) = self.state.planner.as_mut() else {
            return Task::none();
        };
        match message {
            CourseMessage::OpenNew => {
                show_overlay(
                    &mut self.state.overlay,
                    &mut self.state.notice,
                    Overlay::CourseForm {
                        editing: None,
                        form: CourseForm::default(),
                    },
                );
            }
            CourseMessage::OpenEdit(id) => {
                if let Some(course) = planner.course(id) {
                    show_overlay(
                        &mut self.state.overlay,
                        &mut self.state.notice,
                        Overlay::CourseForm {
                            editing: Some(id),
                            form: CourseForm::from_course(course),
                        },
                    );
                }
            }
            CourseMessage::Show(id) => {
                show_overlay(
                    &mut self.state.overlay,
                    &mut self.state.notice,
                    Overlay::CourseDetail(id),
                );
            }
            CourseMessage::Name(value) => {
                if let Overlay::CourseForm { form, .. } = &mut self.state.overlay {
                    form.name = value;
                }
            }
            CourseMessage::Code(value) => {
                if let Overlay::CourseForm { form, .. } = &mut self.state.overlay {
                    form.code = value;
                }
            }
            CourseMessage::Color(choice) => {
                if let Overlay::CourseForm { form, .. } = &mut self.state.overlay {
                    form.color = choice.color;
                }
            }
            CourseMessage::Submit => {
                let Overlay::CourseForm { editing, form } = &self.state.overlay else {
                    return Task::none();
                };
                let result = match editing {
                    None => form
                        .validate()
                        .map_err(PlannerError::from)
                        .and_then(|course| planner.add_course(course)),
                    Some(id) => form
                        .validate_update()
                        .map_err(PlannerError::from)
                        .and_then(|update| planner.update_course(*id, update)),
                };
                match result {
                    Ok(_) => self.state.overlay = Overlay::None,
                    Err(e) => return self.fail(e),
                }
            }
            CourseMessage::Complete(id) => match planner.complete_course(id) {
                Ok(completion) => {
                    self.state.notice = Some(Notice::info(completion.message()));
                }
                Err(e) => return self.fail(e),
            },
        }
        self.persist()
    }

    fn on_assignment(&mut self, message: AssignmentMessage) -> Task<Message> {
        let Some(planner) = self.state.planner.as_mut() else {
            return Task::none();
        };
        match message {
            AssignmentMessage::OpenNew(course) => {
                let form = AssignmentForm::new(planner.courses(), course);
                show_overlay(
                    &mut self.state.overlay,
                    &mut self.state.notice,
                    Overlay::assignment_form(None, form),
                );
            }
            AssignmentMessage::OpenEdit(id) => {
                if let Some(assignment) = planner.assignment(id) {
                    let form = AssignmentForm::from_assignment(assignment);
                    show_overlay(
                        &mut self.state.overlay,
                        &mut self.state.notice,
                        Overlay::assignment_form(Some(id), form),
                    );
                }
            }
            AssignmentMessage::Submit => {
                let Overlay::AssignmentForm {
                    editing,
                    form,
                    hours,
                    ..
                } = &mut self.state.overlay
                else {
                    return Task::none();
                };
                let result = match hours.trim().parse::<f64>() {
                    Err(_) => Err(PlannerError::from(FormError::InvalidHours)),
                    Ok(value) => {
                        form.estimated_hours = value;
                        match editing {
                            None => form
                                .validate(planner.courses())
                                .map_err(PlannerError::from)
                                .and_then(|assignment| planner.add_assignment(assignment)),
                            Some(id) => form
                                .validate_update(planner.courses())
                                .map_err(PlannerError::from)
                                .and_then(|update| planner.update_assignment(*id, update)),
                        }
                    }
                };
                match result {
                    Ok(_) => self.state.overlay = Overlay::None,
                    Err(e) => return self.fail(e),
                }
            }
            field => {
                if let Overlay::AssignmentForm {
                    form,
                    hours,
                    description,
                    ..
                } = &mut self.state.overlay
                {
                    match field {
                        AssignmentMessage::Title(value) => form.title = value,
                        AssignmentMessage::Course(choice) => form.course_id = Some(choice.id),
                        AssignmentMessage::Description(action) => {
                            description.perform(action);
                            form.description = description.text();
                        }
                        AssignmentMessage::DueDate(value) => form.due_date = value,
                        AssignmentMessage::Priority(value) => form.priority = value,
                        AssignmentMessage::Hours(value) => *hours = value,
                        _ => {}
                    }
                }
            }
        }
        self.persist()
    }

    fn on_detail(&mut self, message: DetailMessage) -> Task<Message> {
        let Some(planner) = self.state.planner.as_mut() else {
            return Task::none();
        };
        match message {
            DetailMessage::Open(id) => {
                if let Some(assignment) = planner.assignment(id) {
                    show_overlay(
                        &mut self.state.overlay,
                        &mut self.state.notice,
                        Overlay::AssignmentDetail(DetailView::open(assignment)),
                    );
                }
            }
            DetailMessage::SetStatus(status) => {
                if let Overlay::AssignmentDetail(view) = &mut self.state.overlay {
                    view.set_status(status);
                }
            }
            DetailMessage::Discard => {
                if let Overlay::AssignmentDetail(view) = &mut self.state.overlay {
                    view.discard();
                }
            }
            DetailMessage::Save => {
                if !matches!(self.state.overlay, Overlay::AssignmentDetail(_)) {
                    return Task::none();
                }
                let Overlay::AssignmentDetail(view) = std::mem::take(&mut self.state.overlay)
                else {
                    return Task::none();
                };
                if let Some((id, status)) = view.save() {
                    if let Err(e) = planner.set_assignment_status(id, status) {
                        return self.fail(e);
                    }
                }
            }
            DetailMessage::Close => return self.update(Message::CloseOverlay),
        }
        self.persist()
    }
}
