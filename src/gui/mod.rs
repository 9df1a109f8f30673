//! Desktop dashboard built on iced.

mod app;
mod message;
mod screens;
mod state;
mod theme;
mod widgets;

use std::path::PathBuf;

use iced::{Size, window};

pub use app::StudyDeskApp;
pub use message::Message;
pub use state::AppState;

use crate::config::AppConfig;

/// Open the dashboard window and block until it is closed.
pub fn run(data_file: PathBuf, config: AppConfig, config_path: PathBuf) -> anyhow::Result<()> {
    tracing::info!(path = ?data_file, "starting dashboard");
    iced::application(
        move || StudyDeskApp::new(data_file.clone(), config.clone(), config_path.clone()),
        StudyDeskApp::update,
        StudyDeskApp::view,
    )
    .title(StudyDeskApp::title)
    .subscription(StudyDeskApp::subscription)
    .window(window::Settings {
        size: Size::new(1280.0, 820.0),
        min_size: Some(Size::new(960.0, 600.0)),
        ..Default::default()
    })
    .run()?;
    Ok(())
}
