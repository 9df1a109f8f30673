pub mod assignments;
pub mod courses;
pub mod dashboard;
pub mod loading_page;
pub mod matrix;
pub mod timer_panel;
