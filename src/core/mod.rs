pub mod alerts;
pub mod clock;
pub mod db;
pub mod display;
pub mod forms;
pub mod matrix;
pub mod planner;
pub mod stats;
pub mod timer;
