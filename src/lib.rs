pub mod app;
pub mod generator;
pub mod git;
pub mod patch;
pub mod types;
pub mod ui;
