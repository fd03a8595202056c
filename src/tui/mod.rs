pub mod app;
pub mod edit;
pub mod facade;
pub mod handlers;
pub mod ui;
