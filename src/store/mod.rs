pub mod actions;
pub mod effects;
pub mod models;
pub mod reducer;
pub mod selectors;
pub mod state;
pub mod store;
pub mod stream;
