pub mod achievements;
pub mod quiz;
pub mod scoring;
pub mod shop;
pub mod state;
pub mod store;
