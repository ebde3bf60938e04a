pub mod player;
pub mod queue;
