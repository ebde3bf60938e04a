pub mod audio;
pub mod game;
pub mod types;
