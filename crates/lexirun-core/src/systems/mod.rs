pub mod collision;
pub mod spawn;
pub mod track;
