pub mod track_object;
