pub mod change_crew;
pub mod change_start_time;
pub mod local_search;
pub mod r#move;
pub mod neighborhood;
pub mod swap;
