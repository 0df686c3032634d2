pub mod crew;
pub mod scheduling_problem;
pub mod start_time_domain;
pub mod vehicle;
pub mod work_order;
