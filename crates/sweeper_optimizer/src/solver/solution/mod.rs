pub mod assignment;
pub mod schedule;
