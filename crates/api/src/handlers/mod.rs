pub mod course;
pub mod schedule;
