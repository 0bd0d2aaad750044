pub mod calculations;
pub mod schedule;

pub use schedule::SchedulerEngine;
