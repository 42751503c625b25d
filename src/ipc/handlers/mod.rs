pub mod admissions;
pub mod classes;
mod common;
pub mod core;
pub mod dashboard;
pub mod events;
pub mod fees;
pub mod logs;
pub mod notifications;
pub mod salaries;
pub mod session;
pub mod students;
pub mod teachers;
