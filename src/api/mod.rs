pub mod employee;
pub mod health;
pub mod time_log;
