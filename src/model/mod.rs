pub mod employee;
pub mod log_entry;
