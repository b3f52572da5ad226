pub mod log_entry;
pub mod project;
