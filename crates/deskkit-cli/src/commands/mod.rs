pub mod bank;
pub mod expenses;
pub mod todo;
