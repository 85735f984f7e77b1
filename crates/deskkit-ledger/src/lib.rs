pub mod bank;
pub mod error;
pub mod expenses;

mod source;
