pub mod basics;
pub mod error;
pub mod list;
pub mod task;
pub mod validate;
