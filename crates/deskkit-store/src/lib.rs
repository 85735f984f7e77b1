pub mod error;
pub mod lockfile;
pub mod persist;
pub mod query;
pub mod task_store;
