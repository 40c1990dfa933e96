pub mod entry;
pub mod listing;
pub mod operations;
pub mod preview;

pub use entry::{list_directory, Entry};
