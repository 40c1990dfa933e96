pub mod file_list;
pub mod help;
pub mod preview;
pub mod selections;
pub mod status_bar;
