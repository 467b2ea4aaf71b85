pub mod clipboard;
pub mod file;
