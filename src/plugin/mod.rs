pub mod console;
pub mod file;
pub mod file_name;
