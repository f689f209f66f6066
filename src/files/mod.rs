pub mod file;
pub mod resize;
