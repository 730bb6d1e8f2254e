pub mod file;
pub mod index;

pub use file::file_service;
pub use index::index_handler;
