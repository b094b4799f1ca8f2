//! Uploaded-file storage adapters

pub mod local_file_store;

pub use local_file_store::LocalFileStore;
