mod file_service;

pub use file_service::{delete_file_record, internal_file_id, internal_file_path, FileService};
