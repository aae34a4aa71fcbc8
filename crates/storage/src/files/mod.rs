//! Filesystem-backed catalog and lesson content.

mod catalog_file;
mod content_dir;

pub use catalog_file::JsonCatalogFile;
pub use content_dir::ContentDir;
