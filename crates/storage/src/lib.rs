#![forbid(unsafe_code)]

pub mod files;
pub mod repository;
pub mod sqlite;

pub use repository::{
    CatalogRepository, ContentRepository, InMemoryRepository, KeyValueStore, Storage,
    StorageError,
};
