//! Infrastructure layer - External I/O and persistence

pub mod api;
pub mod config;
pub mod debounce;
pub mod repository;
pub mod store;

pub use api::{ApiClient, AttachmentBlob};
pub use config::Config;
pub use debounce::Debouncer;
pub use repository::{FileSystemRepository, WorkspaceRepository};
pub use store::{ClientState, FileStore, KeyValueStore, MemoryStore};
