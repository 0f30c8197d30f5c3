pub mod catalog;
pub mod config;
pub mod fetch_client;
pub mod models;
pub mod normalizer;
pub mod scheduler;
pub mod stores;
pub mod terms;
pub mod utils;

// Re-export commonly used types
pub use catalog::{CatalogRepository, SqliteCatalog, UpsertOutcome};
pub use config::AppConfig;
pub use scheduler::{CollectionScheduler, PassReport};
pub use stores::StoreRegistry;
pub use utils::error::AppError;
