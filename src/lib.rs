/*
 * EnterMedia client - session-based Rust client for the EnterMedia asset database
 */

// Internal modules
mod client;
pub mod models;
mod apis;
mod asset;
mod auth;
mod config;
mod error;
mod storage;
mod validation;

// Re-export public types and interfaces
pub use client::EnterMediaClient;
pub use models::*;
pub use apis::AssetApi;
pub use asset::{Asset, AssetRecord};
pub use config::{load_env_file, ClientConfig, ConfigProvider, SharedConfig, DEFAULT_TIMEOUT};
pub use error::{EnterMediaError, EnterMediaResult};
pub use storage::{FileSystem, LocalFileSystem};
pub use validation::UploadRule;

// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        EnterMediaClient,
        ClientConfig, SharedConfig,
        EnterMediaError, EnterMediaResult,
        Asset, AssetRecord, LocalFileSystem, UploadRule,
        // Common model types
        Metadata, SearchQuery, SearchResults, SearchTerm, UploadedAsset,
    };
}
