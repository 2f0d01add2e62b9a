//! Storage layer for the podcast timeline.
//!
//! Provides:
//! - `EpisodeStore` / `AdvertisementStore` traits (the data service contract)
//! - An in-memory store for tests and embedding
//! - A JSON-file store with atomic rewrites

pub mod dataset;
pub mod error;
pub mod json_file;
pub mod memory;
pub mod store;

pub use dataset::Dataset;
pub use error::StoreError;
pub use json_file::JsonFileStore;
pub use memory::InMemoryStore;
pub use store::{AdvertisementStore, EpisodeStore};
