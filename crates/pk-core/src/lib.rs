//! photokeep/crates/pk-core/src/lib.rs
//!
//! The central domain logic and interface definitions for photokeep:
//! models, ports, the ownership guard, and the photo ingestion and
//! retrieval services. Storage and persistence backends live in plugin
//! crates that implement the ports defined here.

pub mod models;
pub mod traits;
pub mod error;
pub mod layout;
pub mod naming;
pub mod thumbnail;
pub mod guard;
pub mod ingest;
pub mod retrieval;

#[cfg(test)]
pub(crate) mod testutil;

// Re-exporting for easier access in other crates
pub use models::*;
pub use traits::*;
pub use error::*;
pub use layout::{ArtifactKind, StorageLocation};
pub use guard::OwnershipGuard;
pub use ingest::PhotoIngestionPipeline;
pub use retrieval::PhotoRetrievalService;
