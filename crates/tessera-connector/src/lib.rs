//! # Connector Framework
//!
//! Core abstractions for discovering identity data from external systems
//! and expressing it as a resource/entitlement/grant graph for the tessera
//! governance engine.
//!
//! ## Architecture
//!
//! A connector exposes one [`ResourceSyncer`](traits::ResourceSyncer) per
//! resource type. The engine drives each syncer through a fixed protocol:
//!
//! 1. `list` - enumerate resources, one page at a time
//! 2. `entitlements` - the capabilities scoped to each resource
//! 3. `grants` - which principals hold those capabilities
//!
//! Pagination state lives entirely in the opaque
//! [`PageToken`](pagination::PageToken) the engine threads through repeated
//! calls, so every call is pure and replayable. Errors carry a
//! transient/permanent classification so the engine knows which calls are
//! worth retrying with the same token.
//!
//! ## Crate Organization
//!
//! - [`error`] - Error types with transient/permanent classification
//! - [`pagination`] - Opaque page tokens and result pages
//! - [`resource`] - Resource, entitlement, and grant types
//! - [`traits`] - The `ResourceSyncer` and `Connector` traits

pub mod error;
pub mod pagination;
pub mod resource;
pub mod traits;

/// Prelude module for convenient imports.
///
/// ```
/// use tessera_connector::prelude::*;
/// ```
pub mod prelude {
    // Error handling
    pub use crate::error::{ConnectorError, ConnectorResult};

    // Pagination
    pub use crate::pagination::{Page, PageToken};

    // Resource model
    pub use crate::resource::{
        Entitlement, Grant, Profile, ProfileValue, Resource, ResourceId, ResourceTrait,
        ResourceType, UserDetail, UserStatus,
    };

    // Traits
    pub use crate::traits::{Connector, ConnectorMetadata, ResourceSyncer};
}

// Re-export async_trait for connector implementors
pub use async_trait::async_trait;
