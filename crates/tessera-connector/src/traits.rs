//! Connector framework traits
//!
//! The List → Entitlements → Grants contract every resource syncer
//! implements, and the connector-level facade the host engine drives.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ConnectorResult;
use crate::pagination::{Page, PageToken};
use crate::resource::{Entitlement, Grant, Resource, ResourceId, ResourceType};

/// Synchronizes one resource type from a target system.
///
/// All three operations are stateless between calls: the only state is the
/// page token the caller threads through repeated invocations, so the caller
/// may retry any call with the same token, or drive different syncers
/// concurrently.
#[async_trait]
pub trait ResourceSyncer: Send + Sync {
    /// The resource type this syncer produces.
    fn resource_type(&self) -> ResourceType;

    /// Fetch one page of resources.
    ///
    /// `parent` scopes the listing for child resource types; syncers for
    /// root-level types ignore it. An empty `next_token` on the returned
    /// page means the collection is exhausted.
    async fn list(
        &self,
        parent: Option<&ResourceId>,
        token: &PageToken,
    ) -> ConnectorResult<Page<Resource>>;

    /// Compute the entitlements scoped to `resource`.
    ///
    /// Always a single unpaginated batch derived from static rules; types
    /// with no entitlements return an empty page, not an error.
    async fn entitlements(
        &self,
        resource: &Resource,
        token: &PageToken,
    ) -> ConnectorResult<Page<Entitlement>> {
        let _ = (resource, token);
        Ok(Page::empty())
    }

    /// Derive one page of grants for `resource`.
    ///
    /// Types with no grants return an empty page, not an error.
    async fn grants(
        &self,
        resource: &Resource,
        token: &PageToken,
    ) -> ConnectorResult<Page<Grant>> {
        let _ = (resource, token);
        Ok(Page::empty())
    }
}

/// Connector-level metadata reported to the host engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectorMetadata {
    /// Human-readable connector name.
    pub display_name: String,
    /// Short description of what the connector syncs.
    pub description: String,
}

/// A connector aggregates the syncers for every active resource type.
#[async_trait]
pub trait Connector: Send + Sync {
    /// Metadata about this connector.
    fn metadata(&self) -> ConnectorMetadata;

    /// Check that the connector is usable, exercising any credentials
    /// against the target system so misconfiguration fails fast.
    async fn validate(&self) -> ConnectorResult<()>;

    /// The syncers for every resource type this connector is configured
    /// to sync.
    fn resource_syncers(&self) -> Vec<Box<dyn ResourceSyncer>>;
}
