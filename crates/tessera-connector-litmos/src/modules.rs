//! Course module syncing.
//!
//! Modules exist only as children of a course; the syncer is active only
//! when module syncing is enabled in configuration.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::instrument;

use tessera_connector::error::ConnectorResult;
use tessera_connector::pagination::{Page, PageToken};
use tessera_connector::resource::{Profile, Resource, ResourceId, ResourceType};
use tessera_connector::traits::ResourceSyncer;

use crate::client::{LitmosClient, LitmosModule};
use crate::resource_types::module_resource_type;

/// Map a Litmos module record to a module resource.
///
/// A module cannot exist detached from a course: with no parent the mapping
/// yields nothing, not an error.
pub(crate) fn module_resource(
    module: &LitmosModule,
    parent: Option<&ResourceId>,
) -> ConnectorResult<Option<Resource>> {
    let Some(parent) = parent else {
        return Ok(None);
    };

    let profile = Profile::new()
        .with("code", module.code.as_str())
        .with("description", module.description.as_str());

    Ok(Some(
        Resource::new(&module_resource_type(), module.id.as_str(), module.name.as_str())?
            .with_parent(parent.clone())
            .with_profile(profile),
    ))
}

/// Syncer for course modules.
pub struct ModuleSyncer {
    client: Arc<LitmosClient>,
}

impl ModuleSyncer {
    pub(crate) fn new(client: Arc<LitmosClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ResourceSyncer for ModuleSyncer {
    fn resource_type(&self) -> ResourceType {
        module_resource_type()
    }

    /// Modules are never listed at the root; a call without a parent course
    /// returns an empty page.
    #[instrument(skip(self))]
    async fn list(
        &self,
        parent: Option<&ResourceId>,
        token: &PageToken,
    ) -> ConnectorResult<Page<Resource>> {
        let Some(parent) = parent else {
            return Ok(Page::empty());
        };

        let (modules, next_token) = self.client.list_modules(&parent.resource, token).await?;

        let mut resources = Vec::with_capacity(modules.len());
        for module in &modules {
            if let Some(resource) = module_resource(module, Some(parent))? {
                resources.push(resource);
            }
        }

        Ok(Page::new(resources, next_token))
    }

    // Modules carry no entitlements or grants; the trait defaults return
    // empty pages.
}
