//! Litmos connector facade.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, instrument};

use tessera_connector::error::ConnectorResult;
use tessera_connector::traits::{Connector, ConnectorMetadata, ResourceSyncer};

use crate::client::LitmosClient;
use crate::config::LitmosConfig;
use crate::courses::CourseSyncer;
use crate::modules::ModuleSyncer;
use crate::teams::TeamSyncer;
use crate::users::UserSyncer;

/// Read-only discovery connector for the Litmos LMS.
pub struct LitmosConnector {
    client: Arc<LitmosClient>,
    limited_courses: Option<Vec<String>>,
    sync_modules: bool,
}

impl LitmosConnector {
    /// Create a connector from validated configuration.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` when the configuration is incomplete
    /// or the HTTP client cannot be built.
    pub fn new(config: LitmosConfig) -> ConnectorResult<Self> {
        config.validate()?;

        let limited_courses = config.limited_courses.clone();
        let sync_modules = config.sync_modules;
        let client = Arc::new(LitmosClient::new(config)?);

        info!(
            sync_modules,
            limited_courses = limited_courses.as_ref().map_or(0, Vec::len),
            "litmos connector ready"
        );

        Ok(Self {
            client,
            limited_courses,
            sync_modules,
        })
    }
}

#[async_trait]
impl Connector for LitmosConnector {
    fn metadata(&self) -> ConnectorMetadata {
        ConnectorMetadata {
            display_name: "Litmos".to_string(),
            description: "Syncs users, teams, courses, and course modules from Litmos"
                .to_string(),
        }
    }

    /// Exercises the API key with a single-user fetch so bad credentials
    /// fail before a sync starts.
    #[instrument(skip(self))]
    async fn validate(&self) -> ConnectorResult<()> {
        self.client.ping().await
    }

    fn resource_syncers(&self) -> Vec<Box<dyn ResourceSyncer>> {
        let mut syncers: Vec<Box<dyn ResourceSyncer>> = vec![
            Box::new(UserSyncer::new(Arc::clone(&self.client))),
            Box::new(TeamSyncer::new(Arc::clone(&self.client))),
            Box::new(CourseSyncer::new(
                Arc::clone(&self.client),
                self.limited_courses.clone(),
                self.sync_modules,
            )),
        ];
        if self.sync_modules {
            syncers.push(Box::new(ModuleSyncer::new(Arc::clone(&self.client))));
        }
        syncers
    }
}
