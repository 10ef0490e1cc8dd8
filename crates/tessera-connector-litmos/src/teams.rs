//! Team syncing and membership grants.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::instrument;

use tessera_connector::error::ConnectorResult;
use tessera_connector::pagination::{Page, PageToken};
use tessera_connector::resource::{
    Entitlement, Grant, Profile, Resource, ResourceId, ResourceType,
};
use tessera_connector::traits::ResourceSyncer;

use crate::client::{LitmosClient, LitmosTeam};
use crate::resource_types::{team_resource_type, user_resource_type, USER_TYPE_ID};

pub(crate) const MEMBER_ENTITLEMENT: &str = "member";

/// Map a Litmos team record to a group resource.
///
/// The parent-team id is stored as a profile attribute only; teams sync
/// flat under the connector root.
pub(crate) fn team_resource(
    team: &LitmosTeam,
    parent: Option<&ResourceId>,
) -> ConnectorResult<Resource> {
    let profile = Profile::new()
        .with("code_for_bulk_import", team.team_code_for_bulk_import.as_str())
        .with("parent_team_id", team.parent_team_id.as_str());

    Ok(Resource::new(&team_resource_type(), team.id.as_str(), team.name.as_str())?
        .with_parent_opt(parent.cloned())
        .with_profile(profile))
}

/// Syncer for Litmos teams.
pub struct TeamSyncer {
    client: Arc<LitmosClient>,
}

impl TeamSyncer {
    pub(crate) fn new(client: Arc<LitmosClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ResourceSyncer for TeamSyncer {
    fn resource_type(&self) -> ResourceType {
        team_resource_type()
    }

    #[instrument(skip(self))]
    async fn list(
        &self,
        parent: Option<&ResourceId>,
        token: &PageToken,
    ) -> ConnectorResult<Page<Resource>> {
        let (teams, next_token) = self.client.list_teams(token).await?;

        let resources = teams
            .iter()
            .map(|team| team_resource(team, parent))
            .collect::<ConnectorResult<Vec<_>>>()?;

        Ok(Page::new(resources, next_token))
    }

    async fn entitlements(
        &self,
        resource: &Resource,
        _token: &PageToken,
    ) -> ConnectorResult<Page<Entitlement>> {
        let member = Entitlement::assignment(resource, MEMBER_ENTITLEMENT)
            .grantable_to(&user_resource_type())
            .with_display_name(format!(
                "Team {} {MEMBER_ENTITLEMENT}",
                resource.display_name
            ))
            .with_description(format!("Member of team {} in Litmos", resource.display_name));

        Ok(Page::end(vec![member]))
    }

    /// Membership grants are independent of a member's active flag.
    #[instrument(skip(self, resource), fields(team = %resource.id))]
    async fn grants(
        &self,
        resource: &Resource,
        token: &PageToken,
    ) -> ConnectorResult<Page<Grant>> {
        let (users, next_token) = self
            .client
            .list_team_users(&resource.id.resource, token)
            .await?;

        let grants = users
            .iter()
            .map(|user| {
                Grant::new(
                    resource,
                    MEMBER_ENTITLEMENT,
                    ResourceId::new(USER_TYPE_ID, user.id.as_str()),
                )
            })
            .collect::<ConnectorResult<Vec<_>>>()?;

        Ok(Page::new(grants, next_token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_mapping_keeps_parent_link_as_profile_only() {
        let team = LitmosTeam {
            id: "t-2".to_string(),
            name: "Platform".to_string(),
            team_code_for_bulk_import: "PLAT".to_string(),
            parent_team_id: "t-1".to_string(),
        };

        let resource = team_resource(&team, None).unwrap();
        assert_eq!(resource.id.to_string(), "team:t-2");
        assert_eq!(resource.display_name, "Platform");
        // the parent-team link stays a profile attribute, not a resource parent
        assert_eq!(resource.parent_id, None);
        assert_eq!(resource.profile.get_str("parent_team_id"), Some("t-1"));
        assert_eq!(resource.profile.get_str("code_for_bulk_import"), Some("PLAT"));
    }

    #[test]
    fn test_team_without_id_fails_mapping() {
        let team = LitmosTeam::default();
        assert!(team_resource(&team, None).is_err());
    }
}
