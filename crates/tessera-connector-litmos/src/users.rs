//! User syncing.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::instrument;

use tessera_connector::error::ConnectorResult;
use tessera_connector::pagination::{Page, PageToken};
use tessera_connector::resource::{
    Profile, Resource, ResourceId, ResourceType, UserDetail, UserStatus,
};
use tessera_connector::traits::ResourceSyncer;

use crate::client::{LitmosClient, LitmosUser};
use crate::resource_types::user_resource_type;

/// Map a Litmos user record to a user resource.
pub(crate) fn user_resource(
    user: &LitmosUser,
    parent: Option<&ResourceId>,
) -> ConnectorResult<Resource> {
    let profile = Profile::new()
        .with("first_name", user.first_name.as_str())
        .with("last_name", user.last_name.as_str())
        .with("user_id", user.id.as_str())
        .with("brand", user.brand.as_str())
        .with("access_level", user.access_level.as_str());

    let status = if user.active {
        UserStatus::Enabled
    } else {
        UserStatus::Disabled
    };

    Ok(Resource::new(&user_resource_type(), user.id.as_str(), user.user_name.as_str())?
        .with_parent_opt(parent.cloned())
        .with_profile(profile)
        .with_user_detail(UserDetail {
            login: user.user_name.clone(),
            email: Some(user.email.clone()),
            status,
        }))
}

/// Syncer for Litmos user accounts.
pub struct UserSyncer {
    client: Arc<LitmosClient>,
}

impl UserSyncer {
    pub(crate) fn new(client: Arc<LitmosClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ResourceSyncer for UserSyncer {
    fn resource_type(&self) -> ResourceType {
        user_resource_type()
    }

    #[instrument(skip(self))]
    async fn list(
        &self,
        parent: Option<&ResourceId>,
        token: &PageToken,
    ) -> ConnectorResult<Page<Resource>> {
        let (users, next_token) = self.client.list_users(token).await?;

        let resources = users
            .iter()
            .map(|user| user_resource(user, parent))
            .collect::<ConnectorResult<Vec<_>>>()?;

        Ok(Page::new(resources, next_token))
    }

    // Users carry no entitlements or grants; the trait defaults return
    // empty pages.
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> LitmosUser {
        LitmosUser {
            id: "u-1".to_string(),
            user_name: "alice".to_string(),
            first_name: "Alice".to_string(),
            last_name: "Nguyen".to_string(),
            active: true,
            email: "alice@example.com".to_string(),
            access_level: "Learner".to_string(),
            brand: "acme".to_string(),
        }
    }

    #[test]
    fn test_user_mapping_round_trips_profile() {
        let user = sample_user();
        let resource = user_resource(&user, None).unwrap();

        assert_eq!(resource.id.to_string(), "user:u-1");
        assert_eq!(resource.display_name, "alice");
        assert_eq!(resource.profile.get_str("first_name"), Some("Alice"));
        assert_eq!(resource.profile.get_str("last_name"), Some("Nguyen"));
        assert_eq!(resource.profile.get_str("brand"), Some("acme"));
        assert_eq!(resource.profile.get_str("access_level"), Some("Learner"));

        let detail = resource.user.unwrap();
        assert_eq!(detail.login, "alice");
        assert_eq!(detail.email.as_deref(), Some("alice@example.com"));
        assert_eq!(detail.status, UserStatus::Enabled);
    }

    #[test]
    fn test_inactive_user_is_disabled() {
        let user = LitmosUser {
            active: false,
            ..sample_user()
        };
        let resource = user_resource(&user, None).unwrap();
        assert_eq!(resource.user.unwrap().status, UserStatus::Disabled);
    }

    #[test]
    fn test_user_without_id_fails_mapping() {
        let user = LitmosUser {
            id: String::new(),
            ..sample_user()
        };
        assert!(user_resource(&user, None).is_err());
    }
}
