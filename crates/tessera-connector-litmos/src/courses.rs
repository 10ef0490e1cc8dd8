//! Course syncing, enrollment entitlements, and completion-derived grants.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::instrument;

use tessera_connector::error::ConnectorResult;
use tessera_connector::pagination::{Page, PageToken};
use tessera_connector::resource::{
    Entitlement, Grant, Profile, Resource, ResourceId, ResourceType,
};
use tessera_connector::traits::ResourceSyncer;

use crate::client::{LitmosClient, LitmosCourse};
use crate::resource_types::{
    course_resource_type, user_resource_type, MODULE_TYPE_ID, USER_TYPE_ID,
};

pub(crate) const ASSIGNED_ENTITLEMENT: &str = "assigned";
pub(crate) const COMPLETED_ENTITLEMENT: &str = "completed";
pub(crate) const IN_PROGRESS_ENTITLEMENT: &str = "in_progress";

/// Map a Litmos course record to a course resource.
pub(crate) fn course_resource(
    course: &LitmosCourse,
    parent: Option<&ResourceId>,
    sync_modules: bool,
) -> ConnectorResult<Resource> {
    let profile = Profile::new()
        .with("Id", course.id.as_str())
        .with("Code", course.code.as_str())
        .with("Name", course.name.as_str())
        .with("Active", course.active)
        .with("ForSale", course.for_sale)
        .with("OriginalId", course.original_id.as_str())
        .with("Description", course.description.as_str())
        .with(
            "EcommerceShortDescription",
            course.ecommerce_short_description.as_str(),
        )
        .with(
            "EcommerceLongDescription",
            course.ecommerce_long_description.as_str(),
        )
        .with(
            "CourseCodeForBulkImport",
            course.course_code_for_bulk_import.as_str(),
        )
        .with("Price", course.price.as_str())
        .with("AccessTillDate", course.access_till_date.as_str())
        .with("AccessTillDays", course.access_till_days.as_str())
        .with("CourseTeamLibrary", course.course_team_library)
        .with("CreatedBy", course.created_by.as_str())
        .with("SeqId", course.seq_id.as_str());

    let mut resource =
        Resource::new(&course_resource_type(sync_modules), course.id.as_str(), course.name.as_str())?
        .with_parent_opt(parent.cloned())
        .with_profile(profile);
    if sync_modules {
        resource = resource.with_child_type(MODULE_TYPE_ID);
    }

    Ok(resource)
}

/// Syncer for Litmos courses.
pub struct CourseSyncer {
    client: Arc<LitmosClient>,
    limited_courses: Option<Vec<String>>,
    sync_modules: bool,
}

impl CourseSyncer {
    pub(crate) fn new(
        client: Arc<LitmosClient>,
        limited_courses: Option<Vec<String>>,
        sync_modules: bool,
    ) -> Self {
        Self {
            client,
            limited_courses,
            sync_modules,
        }
    }
}

#[async_trait]
impl ResourceSyncer for CourseSyncer {
    fn resource_type(&self) -> ResourceType {
        course_resource_type(self.sync_modules)
    }

    /// With an allow-list configured, resolves exactly the listed course IDs
    /// by direct lookup and returns them as one unpaginated batch; otherwise
    /// pages through the full course list.
    #[instrument(skip(self))]
    async fn list(
        &self,
        parent: Option<&ResourceId>,
        token: &PageToken,
    ) -> ConnectorResult<Page<Resource>> {
        if let Some(limited) = &self.limited_courses {
            let mut resources = Vec::with_capacity(limited.len());
            for course_id in limited {
                let course = self.client.get_course(course_id).await?;
                resources.push(course_resource(&course, parent, self.sync_modules)?);
            }
            return Ok(Page::end(resources));
        }

        let (courses, next_token) = self.client.list_courses(token).await?;

        let resources = courses
            .iter()
            .map(|course| course_resource(course, parent, self.sync_modules))
            .collect::<ConnectorResult<Vec<_>>>()?;

        Ok(Page::new(resources, next_token))
    }

    async fn entitlements(
        &self,
        resource: &Resource,
        _token: &PageToken,
    ) -> ConnectorResult<Page<Entitlement>> {
        let user_type = user_resource_type();
        let name = &resource.display_name;

        let entitlements = vec![
            Entitlement::assignment(resource, ASSIGNED_ENTITLEMENT)
                .grantable_to(&user_type)
                .with_display_name(format!("Course {name} {ASSIGNED_ENTITLEMENT}"))
                .with_description(format!("Assigned course {name} in Litmos")),
            Entitlement::assignment(resource, COMPLETED_ENTITLEMENT)
                .grantable_to(&user_type)
                .with_display_name(format!("Course {name} {COMPLETED_ENTITLEMENT}"))
                .with_description(format!("Completed course {name} in Litmos")),
            Entitlement::assignment(resource, IN_PROGRESS_ENTITLEMENT)
                .grantable_to(&user_type)
                .with_display_name(format!("Course {name} {IN_PROGRESS_ENTITLEMENT}"))
                .with_description(format!("In progress course {name} in Litmos")),
        ];

        Ok(Page::end(entitlements))
    }

    /// Every enrollee is granted `assigned`, plus exactly one of
    /// `completed` or `in_progress` by their completion flag.
    #[instrument(skip(self, resource), fields(course = %resource.id))]
    async fn grants(
        &self,
        resource: &Resource,
        token: &PageToken,
    ) -> ConnectorResult<Page<Grant>> {
        if let Some(limited) = &self.limited_courses {
            // Stale course resources outside the configured scope get no grants.
            if !limited.iter().any(|id| *id == resource.id.resource) {
                return Ok(Page::empty());
            }
        }

        let (users, next_token) = self
            .client
            .list_course_users(&resource.id.resource, token)
            .await?;

        let mut grants = Vec::with_capacity(users.len() * 2);
        for user in &users {
            let principal = ResourceId::new(USER_TYPE_ID, user.id.as_str());
            grants.push(Grant::new(resource, ASSIGNED_ENTITLEMENT, principal.clone())?);

            let completion = if user.completed {
                COMPLETED_ENTITLEMENT
            } else {
                IN_PROGRESS_ENTITLEMENT
            };
            grants.push(Grant::new(resource, completion, principal)?);
        }

        Ok(Page::new(grants, next_token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_course() -> LitmosCourse {
        LitmosCourse {
            id: "c-9".to_string(),
            code: "SEC-101".to_string(),
            name: "Security Basics".to_string(),
            active: true,
            for_sale: false,
            original_id: "c-1".to_string(),
            description: "Annual training".to_string(),
            ecommerce_short_description: "short".to_string(),
            ecommerce_long_description: "long".to_string(),
            course_code_for_bulk_import: "SEC101".to_string(),
            price: "0".to_string(),
            access_till_date: "2026-12-31".to_string(),
            access_till_days: "365".to_string(),
            course_team_library: true,
            created_by: "admin".to_string(),
            seq_id: "9".to_string(),
        }
    }

    #[test]
    fn test_course_mapping_carries_every_attribute() {
        let course = sample_course();
        let resource = course_resource(&course, None, false).unwrap();

        assert_eq!(resource.id.to_string(), "course:c-9");
        assert_eq!(resource.display_name, "Security Basics");
        assert_eq!(resource.profile.len(), 16);
        assert_eq!(resource.profile.get_str("Code"), Some("SEC-101"));
        assert_eq!(resource.profile.get("Active").unwrap().as_bool(), Some(true));
        assert_eq!(resource.profile.get_str("AccessTillDays"), Some("365"));
        assert_eq!(
            resource.profile.get("CourseTeamLibrary").unwrap().as_bool(),
            Some(true)
        );
        assert!(resource.child_type_ids.is_empty());
    }

    #[test]
    fn test_course_mapping_declares_module_children_when_enabled() {
        let resource = course_resource(&sample_course(), None, true).unwrap();
        assert_eq!(resource.child_type_ids, vec![MODULE_TYPE_ID]);
    }

    #[test]
    fn test_course_without_id_fails_mapping() {
        let course = LitmosCourse::default();
        assert!(course_resource(&course, None, false).is_err());
    }
}
