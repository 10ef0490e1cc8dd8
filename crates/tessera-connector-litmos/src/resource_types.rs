//! Resource type definitions for the Litmos connector.

use tessera_connector::resource::{ResourceTrait, ResourceType};

pub const USER_TYPE_ID: &str = "user";
pub const TEAM_TYPE_ID: &str = "team";
pub const COURSE_TYPE_ID: &str = "course";
pub const MODULE_TYPE_ID: &str = "module";

/// The user resource type. Users hold grants but carry none of their own.
#[must_use]
pub fn user_resource_type() -> ResourceType {
    ResourceType::new(USER_TYPE_ID, "User")
        .with_trait(ResourceTrait::User)
        .skip_entitlements_and_grants()
}

/// The team resource type.
#[must_use]
pub fn team_resource_type() -> ResourceType {
    ResourceType::new(TEAM_TYPE_ID, "Team").with_trait(ResourceTrait::Group)
}

/// The course resource type. Declares module children only when module
/// syncing is enabled.
#[must_use]
pub fn course_resource_type(sync_modules: bool) -> ResourceType {
    let rt = ResourceType::new(COURSE_TYPE_ID, "Course");
    if sync_modules {
        rt.with_child_type(MODULE_TYPE_ID)
    } else {
        rt
    }
}

/// The module resource type. Modules exist only as children of a course.
#[must_use]
pub fn module_resource_type() -> ResourceType {
    ResourceType::new(MODULE_TYPE_ID, "Module").skip_entitlements_and_grants()
}
