//! Resource, entitlement, and grant types.
//!
//! These are the output shapes every resource syncer produces: discovered
//! entities, the capabilities scoped to them, and the assertions that a
//! principal holds a capability.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ConnectorError, ConnectorResult};

/// Behavioral trait markers for a resource type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceTrait {
    /// Resources of this type represent people who can hold grants.
    User,
    /// Resources of this type represent collections of users.
    Group,
}

/// A type of resource discovered from a target system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceType {
    /// Stable identifier, e.g. "user".
    pub id: String,
    /// Human-readable name, e.g. "User".
    pub display_name: String,
    /// Trait markers for this type.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub traits: Vec<ResourceTrait>,
    /// When true, the host engine skips the entitlement and grant phases
    /// for resources of this type entirely.
    #[serde(default)]
    pub skip_entitlements_and_grants: bool,
    /// Resource types that may appear as children of this type.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub child_type_ids: Vec<String>,
}

impl ResourceType {
    /// Create a new resource type.
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            traits: Vec::new(),
            skip_entitlements_and_grants: false,
            child_type_ids: Vec::new(),
        }
    }

    /// Add a trait marker.
    #[must_use]
    pub fn with_trait(mut self, t: ResourceTrait) -> Self {
        self.traits.push(t);
        self
    }

    /// Mark this type as having no entitlements or grants.
    #[must_use]
    pub fn skip_entitlements_and_grants(mut self) -> Self {
        self.skip_entitlements_and_grants = true;
        self
    }

    /// Declare a child resource type.
    #[must_use]
    pub fn with_child_type(mut self, child_type_id: impl Into<String>) -> Self {
        self.child_type_ids.push(child_type_id.into());
        self
    }
}

/// Identifier of a resource: its type plus its id within that type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceId {
    /// The resource type id, e.g. "user".
    pub resource_type_id: String,
    /// The resource's id within its type.
    pub resource: String,
}

impl ResourceId {
    /// Create a resource id.
    pub fn new(resource_type_id: impl Into<String>, resource: impl Into<String>) -> Self {
        Self {
            resource_type_id: resource_type_id.into(),
            resource: resource.into(),
        }
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.resource_type_id, self.resource)
    }
}

/// A single profile attribute value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProfileValue {
    String(String),
    Bool(bool),
    Int(i64),
    Float(f64),
}

impl ProfileValue {
    /// Get as a string if this is a string value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ProfileValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get as a boolean if this is a boolean value.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ProfileValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<String> for ProfileValue {
    fn from(s: String) -> Self {
        ProfileValue::String(s)
    }
}

impl From<&str> for ProfileValue {
    fn from(s: &str) -> Self {
        ProfileValue::String(s.to_string())
    }
}

impl From<bool> for ProfileValue {
    fn from(b: bool) -> Self {
        ProfileValue::Bool(b)
    }
}

impl From<i64> for ProfileValue {
    fn from(i: i64) -> Self {
        ProfileValue::Int(i)
    }
}

impl From<f64> for ProfileValue {
    fn from(f: f64) -> Self {
        ProfileValue::Float(f)
    }
}

/// Structured attribute bag attached to a resource.
///
/// Insertion order is preserved so profiles serialize deterministically.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Profile(Vec<(String, ProfileValue)>);

impl Profile {
    /// Create an empty profile.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an attribute, replacing any existing value under the same key.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<ProfileValue>) {
        let key = key.into();
        let value = value.into();
        if let Some(entry) = self.0.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
        } else {
            self.0.push((key, value));
        }
    }

    /// Set an attribute using builder pattern.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ProfileValue>) -> Self {
        self.set(key, value);
        self
    }

    /// Get an attribute value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ProfileValue> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Get a string attribute.
    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(ProfileValue::as_str)
    }

    /// Number of attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check whether the profile has no attributes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over attributes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ProfileValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Enabled/disabled state carried by the user trait.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Enabled,
    Disabled,
}

/// User-specific details attached to a User-typed resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDetail {
    /// Login name in the target system.
    pub login: String,
    /// Primary email address, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Account status.
    pub status: UserStatus,
}

/// A discovered entity exposed to the governance host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    /// Identifier, unique within its resource type.
    pub id: ResourceId,
    /// Human-readable name.
    pub display_name: String,
    /// Parent resource, set at creation and never changed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<ResourceId>,
    /// Structured source-specific attributes.
    #[serde(default, skip_serializing_if = "Profile::is_empty")]
    pub profile: Profile,
    /// User detail, present only on User-typed resources.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserDetail>,
    /// Child resource types this specific resource may contain.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub child_type_ids: Vec<String>,
}

impl Resource {
    /// Create a resource of the given type.
    ///
    /// # Errors
    ///
    /// Returns `InvalidResource` when the identifier is empty; a record
    /// without an id cannot be addressed by the host engine.
    pub fn new(
        resource_type: &ResourceType,
        id: impl Into<String>,
        display_name: impl Into<String>,
    ) -> ConnectorResult<Self> {
        let id = id.into();
        if id.is_empty() {
            return Err(ConnectorError::invalid_resource(format!(
                "empty identifier for resource type '{}'",
                resource_type.id
            )));
        }
        Ok(Self {
            id: ResourceId::new(resource_type.id.clone(), id),
            display_name: display_name.into(),
            parent_id: None,
            profile: Profile::new(),
            user: None,
            child_type_ids: Vec::new(),
        })
    }

    /// Set the parent resource.
    #[must_use]
    pub fn with_parent(mut self, parent_id: ResourceId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    /// Set the parent resource if one was supplied.
    #[must_use]
    pub fn with_parent_opt(mut self, parent_id: Option<ResourceId>) -> Self {
        self.parent_id = parent_id;
        self
    }

    /// Attach the profile.
    #[must_use]
    pub fn with_profile(mut self, profile: Profile) -> Self {
        self.profile = profile;
        self
    }

    /// Attach user detail.
    #[must_use]
    pub fn with_user_detail(mut self, detail: UserDetail) -> Self {
        self.user = Some(detail);
        self
    }

    /// Declare that this resource contains children of the given type.
    #[must_use]
    pub fn with_child_type(mut self, child_type_id: impl Into<String>) -> Self {
        self.child_type_ids.push(child_type_id.into());
        self
    }
}

/// A named capability scoped to one resource, grantable to principals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entitlement {
    /// The resource this entitlement is scoped to.
    pub resource_id: ResourceId,
    /// Stable slug, e.g. "member" or "assigned".
    pub slug: String,
    /// Human-readable name.
    pub display_name: String,
    /// Human-readable description.
    pub description: String,
    /// Resource type ids this entitlement can be granted to.
    pub grantable_to: Vec<String>,
}

impl Entitlement {
    /// Create an assignment entitlement on a resource.
    ///
    /// Display name defaults to "<resource> <slug>"; override with the
    /// builder methods.
    pub fn assignment(resource: &Resource, slug: impl Into<String>) -> Self {
        let slug = slug.into();
        Self {
            resource_id: resource.id.clone(),
            display_name: format!("{} {}", resource.display_name, slug),
            description: String::new(),
            slug,
            grantable_to: Vec::new(),
        }
    }

    /// Set the display name.
    #[must_use]
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Allow granting to the given resource type.
    #[must_use]
    pub fn grantable_to(mut self, resource_type: &ResourceType) -> Self {
        self.grantable_to.push(resource_type.id.clone());
        self
    }
}

/// An assertion that a principal holds an entitlement on a resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grant {
    /// The resource the entitlement is scoped to.
    pub resource_id: ResourceId,
    /// The entitlement slug.
    pub entitlement: String,
    /// The principal holding the entitlement.
    pub principal_id: ResourceId,
}

impl Grant {
    /// Create a grant of `entitlement` on `resource` to `principal`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidResource` when the principal id is empty; a grant
    /// must resolve to an existing principal resource.
    pub fn new(
        resource: &Resource,
        entitlement: impl Into<String>,
        principal_id: ResourceId,
    ) -> ConnectorResult<Self> {
        if principal_id.resource.is_empty() {
            return Err(ConnectorError::invalid_resource(format!(
                "empty principal for grant on {}",
                resource.id
            )));
        }
        Ok(Self {
            resource_id: resource.id.clone(),
            entitlement: entitlement.into(),
            principal_id,
        })
    }
}
