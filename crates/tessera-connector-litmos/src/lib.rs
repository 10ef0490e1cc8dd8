//! Litmos LMS connector for tessera
//!
//! This crate implements the tessera-connector traits for the Litmos
//! learning-management platform, discovering users, teams, courses, and
//! (optionally) course modules and expressing them as a
//! resource/entitlement/grant graph.
//!
//! # Features
//!
//! - API-key authenticated XML API client with offset-cursor pagination
//! - Team membership grants
//! - Course enrollment grants derived from per-user completion state
//! - Optional course-ID allow-list restricting sync scope
//! - Optional module syncing (modules appear as course children)
//!
//! The connector is read-only: it never provisions or mutates anything in
//! Litmos, and it holds no state between calls beyond the page cursors the
//! host engine threads through.
//!
//! # Example
//!
//! ```no_run
//! use tessera_connector::traits::{Connector, ResourceSyncer};
//! use tessera_connector_litmos::{LitmosConfig, LitmosConnector};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = LitmosConfig::new("your-api-key", "your-source")
//!     .with_sync_modules(true);
//!
//! let connector = LitmosConnector::new(config)?;
//! connector.validate().await?;
//!
//! for syncer in connector.resource_syncers() {
//!     println!("syncing {}", syncer.resource_type().display_name);
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod connector;
mod courses;
mod modules;
mod pagination;
mod resource_types;
mod teams;
mod users;

// Re-exports
pub use client::{
    LitmosClient, LitmosCourse, LitmosCourseUser, LitmosModule, LitmosTeam, LitmosUser,
};
pub use config::{LitmosConfig, DEFAULT_BASE_URL, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
pub use connector::LitmosConnector;
pub use courses::CourseSyncer;
pub use modules::ModuleSyncer;
pub use pagination::{next_page_token, page_query};
pub use resource_types::{
    course_resource_type, module_resource_type, team_resource_type, user_resource_type,
    COURSE_TYPE_ID, MODULE_TYPE_ID, TEAM_TYPE_ID, USER_TYPE_ID,
};
pub use teams::TeamSyncer;
pub use users::UserSyncer;
