//! Litmos API HTTP client.
//!
//! Thin authenticated wrapper over the Litmos REST API: request shaping,
//! XML decoding, and transient-error classification. The client holds no
//! per-call mutable state, so one instance can serve concurrent syncer
//! calls.

use std::time::Duration;

use reqwest::{header, StatusCode};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, instrument};

use tessera_connector::error::{ConnectorError, ConnectorResult};
use tessera_connector::pagination::PageToken;

use crate::config::LitmosConfig;
use crate::pagination::{next_page_token, page_query};

/// A Litmos user account.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct LitmosUser {
    pub id: String,
    pub user_name: String,
    pub first_name: String,
    pub last_name: String,
    pub active: bool,
    pub email: String,
    pub access_level: String,
    pub brand: String,
}

/// A Litmos team.
///
/// `parent_team_id` is surfaced as a profile attribute only; the API exposes
/// the link but teams are synced flat under the connector root.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct LitmosTeam {
    pub id: String,
    pub name: String,
    pub team_code_for_bulk_import: String,
    pub parent_team_id: String,
}

/// A Litmos course.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct LitmosCourse {
    pub id: String,
    pub code: String,
    pub name: String,
    pub active: bool,
    pub for_sale: bool,
    pub original_id: String,
    pub description: String,
    pub ecommerce_short_description: String,
    pub ecommerce_long_description: String,
    pub course_code_for_bulk_import: String,
    pub price: String,
    pub access_till_date: String,
    pub access_till_days: String,
    pub course_team_library: bool,
    pub created_by: String,
    pub seq_id: String,
}

/// A user's enrollment in one course, including completion state.
///
/// Not a standalone resource; only a grant source.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct LitmosCourseUser {
    pub id: String,
    pub user_name: String,
    pub first_name: String,
    pub last_name: String,
    pub completed: bool,
    pub percentage_complete: f64,
    pub compliant_till: String,
    pub due_date: String,
    pub access_till_date: String,
}

/// A module within a course.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct LitmosModule {
    pub id: String,
    pub code: String,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Default, Deserialize)]
struct UserCollection {
    #[serde(rename = "User", default)]
    users: Vec<LitmosUser>,
}

#[derive(Debug, Default, Deserialize)]
struct TeamCollection {
    #[serde(rename = "Team", default)]
    teams: Vec<LitmosTeam>,
}

#[derive(Debug, Default, Deserialize)]
struct CourseCollection {
    #[serde(rename = "Course", default)]
    courses: Vec<LitmosCourse>,
}

#[derive(Debug, Default, Deserialize)]
struct CourseUserCollection {
    #[serde(rename = "User", default)]
    users: Vec<LitmosCourseUser>,
}

#[derive(Debug, Default, Deserialize)]
struct ModuleCollection {
    #[serde(rename = "Module", default)]
    modules: Vec<LitmosModule>,
}

/// Authenticated Litmos API client.
#[derive(Debug)]
pub struct LitmosClient {
    http: reqwest::Client,
    config: LitmosConfig,
}

impl LitmosClient {
    /// Create a client for the configured tenant.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if the HTTP client cannot be built.
    pub fn new(config: LitmosConfig) -> ConnectorResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                ConnectorError::invalid_configuration(format!("failed to build HTTP client: {e}"))
            })?;

        Ok(Self { http, config })
    }

    /// The configured page size for list requests.
    #[must_use]
    pub fn page_size(&self) -> usize {
        self.config.page_size
    }

    /// Performs a request against `path`, decoding the XML response body.
    ///
    /// Every request carries the `apikey` header, an XML `Accept` header,
    /// and the tenant `source` query parameter. HTTP 503/504 are classified
    /// as transient; other non-2xx statuses propagate as opaque API errors
    /// carrying the status text.
    #[instrument(skip(self, query))]
    async fn request<T: DeserializeOwned>(
        &self,
        method: reqwest::Method,
        path: &str,
        query: &[(&str, String)],
    ) -> ConnectorResult<T> {
        let url = format!("{}{}", self.config.base_url.trim_end_matches('/'), path);
        debug!(%url, "sending request");

        let response = self
            .http
            .request(method, &url)
            .header("apikey", self.config.api_key.expose_secret())
            .header(header::ACCEPT, "application/xml")
            .query(query)
            .query(&[("source", self.config.source.as_str())])
            .send()
            .await
            .map_err(|e| ConnectorError::network_with_source("request failed", e))?;

        let status = response.status();
        if matches!(
            status,
            StatusCode::SERVICE_UNAVAILABLE | StatusCode::GATEWAY_TIMEOUT
        ) {
            // The Litmos API is flaky; give the caller a retryable kind.
            return Err(ConnectorError::unavailable(
                status.as_u16(),
                status.canonical_reason().unwrap_or("unknown status"),
            ));
        }
        if !status.is_success() {
            return Err(ConnectorError::api(
                status.as_u16(),
                status.canonical_reason().unwrap_or("unknown status"),
            ));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ConnectorError::network_with_source("reading response body failed", e))?;

        quick_xml::de::from_str(&body).map_err(|e| ConnectorError::decode(e.to_string()))
    }

    /// Performs a GET, decoding the XML response body.
    async fn get_xml<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ConnectorResult<T> {
        self.request(reqwest::Method::GET, path, query).await
    }

    async fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        token: &PageToken,
    ) -> ConnectorResult<T> {
        let query = page_query(token, self.config.page_size);
        self.get_xml(path, &query).await
    }

    /// Fetch one page of users.
    pub async fn list_users(
        &self,
        token: &PageToken,
    ) -> ConnectorResult<(Vec<LitmosUser>, PageToken)> {
        let resp: UserCollection = self.get_page("/v1.svc/users", token).await?;
        let next = next_page_token(Some(token), resp.users.len(), self.config.page_size);
        Ok((resp.users, next))
    }

    /// Fetch one page of teams.
    pub async fn list_teams(
        &self,
        token: &PageToken,
    ) -> ConnectorResult<(Vec<LitmosTeam>, PageToken)> {
        let resp: TeamCollection = self.get_page("/v1.svc/teams", token).await?;
        let next = next_page_token(Some(token), resp.teams.len(), self.config.page_size);
        Ok((resp.teams, next))
    }

    /// Fetch one page of a team's members.
    pub async fn list_team_users(
        &self,
        team_id: &str,
        token: &PageToken,
    ) -> ConnectorResult<(Vec<LitmosUser>, PageToken)> {
        let path = format!("/v1.svc/teams/{team_id}/users");
        let resp: UserCollection = self.get_page(&path, token).await?;
        let next = next_page_token(Some(token), resp.users.len(), self.config.page_size);
        Ok((resp.users, next))
    }

    /// Fetch one page of courses.
    pub async fn list_courses(
        &self,
        token: &PageToken,
    ) -> ConnectorResult<(Vec<LitmosCourse>, PageToken)> {
        let resp: CourseCollection = self.get_page("/v1.svc/courses", token).await?;
        let next = next_page_token(Some(token), resp.courses.len(), self.config.page_size);
        Ok((resp.courses, next))
    }

    /// Look up a single course by ID.
    pub async fn get_course(&self, course_id: &str) -> ConnectorResult<LitmosCourse> {
        let path = format!("/v1.svc/courses/{course_id}");
        self.get_xml(&path, &[]).await
    }

    /// Fetch one page of a course's enrolled users.
    pub async fn list_course_users(
        &self,
        course_id: &str,
        token: &PageToken,
    ) -> ConnectorResult<(Vec<LitmosCourseUser>, PageToken)> {
        let path = format!("/v1.svc/courses/{course_id}/users");
        let resp: CourseUserCollection = self.get_page(&path, token).await?;
        let next = next_page_token(Some(token), resp.users.len(), self.config.page_size);
        Ok((resp.users, next))
    }

    /// Fetch one page of a course's modules.
    pub async fn list_modules(
        &self,
        course_id: &str,
        token: &PageToken,
    ) -> ConnectorResult<(Vec<LitmosModule>, PageToken)> {
        // The modules endpoint uses a singular path segment.
        let path = format!("/v1.svc/course/{course_id}/modules");
        let resp: ModuleCollection = self.get_page(&path, token).await?;
        let next = next_page_token(Some(token), resp.modules.len(), self.config.page_size);
        Ok((resp.modules, next))
    }

    /// Lightweight credential check: fetch a single user.
    pub async fn ping(&self) -> ConnectorResult<()> {
        let _: UserCollection = self
            .get_xml("/v1.svc/users", &[("limit", "1".to_string())])
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_users() {
        let xml = r#"
            <Users>
              <User>
                <Id>u-1</Id>
                <UserName>alice</UserName>
                <FirstName>Alice</FirstName>
                <LastName>Nguyen</LastName>
                <Active>true</Active>
                <Email>alice@example.com</Email>
                <AccessLevel>Learner</AccessLevel>
                <Brand>acme</Brand>
              </User>
              <User>
                <Id>u-2</Id>
                <UserName>bob</UserName>
                <Active>false</Active>
              </User>
            </Users>"#;

        let parsed: UserCollection = quick_xml::de::from_str(xml).unwrap();
        assert_eq!(parsed.users.len(), 2);
        assert_eq!(parsed.users[0].user_name, "alice");
        assert!(parsed.users[0].active);
        assert_eq!(parsed.users[0].access_level, "Learner");
        // missing elements fall back to defaults
        assert!(!parsed.users[1].active);
        assert_eq!(parsed.users[1].email, "");
    }

    #[test]
    fn test_decode_empty_collection() {
        let parsed: UserCollection = quick_xml::de::from_str("<Users></Users>").unwrap();
        assert!(parsed.users.is_empty());

        let parsed: TeamCollection = quick_xml::de::from_str("<Teams/>").unwrap();
        assert!(parsed.teams.is_empty());
    }

    #[test]
    fn test_decode_teams() {
        let xml = r#"
            <Teams>
              <Team>
                <Id>t-1</Id>
                <Name>Platform</Name>
                <TeamCodeForBulkImport>PLAT</TeamCodeForBulkImport>
                <ParentTeamId>t-0</ParentTeamId>
              </Team>
            </Teams>"#;

        let parsed: TeamCollection = quick_xml::de::from_str(xml).unwrap();
        assert_eq!(parsed.teams.len(), 1);
        assert_eq!(parsed.teams[0].name, "Platform");
        assert_eq!(parsed.teams[0].parent_team_id, "t-0");
    }

    #[test]
    fn test_decode_single_course() {
        let xml = r#"
            <Course>
              <Id>c-9</Id>
              <Code>SEC-101</Code>
              <Name>Security Basics</Name>
              <Active>true</Active>
              <ForSale>false</ForSale>
              <Price>0</Price>
              <CreatedBy>admin</CreatedBy>
              <SeqId>9</SeqId>
            </Course>"#;

        let course: LitmosCourse = quick_xml::de::from_str(xml).unwrap();
        assert_eq!(course.id, "c-9");
        assert_eq!(course.name, "Security Basics");
        assert!(course.active);
        assert!(!course.for_sale);
    }

    #[test]
    fn test_decode_course_users() {
        let xml = r#"
            <Users>
              <User>
                <Id>u-1</Id>
                <UserName>alice</UserName>
                <Completed>true</Completed>
                <PercentageComplete>100</PercentageComplete>
                <DueDate>2026-01-01</DueDate>
              </User>
            </Users>"#;

        let parsed: CourseUserCollection = quick_xml::de::from_str(xml).unwrap();
        assert_eq!(parsed.users.len(), 1);
        assert!(parsed.users[0].completed);
        assert_eq!(parsed.users[0].percentage_complete, 100.0);
        assert_eq!(parsed.users[0].due_date, "2026-01-01");
    }

    #[test]
    fn test_decode_modules() {
        let xml = r#"
            <Modules>
              <Module>
                <Id>m-1</Id>
                <Code>SEC-101-1</Code>
                <Name>Passwords</Name>
                <Description>Intro</Description>
              </Module>
            </Modules>"#;

        let parsed: ModuleCollection = quick_xml::de::from_str(xml).unwrap();
        assert_eq!(parsed.modules.len(), 1);
        assert_eq!(parsed.modules[0].name, "Passwords");
    }

    #[test]
    fn test_decode_malformed_body_fails() {
        let result: Result<UserCollection, _> = quick_xml::de::from_str("<Users><User>");
        assert!(result.is_err());
    }
}
