//! Litmos connector configuration.

use secrecy::SecretString;
use tessera_connector::error::{ConnectorError, ConnectorResult};

/// Production Litmos API endpoint. Only reachable over TLS.
pub const DEFAULT_BASE_URL: &str = "https://api.litmos.com";

/// Default page size for list requests.
///
/// The Litmos API accepts page sizes up to 1,000; the default stays well
/// below that ceiling. Tunable via [`LitmosConfig::with_page_size`].
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// Largest page size the Litmos API accepts.
pub const MAX_PAGE_SIZE: usize = 1000;

/// Configuration for the Litmos connector.
///
/// The API key is held as a [`SecretString`] so it never appears in `Debug`
/// output or logs.
#[derive(Debug)]
pub struct LitmosConfig {
    /// API key sent with every request.
    pub(crate) api_key: SecretString,
    /// Tenant identifier sent as the `source` query parameter.
    pub(crate) source: String,
    /// Optional course-ID allow-list restricting sync scope.
    pub(crate) limited_courses: Option<Vec<String>>,
    /// Whether course modules are synced as child resources.
    pub(crate) sync_modules: bool,
    /// Base API endpoint; overridable for tests against a mock server.
    pub(crate) base_url: String,
    /// Page size for list requests.
    pub(crate) page_size: usize,
}

impl LitmosConfig {
    /// Create a configuration with the required credentials.
    pub fn new(api_key: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::from(api_key.into()),
            source: source.into(),
            limited_courses: None,
            sync_modules: false,
            base_url: DEFAULT_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Restrict syncing to the given course IDs.
    ///
    /// An empty list leaves the connector unrestricted.
    #[must_use]
    pub fn with_limited_courses(mut self, course_ids: Vec<String>) -> Self {
        self.limited_courses = if course_ids.is_empty() {
            None
        } else {
            Some(course_ids)
        };
        self
    }

    /// Enable syncing course modules as child resources.
    #[must_use]
    pub fn with_sync_modules(mut self, enabled: bool) -> Self {
        self.sync_modules = enabled;
        self
    }

    /// Override the API endpoint. Intended for tests against a mock server.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the list-request page size.
    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Validate the configuration, failing fast before any syncer is built.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` on a missing credential or source, a
    /// malformed base URL, or an out-of-range page size.
    pub fn validate(&self) -> ConnectorResult<()> {
        use secrecy::ExposeSecret;

        if self.api_key.expose_secret().is_empty() {
            return Err(ConnectorError::invalid_configuration("api key is required"));
        }
        if self.source.is_empty() {
            return Err(ConnectorError::invalid_configuration("source is required"));
        }
        url::Url::parse(&self.base_url).map_err(|e| {
            ConnectorError::invalid_configuration(format!("invalid base url: {e}"))
        })?;
        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(ConnectorError::invalid_configuration(format!(
                "page size must be between 1 and {MAX_PAGE_SIZE}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = LitmosConfig::new("key", "acme");
        assert_eq!(config.source, "acme");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert!(config.limited_courses.is_none());
        assert!(!config.sync_modules);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_requires_credentials() {
        let missing_key = LitmosConfig::new("", "acme");
        assert!(missing_key.validate().is_err());

        let missing_source = LitmosConfig::new("key", "");
        assert!(missing_source.validate().is_err());
    }

    #[test]
    fn test_config_rejects_bad_base_url() {
        let config = LitmosConfig::new("key", "acme").with_base_url("not a url");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_page_size_bounds() {
        let zero = LitmosConfig::new("key", "acme").with_page_size(0);
        assert!(zero.validate().is_err());

        let over = LitmosConfig::new("key", "acme").with_page_size(MAX_PAGE_SIZE + 1);
        assert!(over.validate().is_err());

        let max = LitmosConfig::new("key", "acme").with_page_size(MAX_PAGE_SIZE);
        assert!(max.validate().is_ok());
    }

    #[test]
    fn test_empty_allow_list_is_unrestricted() {
        let config = LitmosConfig::new("key", "acme").with_limited_courses(Vec::new());
        assert!(config.limited_courses.is_none());

        let config =
            LitmosConfig::new("key", "acme").with_limited_courses(vec!["c1".to_string()]);
        assert_eq!(config.limited_courses.as_deref(), Some(&["c1".to_string()][..]));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = LitmosConfig::new("super-secret", "acme");
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
    }
}
