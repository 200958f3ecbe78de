//! Client configuration
//!
//! Static configuration consumed by the client: API location, request
//! headers, credentials, scopes, token cache lifetime, page size and the
//! transport settings. Loaded from YAML with serde defaults for every
//! field, optionally overlaid with environment variables.

use crate::error::{Error, Result};
use crate::pagination::PageCountPolicy;
use crate::projection;
use crate::types::{JsonValue, OptionStringExt, ScopeSet};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::time::Duration;

/// Default API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.vimeo.com";

/// Default `Accept` header (API version 3.4)
pub const DEFAULT_ACCEPT: &str = "application/vnd.vimeo.*+json; version=3.4";

/// Default `Content-Type` header
pub const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// Default page size assumed when an envelope omits `per_page`
pub const DEFAULT_PER_PAGE: u64 = 25;

/// Default token cache lifetime in minutes (one day)
pub const DEFAULT_CACHE_MINUTES: u64 = 60 * 24;

/// Environment variable holding the OAuth client id
pub const ENV_CLIENT_ID: &str = "VIMEO_CLIENT_ID";

/// Environment variable holding the OAuth client secret
pub const ENV_CLIENT_SECRET: &str = "VIMEO_CLIENT_SECRET";

/// Environment variable holding a personal access token
pub const ENV_ACCESS_TOKEN: &str = "VIMEO_ACCESS_TOKEN";

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete client configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct VimeoConfig {
    /// Base URL for API requests
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Client-credentials token endpoint (defaults to `<base>/oauth/authorize/client`)
    #[serde(default)]
    pub authorize_url: Option<String>,

    /// Headers sent with every request
    #[serde(default)]
    pub headers: HeaderConfig,

    /// How the client obtains its credential
    #[serde(default)]
    pub auth_method: AuthMethod,

    /// OAuth application id
    #[serde(default)]
    pub client_id: Option<String>,

    /// OAuth application secret
    #[serde(default)]
    pub client_secret: Option<String>,

    /// Pre-issued access token
    #[serde(default)]
    pub access_token: Option<String>,

    /// Scopes held (or requested, for the OAuth flow)
    #[serde(default)]
    pub scopes: ScopeSet,

    /// Token cache lifetime in minutes
    #[serde(default = "default_cache_minutes")]
    pub cache_minutes: u64,

    /// Page size assumed when a listing omits `per_page`
    #[serde(default = "default_per_page")]
    pub per_page: u64,

    /// How the number of extra pages is derived from `total / per_page`
    #[serde(default)]
    pub page_count_policy: PageCountPolicy,

    /// Transport settings
    #[serde(default)]
    pub http: HttpConfig,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_cache_minutes() -> u64 {
    DEFAULT_CACHE_MINUTES
}

fn default_per_page() -> u64 {
    DEFAULT_PER_PAGE
}

impl Default for VimeoConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            authorize_url: None,
            headers: HeaderConfig::default(),
            auth_method: AuthMethod::default(),
            client_id: None,
            client_secret: None,
            access_token: None,
            scopes: ScopeSet::new(),
            cache_minutes: DEFAULT_CACHE_MINUTES,
            per_page: DEFAULT_PER_PAGE,
            page_count_policy: PageCountPolicy::default(),
            http: HttpConfig::default(),
        }
    }
}

impl fmt::Debug for VimeoConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VimeoConfig")
            .field("base_url", &self.base_url)
            .field("authorize_url", &self.authorize_url)
            .field("headers", &self.headers)
            .field("auth_method", &self.auth_method)
            .field("client_id", &self.client_id)
            .field("client_secret", &self.client_secret.as_ref().map(|_| "***"))
            .field("access_token", &self.access_token.as_ref().map(|_| "***"))
            .field("scopes", &self.scopes)
            .field("cache_minutes", &self.cache_minutes)
            .field("per_page", &self.per_page)
            .field("page_count_policy", &self.page_count_policy)
            .field("http", &self.http)
            .finish()
    }
}

impl VimeoConfig {
    /// Parse a configuration from YAML
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("Failed to read config file {}: {e}", path.display()))
        })?;
        Self::from_yaml_str(&contents)
    }

    /// Overlay credentials from `VIMEO_CLIENT_ID`, `VIMEO_CLIENT_SECRET`
    /// and `VIMEO_ACCESS_TOKEN`
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Overlay credentials from an arbitrary lookup; empty values are ignored
    #[must_use]
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(id) = lookup(ENV_CLIENT_ID).none_if_empty() {
            self.client_id = Some(id);
        }
        if let Some(secret) = lookup(ENV_CLIENT_SECRET).none_if_empty() {
            self.client_secret = Some(secret);
        }
        if let Some(token) = lookup(ENV_ACCESS_TOKEN).none_if_empty() {
            self.access_token = Some(token);
        }
        self
    }

    /// Check values that serde cannot
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.base_url)
            .map_err(|e| Error::invalid_value("base_url", e.to_string()))?;
        if let Some(authorize_url) = &self.authorize_url {
            url::Url::parse(authorize_url)
                .map_err(|e| Error::invalid_value("authorize_url", e.to_string()))?;
        }
        if self.per_page == 0 {
            return Err(Error::invalid_value("per_page", "must be greater than zero"));
        }
        if self.http.max_concurrency == 0 {
            return Err(Error::invalid_value(
                "http.max_concurrency",
                "must be greater than zero",
            ));
        }
        if let Some(rate) = &self.http.rate_limit {
            if rate.requests_per_second == 0 {
                return Err(Error::invalid_value(
                    "http.rate_limit.requests_per_second",
                    "must be greater than zero",
                ));
            }
        }
        Ok(())
    }

    /// Resolved client-credentials token endpoint
    pub fn authorize_url(&self) -> String {
        self.authorize_url.clone().unwrap_or_else(|| {
            format!("{}/oauth/authorize/client", self.base_url.trim_end_matches('/'))
        })
    }

    /// Token cache lifetime
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_minutes.saturating_mul(60))
    }

    /// Look up a dotted key (e.g. `"http.max_retries"`), falling back to `default`
    ///
    /// Secrets are not exposed through this accessor.
    pub fn get(&self, key: &str, default: JsonValue) -> JsonValue {
        if matches!(key, "client_secret" | "access_token") {
            return default;
        }
        let Ok(tree) = serde_json::to_value(self) else {
            return default;
        };
        match projection::lookup(&tree, key) {
            Some(JsonValue::Null) | None => default,
            Some(value) => value.clone(),
        }
    }
}

// ============================================================================
// Headers
// ============================================================================

/// Headers attached to every API request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeaderConfig {
    /// `Accept` header value
    #[serde(default = "default_accept")]
    pub accept: String,

    /// `Content-Type` header value
    #[serde(default = "default_content_type")]
    pub content_type: String,
}

fn default_accept() -> String {
    DEFAULT_ACCEPT.to_string()
}

fn default_content_type() -> String {
    DEFAULT_CONTENT_TYPE.to_string()
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            accept: default_accept(),
            content_type: default_content_type(),
        }
    }
}

// ============================================================================
// Auth Method
// ============================================================================

/// How the client obtains its credential
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthMethod {
    /// Use the configured access token (or client id/secret as HTTP Basic)
    #[default]
    Token,
    /// Exchange client id/secret for a bearer token (client-credentials grant)
    Oauth,
}

// ============================================================================
// HTTP Config
// ============================================================================

/// Transport settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Transport-level retries (0 disables retrying)
    #[serde(default)]
    pub max_retries: u32,

    /// Maximum concurrent page fetches during fan-out
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,

    /// Timeout applied to each individual page fetch
    #[serde(default)]
    pub page_timeout_secs: Option<u64>,

    /// Optional client-side rate limit
    #[serde(default)]
    pub rate_limit: Option<RateLimitConfig>,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_concurrency() -> usize {
    8
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            max_retries: 0,
            max_concurrency: default_max_concurrency(),
            page_timeout_secs: None,
            rate_limit: None,
        }
    }
}

impl HttpConfig {
    /// Request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Per-page timeout, if configured
    pub fn page_timeout(&self) -> Option<Duration> {
        self.page_timeout_secs.map(Duration::from_secs)
    }
}

/// Rate limit settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Requests per second
    pub requests_per_second: u32,

    /// Burst size
    #[serde(default)]
    pub burst_size: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = VimeoConfig::default();
        assert_eq!(config.base_url, "https://api.vimeo.com");
        assert_eq!(config.headers.accept, DEFAULT_ACCEPT);
        assert_eq!(config.headers.content_type, "application/json");
        assert_eq!(config.per_page, 25);
        assert_eq!(config.cache_minutes, 1440);
        assert_eq!(config.auth_method, AuthMethod::Token);
        assert_eq!(config.page_count_policy, PageCountPolicy::Floor);
        assert_eq!(config.http.max_retries, 0);
        assert_eq!(config.http.max_concurrency, 8);
        assert_eq!(
            config.authorize_url(),
            "https://api.vimeo.com/oauth/authorize/client"
        );
    }

    #[test]
    fn test_parse_yaml() {
        let yaml = r#"
base_url: https://api.example.com/
auth_method: oauth
client_id: "1234"
client_secret: "1234567890"
scopes: [private, edit, delete]
cache_minutes: 10
per_page: 50
page_count_policy: ceil
http:
  max_concurrency: 4
  page_timeout_secs: 5
  rate_limit:
    requests_per_second: 20
"#;
        let config = VimeoConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.auth_method, AuthMethod::Oauth);
        assert_eq!(config.client_id.as_deref(), Some("1234"));
        assert_eq!(config.scopes.len(), 3);
        assert_eq!(config.cache_ttl(), Duration::from_secs(600));
        assert_eq!(config.per_page, 50);
        assert_eq!(config.page_count_policy, PageCountPolicy::Ceil);
        assert_eq!(config.http.max_concurrency, 4);
        assert_eq!(config.http.page_timeout(), Some(Duration::from_secs(5)));
        assert_eq!(config.http.timeout(), Duration::from_secs(30));
        assert_eq!(
            config.authorize_url(),
            "https://api.example.com/oauth/authorize/client"
        );
    }

    #[test]
    fn test_cache_ttl_saturates() {
        let config = VimeoConfig {
            cache_minutes: u64::MAX,
            ..VimeoConfig::default()
        };
        assert_eq!(config.cache_ttl(), Duration::from_secs(u64::MAX));
    }

    #[test]
    fn test_validate_rejects_zero_per_page() {
        let err = VimeoConfig::from_yaml_str("per_page: 0").unwrap_err();
        assert!(matches!(err, Error::InvalidConfigValue { ref field, .. } if field == "per_page"));
    }

    #[test]
    fn test_validate_rejects_bad_url() {
        let err = VimeoConfig::from_yaml_str("base_url: not a url").unwrap_err();
        assert!(matches!(err, Error::InvalidConfigValue { ref field, .. } if field == "base_url"));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "access_token: abc\nscopes: [public]").unwrap();

        let config = VimeoConfig::from_file(file.path()).unwrap();
        assert_eq!(config.access_token.as_deref(), Some("abc"));
    }

    #[test]
    fn test_from_missing_file() {
        let err = VimeoConfig::from_file("/definitely/not/here.yaml").unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_overrides_ignore_empty_values() {
        let config = VimeoConfig {
            client_id: Some("from-file".to_string()),
            ..VimeoConfig::default()
        }
        .with_overrides_from(|key| match key {
            ENV_CLIENT_ID => Some(String::new()),
            ENV_ACCESS_TOKEN => Some("env-token".to_string()),
            _ => None,
        });

        assert_eq!(config.client_id.as_deref(), Some("from-file"));
        assert_eq!(config.access_token.as_deref(), Some("env-token"));
        assert_eq!(config.client_secret, None);
    }

    #[test]
    fn test_get_dotted_key() {
        let config = VimeoConfig::default();
        assert_eq!(config.get("per_page", json!(10)), json!(25));
        assert_eq!(config.get("http.max_concurrency", json!(1)), json!(8));
        assert_eq!(config.get("http.page_timeout_secs", json!(60)), json!(60));
        assert_eq!(config.get("nope", json!("fallback")), json!("fallback"));
    }

    #[test]
    fn test_get_hides_secrets() {
        let config = VimeoConfig {
            access_token: Some("secret".to_string()),
            ..VimeoConfig::default()
        };
        assert_eq!(config.get("access_token", json!(null)), json!(null));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = VimeoConfig {
            client_secret: Some("hunter2".to_string()),
            access_token: Some("tok".to_string()),
            ..VimeoConfig::default()
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("hunter2"));
        assert!(!debug.contains("\"tok\""));
    }
}
