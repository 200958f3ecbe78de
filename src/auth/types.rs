//! Auth configuration types

use crate::config::VimeoConfig;
use crate::error::{Error, Result};
use crate::types::{OptionStringExt, ScopeSet};
use chrono::{DateTime, Utc};
use reqwest::RequestBuilder;
use serde::Deserialize;
use std::fmt;

/// Credentials found in the configuration
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Pre-issued access token
    Token {
        /// The access token
        access_token: String,
    },
    /// OAuth application id and secret
    ClientCredentials {
        /// Client id
        client_id: String,
        /// Client secret
        client_secret: String,
    },
}

impl Credentials {
    /// Pick the usable credential set; an access token wins over client
    /// credentials
    pub fn from_config(config: &VimeoConfig) -> Result<Self> {
        if let Some(access_token) = config.access_token.clone().none_if_empty() {
            return Ok(Self::Token { access_token });
        }
        Self::client_credentials(config)
    }

    /// Client id and secret only, as required by the OAuth grant
    pub fn client_credentials(config: &VimeoConfig) -> Result<Self> {
        match (
            config.client_id.clone().none_if_empty(),
            config.client_secret.clone().none_if_empty(),
        ) {
            (Some(client_id), Some(client_secret)) => Ok(Self::ClientCredentials {
                client_id,
                client_secret,
            }),
            (Some(_), None) => Err(Error::auth_config("client_secret is missing")),
            (None, Some(_)) => Err(Error::auth_config("client_id is missing")),
            (None, None) => Err(Error::auth_config(
                "configure either access_token or client_id and client_secret",
            )),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::Token { .. } => f.debug_struct("Token").finish_non_exhaustive(),
            Credentials::ClientCredentials { client_id, .. } => f
                .debug_struct("ClientCredentials")
                .field("client_id", client_id)
                .finish_non_exhaustive(),
        }
    }
}

/// Authentication attached to every request of a client
#[derive(Clone, PartialEq, Eq)]
pub enum AuthContext {
    /// `Authorization: Bearer <token>`
    Bearer {
        /// The bearer token
        token: String,
    },
    /// HTTP Basic with client id/secret
    Basic {
        /// Client id (username)
        client_id: String,
        /// Client secret (password)
        client_secret: String,
    },
}

impl AuthContext {
    /// Bearer token context
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer {
            token: token.into(),
        }
    }

    /// Basic auth context
    pub fn basic(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self::Basic {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// Bearer token, if this context carries one
    pub fn token(&self) -> Option<&str> {
        match self {
            AuthContext::Bearer { token } => Some(token),
            AuthContext::Basic { .. } => None,
        }
    }

    /// Apply authentication to a request builder
    pub fn apply(&self, req: RequestBuilder) -> RequestBuilder {
        match self {
            AuthContext::Bearer { token } => req.bearer_auth(token),
            AuthContext::Basic {
                client_id,
                client_secret,
            } => req.basic_auth(client_id, Some(client_secret)),
        }
    }
}

impl From<Credentials> for AuthContext {
    fn from(credentials: Credentials) -> Self {
        match credentials {
            Credentials::Token { access_token } => Self::Bearer {
                token: access_token,
            },
            Credentials::ClientCredentials {
                client_id,
                client_secret,
            } => Self::Basic {
                client_id,
                client_secret,
            },
        }
    }
}

impl fmt::Debug for AuthContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthContext::Bearer { .. } => f.debug_struct("Bearer").finish_non_exhaustive(),
            AuthContext::Basic { client_id, .. } => f
                .debug_struct("Basic")
                .field("client_id", client_id)
                .finish_non_exhaustive(),
        }
    }
}

/// Cached token with expiration
#[derive(Debug, Clone)]
pub struct CachedToken {
    /// The access token
    pub token: String,
    /// When the token expires
    pub expires_at: Option<DateTime<Utc>>,
}

impl CachedToken {
    /// Create a new cached token
    pub fn new(token: String, expires_at: Option<DateTime<Utc>>) -> Self {
        Self { token, expires_at }
    }

    /// Create a token that expires in N seconds from now
    ///
    /// A lifetime beyond the representable date range never expires.
    pub fn expires_in(token: String, seconds: i64) -> Self {
        let expires_at = chrono::Duration::try_seconds(seconds)
            .and_then(|lifetime| Utc::now().checked_add_signed(lifetime));
        Self { token, expires_at }
    }

    /// Check if the token is expired (with 30 second buffer)
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => {
                let buffer = chrono::Duration::seconds(30);
                Utc::now() + buffer >= expires_at
            }
            None => false, // No expiration = never expires
        }
    }
}

/// Response of the client-credentials grant
#[derive(Debug, Clone, Deserialize)]
pub struct TokenGrant {
    /// Issued access token
    pub access_token: String,
    /// Token type, normally `bearer`
    #[serde(default)]
    pub token_type: Option<String>,
    /// Space separated granted scopes
    #[serde(default)]
    pub scope: Option<String>,
}

impl TokenGrant {
    /// Granted scopes, if the server reported any
    pub fn scopes(&self) -> Option<ScopeSet> {
        self.scope
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(ScopeSet::from_space_separated)
    }
}

#[cfg(test)]
mod type_tests {
    use super::*;

    #[test]
    fn test_cached_token_not_expired() {
        let token = CachedToken::expires_in("test".to_string(), 3600);
        assert!(!token.is_expired());
    }

    #[test]
    fn test_cached_token_expired() {
        let token = CachedToken::expires_in("test".to_string(), -100);
        assert!(token.is_expired());
    }

    #[test]
    fn test_cached_token_no_expiration() {
        let token = CachedToken::new("test".to_string(), None);
        assert!(!token.is_expired());
    }

    #[test]
    fn test_cached_token_out_of_range_lifetime_never_expires() {
        let token = CachedToken::expires_in("test".to_string(), i64::MAX);
        assert!(token.expires_at.is_none());
        assert!(!token.is_expired());
    }

    #[test]
    fn test_grant_scopes() {
        let grant: TokenGrant = serde_json::from_value(serde_json::json!({
            "access_token": "t",
            "token_type": "bearer",
            "scope": "public private"
        }))
        .unwrap();
        let scopes = grant.scopes().unwrap();
        assert_eq!(scopes.len(), 2);

        let grant: TokenGrant =
            serde_json::from_value(serde_json::json!({"access_token": "t", "scope": ""})).unwrap();
        assert!(grant.scopes().is_none());
    }
}
