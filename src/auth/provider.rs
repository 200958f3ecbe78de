//! Token provider
//!
//! Obtains bearer tokens through the OAuth2 client-credentials grant and
//! keeps them in a [`TokenCache`].

use super::cache::TokenCache;
use super::types::{AuthContext, Credentials, TokenGrant};
use crate::config::{HeaderConfig, VimeoConfig};
use crate::error::{Error, Result};
use crate::types::ScopeSet;
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Client;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

/// Cache key under which the access token is stored
pub const TOKEN_CACHE_KEY: &str = "vimeo-token";

/// Source of bearer tokens
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// A valid token, from cache when possible
    async fn get_token(&self) -> Result<String>;

    /// Obtain a fresh token, bypassing the cache
    async fn refresh_token(&self) -> Result<String>;

    /// Ask the API whether `token` is still valid
    async fn verify_token(&self, token: &str) -> Result<bool>;
}

/// Client-credentials token provider
pub struct OAuthTokenProvider {
    /// HTTP client for token requests
    http_client: Client,
    /// Basic auth with the application credentials
    credentials: AuthContext,
    authorize_url: String,
    verify_url: String,
    headers: HeaderConfig,
    /// Scopes requested in the grant
    requested_scopes: ScopeSet,
    cache: Arc<dyn TokenCache>,
    ttl: Duration,
    granted_scopes: RwLock<Option<ScopeSet>>,
    refresh_lock: Mutex<()>,
}

impl OAuthTokenProvider {
    /// Create a provider from configuration
    pub fn new(config: &VimeoConfig, cache: Arc<dyn TokenCache>) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.http.timeout())
            .build()?;
        Self::with_client(config, cache, http_client)
    }

    /// Create a provider with a custom HTTP client
    pub fn with_client(
        config: &VimeoConfig,
        cache: Arc<dyn TokenCache>,
        http_client: Client,
    ) -> Result<Self> {
        let credentials = Credentials::client_credentials(config)?;
        Ok(Self {
            http_client,
            credentials: credentials.into(),
            authorize_url: config.authorize_url(),
            verify_url: format!("{}/oauth/verify", config.base_url.trim_end_matches('/')),
            headers: config.headers.clone(),
            requested_scopes: config.scopes.clone(),
            cache,
            ttl: config.cache_ttl(),
            granted_scopes: RwLock::new(None),
            refresh_lock: Mutex::new(()),
        })
    }

    /// Scopes reported by the last successful grant
    pub async fn granted_scopes(&self) -> Option<ScopeSet> {
        self.granted_scopes.read().await.clone()
    }

    /// Perform the client-credentials grant
    pub async fn request_grant(&self) -> Result<TokenGrant> {
        let body = json!({
            "grant_type": "client_credentials",
            "scope": self.requested_scopes.to_space_separated(),
        });

        let req = self
            .http_client
            .post(&self.authorize_url)
            .header(ACCEPT, &self.headers.accept)
            .json(&body);

        let response = self.credentials.apply(req).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::OAuth2 {
                message: format!("Token request failed with status {status}: {body}"),
            });
        }

        let grant: TokenGrant = response.json().await?;
        Ok(grant)
    }
}

#[async_trait]
impl TokenProvider for OAuthTokenProvider {
    async fn get_token(&self) -> Result<String> {
        if let Some(token) = self.cache.get(TOKEN_CACHE_KEY).await {
            return Ok(token);
        }

        let _guard = self.refresh_lock.lock().await;

        // Double-check after acquiring the lock (another task might have refreshed)
        if let Some(token) = self.cache.get(TOKEN_CACHE_KEY).await {
            return Ok(token);
        }

        self.refresh_token().await
    }

    async fn refresh_token(&self) -> Result<String> {
        let grant = self.request_grant().await?;

        if let Some(scopes) = grant.scopes() {
            *self.granted_scopes.write().await = Some(scopes);
        }

        self.cache
            .put(TOKEN_CACHE_KEY, grant.access_token.clone(), self.ttl)
            .await;

        info!(
            token_type = grant.token_type.as_deref().unwrap_or("bearer"),
            "Obtained access token via client credentials"
        );
        Ok(grant.access_token)
    }

    async fn verify_token(&self, token: &str) -> Result<bool> {
        let req = self
            .http_client
            .get(&self.verify_url)
            .header(ACCEPT, &self.headers.accept);

        let response = AuthContext::bearer(token).apply(req).send().await?;

        if !response.status().is_success() {
            debug!(status = response.status().as_u16(), "Token verification rejected");
            return Ok(false);
        }

        let body: Value = response.json().await?;
        Ok(body.get("access_token").and_then(Value::as_str) == Some(token))
    }
}

impl std::fmt::Debug for OAuthTokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthTokenProvider")
            .field("authorize_url", &self.authorize_url)
            .field("credentials", &self.credentials)
            .field("requested_scopes", &self.requested_scopes)
            .finish_non_exhaustive()
    }
}
