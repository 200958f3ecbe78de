//! Client facade
//!
//! [`VimeoClient`] ties the pieces together: it checks scopes, executes an
//! [`Endpoint`], merges paged listings and applies the endpoint's result
//! shaping. The client holds no per-call state, so one instance can be
//! cloned and shared across tasks.

use crate::api::{self, StorageQuota};
use crate::auth::{
    AuthContext, Credentials, MemoryTokenCache, OAuthTokenProvider, TokenCache, TokenProvider,
    TOKEN_CACHE_KEY,
};
use crate::config::{AuthMethod, VimeoConfig};
use crate::endpoint::{Endpoint, UserRef};
use crate::error::{Error, Result};
use crate::executor::{Outcome, RequestExecutor};
use crate::pagination::Aggregator;
use crate::types::ScopeSet;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

/// Async client for the Vimeo API
#[derive(Debug, Clone)]
pub struct VimeoClient {
    executor: RequestExecutor,
    aggregator: Aggregator,
    scopes: ScopeSet,
    auth: AuthContext,
}

impl VimeoClient {
    /// Create a client from configuration without any network call
    ///
    /// Uses the configured access token, or HTTP Basic with the client id
    /// and secret when there is no token. Fails with
    /// [`Error::AuthConfiguration`] when neither is usable.
    pub fn new(config: VimeoConfig) -> Result<Self> {
        config.validate()?;
        let auth = Credentials::from_config(&config)?.into();
        let scopes = config.scopes.clone();
        Self::assemble(&config, auth, scopes)
    }

    /// Create a client, performing the client-credentials grant when
    /// `auth_method` is `oauth`
    pub async fn connect(config: VimeoConfig) -> Result<Self> {
        Self::connect_with_cache(config, Arc::new(MemoryTokenCache::new())).await
    }

    /// Same as [`connect`](Self::connect) with a caller-provided token cache
    pub async fn connect_with_cache(config: VimeoConfig, cache: Arc<dyn TokenCache>) -> Result<Self> {
        config.validate()?;

        match config.auth_method {
            AuthMethod::Oauth => {
                let provider = OAuthTokenProvider::new(&config, cache)?;
                let token = provider.get_token().await?;
                let scopes = provider
                    .granted_scopes()
                    .await
                    .unwrap_or_else(|| config.scopes.clone());
                Self::assemble(&config, AuthContext::bearer(token), scopes)
            }
            AuthMethod::Token => {
                let credentials = Credentials::from_config(&config)?;
                if let Credentials::Token { access_token } = &credentials {
                    cache
                        .put(TOKEN_CACHE_KEY, access_token.clone(), config.cache_ttl())
                        .await;
                }
                let scopes = config.scopes.clone();
                Self::assemble(&config, credentials.into(), scopes)
            }
        }
    }

    fn assemble(config: &VimeoConfig, auth: AuthContext, scopes: ScopeSet) -> Result<Self> {
        let executor = RequestExecutor::from_config(config, auth.clone())?;
        let scheme = match auth {
            AuthContext::Bearer { .. } => "bearer",
            AuthContext::Basic { .. } => "basic",
        };
        info!(
            base_url = %config.base_url,
            auth = scheme,
            scopes = %scopes.to_space_separated(),
            "Vimeo client ready"
        );
        Ok(Self {
            executor,
            aggregator: Aggregator::from_config(config),
            scopes,
            auth,
        })
    }

    /// Scopes held by the current credential
    pub fn scopes(&self) -> &ScopeSet {
        &self.scopes
    }

    /// Authentication attached to every request
    pub fn auth(&self) -> &AuthContext {
        &self.auth
    }

    /// Run an endpoint: scope check, request, page aggregation, shaping
    ///
    /// A missing scope fails with [`Error::Scope`] before anything is sent.
    pub async fn send(&self, endpoint: &Endpoint) -> Result<Outcome> {
        if let Some(scope) = self.scopes.first_missing(endpoint.required_scopes()) {
            return Err(Error::scope(scope.as_str()));
        }

        match self.executor.execute(endpoint).await? {
            Outcome::Status(matched) => Ok(Outcome::Status(matched)),
            Outcome::Value(first) => {
                let merged = self
                    .aggregator
                    .aggregate(first, endpoint, &self.executor)
                    .await?;
                Ok(Outcome::Value(endpoint.projection().apply(merged)))
            }
        }
    }

    /// Shaped JSON result; a status comparison is returned as a boolean
    pub async fn fetch_value(&self, endpoint: &Endpoint) -> Result<Value> {
        self.send(endpoint).await.map(Outcome::into_value)
    }

    /// Shaped result deserialized into `T`
    pub async fn fetch_as<T: DeserializeOwned>(&self, endpoint: &Endpoint) -> Result<T> {
        let value = self.fetch_value(endpoint).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Every item of a (possibly paged) listing
    pub async fn fetch_all<T: DeserializeOwned>(&self, endpoint: &Endpoint) -> Result<Vec<T>> {
        self.fetch_as(endpoint).await
    }

    /// Whether the call answered with the endpoint's expected status
    ///
    /// Endpoints without an expected status report `true` once the call
    /// succeeds.
    pub async fn fetch_status(&self, endpoint: &Endpoint) -> Result<bool> {
        match self.send(endpoint).await? {
            Outcome::Status(matched) => Ok(matched),
            Outcome::Value(_) => Ok(true),
        }
    }

    /// Upload quota of a user
    pub async fn storage_quota(&self, user: &UserRef) -> Result<StorageQuota> {
        let value = self.fetch_value(&api::account::storage_quota(user)).await?;
        Ok(StorageQuota::from_value(&value))
    }

    /// Whether the API still accepts the client's bearer token
    ///
    /// Clients authenticating with HTTP Basic have no token and get `false`.
    pub async fn verify_token(&self) -> Result<bool> {
        let Some(token) = self.auth.token() else {
            return Ok(false);
        };

        match self.executor.execute(&api::account::verify_token()).await {
            Ok(outcome) => Ok(outcome
                .as_value()
                .and_then(|body| body.get("access_token"))
                .and_then(Value::as_str)
                == Some(token)),
            Err(Error::Api { status, .. }) => {
                debug!(status, "Token rejected by the API");
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }
}
