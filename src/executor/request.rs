//! Request executor
//!
//! Turns an [`Endpoint`] into one HTTP call and classifies the response.

use super::types::{decode_body, Outcome};
use crate::auth::AuthContext;
use crate::config::VimeoConfig;
use crate::endpoint::Endpoint;
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpClientConfig, RequestConfig};
use crate::pagination::PageFetcher;
use crate::types::Method;
use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

/// Executes endpoint descriptors against the API
#[derive(Debug, Clone)]
pub struct RequestExecutor {
    http: HttpClient,
}

impl RequestExecutor {
    /// Wrap an already configured transport
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Build the transport from configuration and attach `auth`
    pub fn from_config(config: &VimeoConfig, auth: AuthContext) -> Result<Self> {
        let http = HttpClient::with_config(HttpClientConfig::from_config(config))?.with_auth(auth);
        Ok(Self::new(http))
    }

    /// Underlying transport
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Perform the call described by `endpoint`
    ///
    /// With an expected status, the outcome is whether the response status
    /// matches it, whatever that status is. Otherwise a non-2xx status is an
    /// [`Error::Api`] and the body is decoded.
    pub async fn execute(&self, endpoint: &Endpoint) -> Result<Outcome> {
        let (status, text) = self.call(endpoint, &endpoint.path_and_query()).await?;

        if let Some(expected) = endpoint.expected_status() {
            return Ok(Outcome::Status(status == expected));
        }

        ensure_success(status, text).map(Outcome::Value)
    }

    async fn call(&self, endpoint: &Endpoint, path: &str) -> Result<(u16, String)> {
        let method = endpoint.method();
        let mut request = RequestConfig::new();
        if method != Method::GET && !endpoint.body().is_empty() {
            request = request.json(Value::Object(endpoint.body().clone()));
        }

        let response = self.http.send(method.into(), path, request).await?;
        let status = response.status().as_u16();
        let text = response.text().await?;

        debug!(%method, path, status, bytes = text.len(), "Endpoint responded");
        Ok((status, text))
    }
}

fn ensure_success(status: u16, text: String) -> Result<Value> {
    if (200..300).contains(&status) {
        Ok(decode_body(&text))
    } else {
        Err(Error::api(status, text))
    }
}

#[async_trait]
impl PageFetcher for RequestExecutor {
    async fn fetch_page(&self, endpoint: &Endpoint, page: u64) -> Result<Value> {
        let (status, text) = self.call(endpoint, &endpoint.page_path(page)).await?;
        ensure_success(status, text)
    }
}
