//! Endpoint descriptor and user selector

use crate::projection::Projection;
use crate::types::{JsonObject, JsonValue, Method, Scope};
use url::form_urlencoded;

/// Whose resources an endpoint addresses
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum UserRef {
    /// The authenticated user (`/me`)
    #[default]
    Me,
    /// Another user by id (`/users/{id}`)
    Id(String),
}

impl UserRef {
    /// Select a user by id
    pub fn id(id: impl Into<String>) -> Self {
        Self::Id(id.into())
    }

    /// Path prefix for this user
    pub fn path(&self) -> String {
        match self {
            UserRef::Me => "/me".to_string(),
            UserRef::Id(id) => format!("/users/{id}"),
        }
    }
}

impl From<Option<&str>> for UserRef {
    fn from(id: Option<&str>) -> Self {
        match id {
            Some(id) if !id.is_empty() => Self::Id(id.to_string()),
            _ => Self::Me,
        }
    }
}

/// One fully described API call
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoint {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    fields: Vec<String>,
    body: JsonObject,
    expected_status: Option<u16>,
    scopes: Vec<Scope>,
    projection: Projection,
}

impl Endpoint {
    /// Create an endpoint for a method and path
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            fields: Vec::new(),
            body: JsonObject::new(),
            expected_status: None,
            scopes: Vec::new(),
            projection: Projection::default(),
        }
    }

    /// GET endpoint
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// POST endpoint
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// PUT endpoint
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    /// PATCH endpoint
    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    /// DELETE endpoint
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    // ------------------------------------------------------------------------
    // Builder methods
    // ------------------------------------------------------------------------

    /// Append a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Free-text search term (`query=`)
    #[must_use]
    pub fn search(self, term: impl Into<String>) -> Self {
        self.query("query", term)
    }

    /// Request only these response fields (`fields=a,b`); appends to any
    /// fields already requested
    #[must_use]
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields.extend(fields.into_iter().map(Into::into));
        self
    }

    /// Set one body parameter
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.body.insert(key.into(), value.into());
        self
    }

    /// Merge body parameters; keys given here win over existing ones
    #[must_use]
    pub fn params(mut self, params: JsonObject) -> Self {
        self.body.extend(params);
        self
    }

    /// Return `status == expected` instead of the decoded body
    #[must_use]
    pub fn expect_status(mut self, status: u16) -> Self {
        self.expected_status = Some(status);
        self
    }

    /// Require a scope before the call is attempted
    #[must_use]
    pub fn requires(mut self, scope: Scope) -> Self {
        if !self.scopes.contains(&scope) {
            self.scopes.push(scope);
        }
        self
    }

    /// Descend into a dotted path of the response
    #[must_use]
    pub fn key(mut self, path: impl Into<String>) -> Self {
        self.projection.key = Some(path.into());
        self
    }

    /// Keep only these top-level keys of the response
    #[must_use]
    pub fn only<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.projection.only = Some(keys.into_iter().map(Into::into).collect());
        self
    }

    /// Reduce the response to one field or array index
    #[must_use]
    pub fn pluck(mut self, segment: impl Into<String>) -> Self {
        self.projection.get = Some(segment.into());
        self
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    /// HTTP method
    pub fn method(&self) -> Method {
        self.method
    }

    /// Path without query string
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Query parameters in insertion order (excluding `fields`)
    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    /// Requested response fields
    pub fn requested_fields(&self) -> &[String] {
        &self.fields
    }

    /// JSON body parameters
    pub fn body(&self) -> &JsonObject {
        &self.body
    }

    /// Expected status, when a boolean result was requested
    pub fn expected_status(&self) -> Option<u16> {
        self.expected_status
    }

    /// Scopes this call needs
    pub fn required_scopes(&self) -> &[Scope] {
        &self.scopes
    }

    /// Result shaping options
    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    // ------------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------------

    /// Path plus query string: query parameters in order, then `fields`
    pub fn path_and_query(&self) -> String {
        self.render(None)
    }

    /// Same as [`path_and_query`](Self::path_and_query) with `page=n` appended
    pub fn page_path(&self, page: u64) -> String {
        self.render(Some(page))
    }

    fn render(&self, page: Option<u64>) -> String {
        let mut parts: Vec<String> = self
            .query
            .iter()
            .map(|(key, value)| format!("{}={}", encode(key), encode(value)))
            .collect();
        if !self.fields.is_empty() {
            // Field names are encoded one by one; the separating commas stay literal
            let fields: Vec<String> = self.fields.iter().map(|field| encode(field)).collect();
            parts.push(format!("fields={}", fields.join(",")));
        }
        if let Some(page) = page {
            parts.push(format!("page={page}"));
        }

        let query = parts.join("&");
        if query.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{query}", self.path)
        }
    }
}

fn encode(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}
