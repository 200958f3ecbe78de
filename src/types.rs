//! Common types used throughout the Vimeo client
//!
//! This module contains shared type definitions, type aliases,
//! and utility types used across multiple modules.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

// ============================================================================
// HTTP Types
// ============================================================================

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    #[default]
    GET,
    POST,
    PUT,
    PATCH,
    DELETE,
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::GET => reqwest::Method::GET,
            Method::POST => reqwest::Method::POST,
            Method::PUT => reqwest::Method::PUT,
            Method::PATCH => reqwest::Method::PATCH,
            Method::DELETE => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::PATCH => "PATCH",
            Method::DELETE => "DELETE",
        };
        f.write_str(name)
    }
}

// ============================================================================
// Backoff Type
// ============================================================================

/// Type of backoff for retries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackoffType {
    /// Constant delay between retries
    Constant,
    /// Linear increase in delay
    Linear,
    /// Exponential increase in delay
    #[default]
    Exponential,
}

// ============================================================================
// Scopes
// ============================================================================

/// A capability granted to the current credential
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// Create new albums, channels, and so on
    Create,
    /// Delete videos, albums, channels, and so on
    Delete,
    /// Edit existing videos, albums, channels, and so on
    Edit,
    /// Access to email addresses
    Email,
    /// Interact with resources on a member's behalf
    Interact,
    /// Access private member data
    Private,
    /// Add, remove, and review On Demand promotions
    PromoCodes,
    /// Access public member data
    Public,
    /// Purchase content
    Purchase,
    /// Access a member's On Demand purchase history
    Purchased,
    /// Manage users and team groups via SCIM
    Scim,
    /// Access video stats
    Stats,
    /// Upload videos
    Upload,
    /// Access video files
    VideoFiles,
}

impl Scope {
    /// Every known scope
    pub const ALL: [Scope; 14] = [
        Scope::Create,
        Scope::Delete,
        Scope::Edit,
        Scope::Email,
        Scope::Interact,
        Scope::Private,
        Scope::PromoCodes,
        Scope::Public,
        Scope::Purchase,
        Scope::Purchased,
        Scope::Scim,
        Scope::Stats,
        Scope::Upload,
        Scope::VideoFiles,
    ];

    /// Wire name of the scope
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Create => "create",
            Scope::Delete => "delete",
            Scope::Edit => "edit",
            Scope::Email => "email",
            Scope::Interact => "interact",
            Scope::Private => "private",
            Scope::PromoCodes => "promo_codes",
            Scope::Public => "public",
            Scope::Purchase => "purchase",
            Scope::Purchased => "purchased",
            Scope::Scim => "scim",
            Scope::Stats => "stats",
            Scope::Upload => "upload",
            Scope::VideoFiles => "video_files",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scope {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Scope::ALL
            .iter()
            .copied()
            .find(|scope| scope.as_str() == s)
            .ok_or_else(|| crate::error::Error::invalid_value("scopes", format!("unknown scope '{s}'")))
    }
}

/// The set of scope names held by a client
///
/// Names are kept as strings so that scopes granted by the server but
/// unknown to this crate survive a round trip.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScopeSet(BTreeSet<String>);

impl ScopeSet {
    /// Create an empty scope set
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a space separated scope string, as returned by the token endpoint
    pub fn from_space_separated(scopes: &str) -> Self {
        Self(scopes.split_whitespace().map(String::from).collect())
    }

    /// Check whether a scope is present
    pub fn contains(&self, scope: Scope) -> bool {
        self.0.contains(scope.as_str())
    }

    /// Add a scope name
    pub fn insert(&mut self, scope: impl Into<String>) {
        self.0.insert(scope.into());
    }

    /// First scope in `required` that is not held
    pub fn first_missing(&self, required: &[Scope]) -> Option<Scope> {
        required.iter().copied().find(|scope| !self.contains(*scope))
    }

    /// Render as a space separated string (token request format)
    pub fn to_space_separated(&self) -> String {
        self.0.iter().map(String::as_str).collect::<Vec<_>>().join(" ")
    }

    /// Number of scopes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for ScopeSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl From<&[Scope]> for ScopeSet {
    fn from(scopes: &[Scope]) -> Self {
        scopes.iter().map(Scope::as_str).collect()
    }
}

// ============================================================================
// Utilities
// ============================================================================

/// Extension trait for Option<String> to handle empty strings
pub trait OptionStringExt {
    /// Returns None if the string is empty
    fn none_if_empty(self) -> Option<String>;
}

impl OptionStringExt for Option<String> {
    fn none_if_empty(self) -> Option<String> {
        self.filter(|s| !s.is_empty())
    }
}

impl OptionStringExt for String {
    fn none_if_empty(self) -> Option<String> {
        if self.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}
