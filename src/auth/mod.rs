//! Authentication module
//!
//! Supports: pre-issued bearer tokens, HTTP Basic with client id/secret,
//! and the OAuth2 client-credentials grant.
//!
//! The [`AuthContext`] chosen at construction is read-only for the life of
//! a client and is shared by every request, including concurrent page
//! fetches. Token acquisition goes through a [`TokenProvider`], which
//! stores tokens in a [`TokenCache`].

mod cache;
mod provider;
mod types;

pub use cache::{MemoryTokenCache, TokenCache};
pub use provider::{OAuthTokenProvider, TokenProvider, TOKEN_CACHE_KEY};
pub use types::{AuthContext, CachedToken, Credentials, TokenGrant};
