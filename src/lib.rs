// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # Vimeo client
//!
//! Async client for the Vimeo REST API. Calls are described as immutable
//! [`Endpoint`] values and run by a [`VimeoClient`], which transparently
//! merges paged listings into one ordered array.
//!
//! ## Features
//!
//! - **Endpoint catalog**: account, folders, videos and live events in [`api`]
//! - **Concurrent pagination**: pages 2..N of a listing are fetched in parallel
//!   and merged in page order
//! - **Result shaping**: `key`, `only` and `get` projections on any response
//! - **Auth**: personal access tokens, HTTP Basic, or the OAuth2
//!   client-credentials grant with a token cache
//! - **Scope checks**: calls needing a scope the credential lacks fail
//!   before any request is sent
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use vimeo_client::{api, Result, UserRef, VimeoClient, VimeoConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = VimeoConfig::from_file("vimeo.yaml")?.with_env_overrides();
//!     let client = VimeoClient::connect(config).await?;
//!
//!     // Every video of the authenticated user, all pages merged
//!     let videos = client
//!         .fetch_value(&api::videos::videos(&UserRef::Me).fields(["uri", "name"]))
//!         .await?;
//!     println!("{videos}");
//!
//!     let quota = client.storage_quota(&UserRef::Me).await?;
//!     println!("{} free of {}", quota.free_tb(), quota.max_tb());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │  VimeoClient::send(&Endpoint)                                 │
//! │  scope check → execute → aggregate → shape                    │
//! └───────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────┬───────────┬───────┴───────┬───────────┬───────────┐
//! │   Auth   │   HTTP    │   Executor    │ Paginate  │ Projection│
//! ├──────────┼───────────┼───────────────┼───────────┼───────────┤
//! │ Bearer   │ reqwest   │ Headers       │ Detect    │ key       │
//! │ Basic    │ Retry     │ JSON body     │ Fan-out   │ only      │
//! │ OAuth2   │ Rate Limit│ Status check  │ Merge     │ get       │
//! │ Cache    │ Backoff   │               │           │           │
//! └──────────┴───────────┴───────────────┴───────────┴───────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the client
pub mod error;

/// Common types and type aliases
pub mod types;

/// Client configuration
pub mod config;

/// Credentials, token provider and token cache
pub mod auth;

/// HTTP transport with retry and rate limiting
pub mod http;

/// Endpoint descriptors
pub mod endpoint;

/// Endpoint catalog
pub mod api;

/// Request execution
pub mod executor;

/// Page detection, fan-out and merge
pub mod pagination;

/// Result shaping
pub mod projection;

/// Client facade
pub mod client;

// ============================================================================
// Re-exports
// ============================================================================

pub use client::VimeoClient;
pub use config::VimeoConfig;
pub use endpoint::{Endpoint, UserRef};
pub use error::{Error, Result};
pub use executor::Outcome;
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
