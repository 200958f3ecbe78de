//! Endpoint catalog
//!
//! Declarative mappings from API operations to [`Endpoint`] descriptors.
//! Each function only describes the call: path, verb, required scopes,
//! default fields, body and result shaping. Nothing is sent until the
//! descriptor is handed to [`VimeoClient::send`](crate::VimeoClient::send).
//!
//! Callers refine a descriptor with the builder methods, e.g.
//!
//! ```
//! use vimeo_client::api::videos;
//! use vimeo_client::UserRef;
//!
//! let endpoint = videos::videos(&UserRef::Me).fields(["uri", "name"]);
//! assert_eq!(endpoint.path_and_query(), "/me/videos?fields=uri,name");
//! ```
//!
//! [`Endpoint`]: crate::endpoint::Endpoint

pub mod account;
pub mod folders;
pub mod live_events;
pub mod videos;

pub use account::StorageQuota;
