//! Request executor module
//!
//! Sends the request an [`Endpoint`](crate::endpoint::Endpoint) describes,
//! with the client's headers and authentication, and reports either the
//! decoded body or a status comparison. It is also the
//! [`PageFetcher`](crate::pagination::PageFetcher) used for page fan-out.

mod request;
mod types;

pub use request::RequestExecutor;
pub use types::Outcome;
