//! HTTP transport module
//!
//! Thin reqwest wrapper shared by all requests of a client.
//!
//! # Features
//!
//! - **Raw responses**: status classification belongs to the caller
//! - **Optional retries**: 429/5xx and transient transport errors, with backoff
//! - **Rate limiting**: token bucket using governor
//! - **Authentication**: an [`AuthContext`](crate::auth::AuthContext) applied to every request

mod client;
mod rate_limit;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
