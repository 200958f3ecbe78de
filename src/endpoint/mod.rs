//! Endpoint descriptors
//!
//! An [`Endpoint`] is an immutable description of one API call: HTTP
//! verb, path, ordered query parameters, JSON body, field projection,
//! expected status, required scopes and result shaping. Builder methods
//! consume and return the value, so a descriptor is complete before it
//! ever reaches the executor and nothing is left behind on the client.

mod types;

pub use types::{Endpoint, UserRef};

#[cfg(test)]
mod tests;
