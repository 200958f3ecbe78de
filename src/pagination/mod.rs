//! Pagination module
//!
//! # Overview
//!
//! List endpoints answer with an envelope `{ total, per_page, data, page }`.
//! The [`Aggregator`] recognises such an envelope in the first response,
//! works out how many more pages exist, requests them concurrently through
//! a [`PageFetcher`] and merges every `data` array into one ordered array.
//! Anything that is not an envelope passes through unchanged, so the same
//! path serves list and non-list endpoints.
//!
//! Aggregation is all-or-nothing: every fetch is awaited, and one failed
//! page fails the whole call.

mod aggregator;
mod types;

pub use aggregator::{Aggregator, PageFetcher};
pub use types::{page_count, page_items, PageCountPolicy, PageEnvelope};

#[cfg(test)]
mod tests;
