//! Portfolio aggregation: which photos, albums and tags make up the portfolio.
//!
//! A photo belongs to the portfolio only if its tag string carries the
//! portfolio tag. Every view here is a filter over that base set.

pub mod filters;
mod service;

pub use service::{AlbumView, Portfolio};
