//! Flickr REST access layer.
//!
//! [`FlickrApi`] is the seam: the production [`FlickrClient`] speaks HTTP,
//! tests substitute an in-memory fake. The typed wrappers in [`methods`]
//! work against either.

pub(crate) mod api;
pub(crate) mod client;
pub mod methods;
pub(crate) mod retry;

#[cfg(test)]
pub(crate) mod fake;

pub use api::{check_envelope, FlickrApi};
pub use client::FlickrClient;
pub use methods::{PhotoPage, PhotoSearch};
pub use retry::is_retryable;
