//! REST backend access
//!
//! Screens talk to the backend through the [`Backend`] trait so they can be
//! driven by a scripted backend in tests. [`ApiClient`] is the reqwest
//! implementation used by the binary.

pub mod client;
pub mod errors;

#[cfg(test)]
pub mod testing;

pub use client::{ApiClient, Backend};
pub use errors::ApiError;
