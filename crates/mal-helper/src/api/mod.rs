//! MyAnimeList API v2 access.
//!
//! The transport is a trait so catalog logic can run against any source of
//! JSON bodies; `HttpTransport` is the real network implementation.

pub mod error;
pub mod transport;

pub use error::ApiError;
pub use transport::{ApiRequest, HttpTransport, Transport};
