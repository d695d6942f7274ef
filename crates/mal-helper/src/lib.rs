//! mal-helper library: query the MyAnimeList v2 API and flatten the
//! responses into readable records.
//!
//! Both anime and manga go through the same pipeline: the transport fetches a
//! JSON body, `envelope` strips the listing wrapper, `normalize` flattens the
//! nested fields and `render` prints the result.

pub mod api;
pub mod catalog;
pub mod client;
pub mod envelope;
pub mod normalize;
pub mod render;

pub use api::{ApiError, ApiRequest, HttpTransport, Transport};
pub use catalog::{CatalogKind, CatalogSpec};
pub use client::{CatalogClient, SeasonalQuery};
pub use envelope::Unwrapped;
pub use normalize::ExtraFieldRule;
pub use render::{OutputFormat, RecordPrinter};
