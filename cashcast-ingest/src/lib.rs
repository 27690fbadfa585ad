//! cashcast-ingest: extractor-output ingestion and the record normalizer.

pub mod loader;
pub mod normalizer;
pub mod parsers;
pub mod types;

pub use loader::load_messages;
pub use normalizer::{Normalized, Normalizer};
pub use types::{into_maps, RawMessage};
