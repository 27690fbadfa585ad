//! Parsers for extractor output: the JSON record itself and the loose date
//! formats banks print in SMS.

pub mod extracted;
pub mod sms_date;

pub use extracted::{parse_extracted, ExtractedRecord};
pub use sms_date::DateResolver;
