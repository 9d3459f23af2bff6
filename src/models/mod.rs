//! Data transfer objects (DTOs) for upstream API responses.
//!
//! - `content`: ContentEntry, EntryType, ContentLinks — one record of a
//!   GitHub contents listing, deserialized verbatim

pub mod content;

pub use content::*;
