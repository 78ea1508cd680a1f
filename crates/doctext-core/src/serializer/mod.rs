//! Document serialization module
//!
//! This module provides serializers for turning an extracted [`Document`]
//! into the text layouts the CLI emits.
//!
//! [`Document`]: crate::document::Document

pub mod json;
pub mod listing;
pub mod page_dump;

pub use json::{JsonOptions, JsonSerializer};
pub use listing::{ListingOptions, ParagraphListingSerializer, DEFAULT_LISTING_LIMIT};
pub use page_dump::PageDumpSerializer;
