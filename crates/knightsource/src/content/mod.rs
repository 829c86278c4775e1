//! JSON-backed content for the benefit category pages and site statistics.

mod catalog;
mod library;
pub mod router;

pub use catalog::{category_entry, CategoryEntry, CATEGORY_CATALOG};
pub use library::{CategoryContent, ContentError, ContentLibrary, SiteStats, Subcategory};
pub use router::content_router;
