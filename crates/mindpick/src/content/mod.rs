//! Static quiz content: per-quiz JSON documents and the portal catalog.

pub mod catalog;
mod library;

pub use catalog::{Catalog, CatalogItem, CatalogListing, CatalogQuery, CategoryCount};
pub use library::{LibraryError, QuizLibrary};
