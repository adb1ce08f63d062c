//! Database repositories for the document store.

pub mod document;

pub use document::{DocumentRepository, DocumentRow, ListingRow, PgDocumentRepository};
