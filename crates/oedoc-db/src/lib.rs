//! OE document data access
//!
//! The document store is owned elsewhere and exposed through stored routines;
//! this crate wraps those routines behind the [`DocumentRepository`] trait.

pub mod db;
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

pub use db::{DocumentRepository, PgDocumentRepository};
