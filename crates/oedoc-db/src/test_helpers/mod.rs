//! Test helpers for code that depends on the document repository
//!
//! No database connection is needed, making these suitable for unit tests
//! and HTTP-level integration tests.

pub mod mock_repositories;

pub use mock_repositories::MockDocumentRepository;
