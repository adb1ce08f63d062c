//! Data models for the document service

mod document;
mod filter;
mod listing;

pub use document::*;
pub use filter::*;
pub use listing::*;

#[cfg(test)]
pub(crate) use document::fixtures;
