//! OE document core library
//!
//! Domain models, the resolution and stamp policies, error types and
//! configuration shared by every oedoc crate.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod policy;

pub use config::{BaseConfig, Config, ServiceConfig};
pub use error::{AppError, ErrorClass, LogLevel};
pub use models::{
    DocumentLanguage, DocumentRecord, ListedDocument, ObjectListing, ResolutionFilter,
};
pub use policy::{must_stamp, requires_common_tier, RequestedDocument, Tier};
