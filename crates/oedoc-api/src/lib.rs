//! OE document API library
//!
//! HTTP handlers, request-level services, middleware and application setup
//! for the document delivery service.

mod api_doc;
pub mod constants;
mod handlers;
mod middleware;
pub mod services;
pub mod setup;
mod telemetry;

pub mod error;
pub mod state;

pub use error::ErrorResponse;
