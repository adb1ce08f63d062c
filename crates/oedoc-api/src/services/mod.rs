//! Request-level services: resolution, object listings and delivery decisions.

pub mod delivery;
pub mod object_list;
pub mod resolver;
pub mod urls;

#[cfg(test)]
mod fixtures;

pub use delivery::{
    DeliveryOptions, DeliverySelector, Disposition, FileHeaders, HitDecision, MissDecision,
    Placeholder,
};
pub use object_list::{ObjectListEntry, ObjectListService};
pub use resolver::DocumentResolver;
pub use urls::PublicUrls;
