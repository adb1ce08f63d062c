//! Pure business rules: which catalog tiers a lookup visits and which
//! documents carry the identifying stamp.

pub mod resolution;
pub mod stamp;

pub use resolution::{
    requires_common_tier, RequestedDocument, Tier, DELIVERY_PLAN, METADATA_PLAN,
};
pub use stamp::must_stamp;
