//! Standard interaction policies.

pub mod relation;
pub mod simultaneous;

pub use relation::{RelationPolicy, RelationPolicyBuilder};
pub use simultaneous::Simultaneous;
