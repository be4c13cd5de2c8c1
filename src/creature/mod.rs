//! The creature aggregate: resource pools, action catalog, availability,
//! and `use_action` orchestration.

pub mod availability;
pub mod creature;

pub use availability::check_availability;
pub use creature::{ActionRecord, Creature, RechargeState};
