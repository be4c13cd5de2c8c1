//! Actions: the catalog entries a creature can take.

pub mod action;

pub use action::{Action, ActionKind, ReactionTrigger, TriggerEvent};
