//! Lifecycle event notification.

pub mod notifier;

pub use notifier::{CreatureEvent, EventBus, ListenerId};
