//! The external combat-state boundary: combatant data, the
//! [`CombatState`] trait, and the default local adapter.

pub mod combatant;
pub mod local;
pub mod state;

pub use combatant::{ActiveCondition, Combatant, Position, Side};
pub use local::LocalCombatState;
pub use state::{CombatState, DamageOutcome, HealingOutcome, MoveOutcome, SummonOutcome};
