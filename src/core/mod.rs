//! Core building blocks: identifiers, ability scores, dice, RNG.

pub mod ability;
pub mod dice;
pub mod id;
pub mod rng;

pub use ability::{Ability, AbilityScores};
pub use dice::{Amount, DiceExpr};
pub use id::{ActionId, CombatantId, TemplateId};
pub use rng::EngineRng;
