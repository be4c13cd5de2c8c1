//! # boss-engine
//!
//! A special-action and effect resolution engine for tabletop RPG boss
//! encounters: legendary actions, mythic actions, lair actions, villain
//! actions, paragon phases, recharge abilities, and reactions.
//!
//! ## Design Principles
//!
//! 1. **The engine owns rules, not the world**: every mutation of the
//!    encounter goes through the [`CombatState`] trait. The engine
//!    decides *what* happens; the collaborator decides *how*.
//!
//! 2. **Declarative effect trees**: actions carry data
//!    ([`Effect`] trees), parsed once at load time. The interpreter is
//!    an exhaustive match, so new variants cannot be silently ignored.
//!
//! 3. **Check, then commit**: availability is verified before any
//!    mutation. Past that point, resource deduction and the history
//!    append always happen together, even when individual effects fail.
//!
//! 4. **Synchronous and single-threaded**: every public method runs to
//!    completion. Callers serialize access to a given combat state.
//!
//! ## Modules
//!
//! - `core`: identifiers, ability scores, dice notation, seeded RNG
//! - `combat`: the combat-state collaborator boundary and default adapter
//! - `actions`: action catalog entries and reaction triggers
//! - `effects`: effect trees, targeting, saving throws, the interpreter
//! - `creature`: the aggregate root owning pools and orchestration
//! - `events`: synchronous lifecycle listener bus
//! - `templates`: reusable action sets by archetype
//! - `error`: the crate error taxonomy

pub mod actions;
pub mod combat;
pub mod core;
pub mod creature;
pub mod effects;
pub mod error;
pub mod events;
pub mod templates;

// Re-export commonly used types
pub use crate::core::{Ability, AbilityScores, ActionId, Amount, CombatantId, DiceExpr, EngineRng, TemplateId};

pub use crate::combat::{
    ActiveCondition, Combatant, CombatState, DamageOutcome, HealingOutcome, LocalCombatState,
    MoveOutcome, Position, Side, SummonOutcome,
};

pub use crate::actions::{Action, ActionKind, ReactionTrigger, TriggerEvent};

pub use crate::effects::{
    ActionResult, AreaShape, AreaSpec, Effect, EffectOutcome, Interpreter, SaveOutcome, SaveSpec,
    SummonSpec, TargetOptions, TargetSpec,
};

pub use crate::creature::{ActionRecord, Creature, RechargeState};

pub use crate::events::{CreatureEvent, EventBus, ListenerId};

pub use crate::templates::{
    ActionTemplate, RechargeSeed, TemplateCategory, TemplateExport, TemplateLibrary,
};

pub use crate::error::{DiceParseError, UnavailableReason, UseActionError};
