//! Error taxonomy.
//!
//! The engine never panics out of its public methods. Failures that stop
//! an action before any mutation (`NotFound`, `Unavailable`) come back as
//! typed errors; failures inside effect application are recorded in the
//! result tree instead (see `EffectOutcome::Failed`).

use thiserror::Error;

use crate::core::ActionId;

/// Why dice notation failed to parse.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DiceParseError {
    #[error("missing 'd' in dice notation `{0}`")]
    MissingSeparator(String),
    #[error("invalid dice count `{0}`")]
    InvalidCount(String),
    #[error("dice count must be at least 1")]
    ZeroCount,
    #[error("invalid die sides `{0}`")]
    InvalidSides(String),
    #[error("die sides must be at least 1")]
    ZeroSides,
    #[error("invalid modifier `{0}`")]
    InvalidModifier(String),
}

/// Why an action is not currently legal.
///
/// Each action economy has its own reasons so callers (and logs) can say
/// more than "unavailable".
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum UnavailableReason {
    #[error("needs {cost} legendary actions, {remaining} remaining")]
    InsufficientLegendaryActions { cost: u32, remaining: u32 },
    #[error("mythic phase is not active")]
    MythicPhaseInactive,
    #[error("needs {cost} mythic actions, {remaining} remaining")]
    InsufficientMythicActions { cost: u32, remaining: u32 },
    #[error("villain action limit reached this round")]
    VillainActionSpent,
    #[error("no paragon phase has started")]
    ParagonNotStarted,
    #[error("no recharge entry is bound to this action")]
    NoRechargeEntry,
    #[error("ability has not recharged")]
    NotCharged,
    #[error("reaction already used")]
    ReactionSpent,
    #[error("no event is currently triggering reactions")]
    NoTrigger,
    #[error("trigger does not match the current event")]
    TriggerMismatch,
    #[error("not this creature's turn")]
    NotItsTurn,
    #[error("bonus action already used")]
    BonusActionSpent,
}

/// Failure modes of [`Creature::use_action`](crate::creature::Creature::use_action).
///
/// Both variants are returned before any resource deduction or world
/// mutation on the creature's side has happened.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum UseActionError {
    #[error("unknown action `{0}`")]
    NotFound(ActionId),
    #[error("action `{action}` unavailable: {reason}")]
    Unavailable {
        action: ActionId,
        reason: UnavailableReason,
    },
}
