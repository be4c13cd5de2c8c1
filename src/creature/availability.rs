//! Action availability.
//!
//! Pure reads: given the creature's current resource state and the
//! encounter, decide which catalog entries are currently legal. Nothing
//! here mutates anything, so a failed check always leaves state
//! untouched.

use crate::actions::{Action, ActionKind};
use crate::combat::CombatState;
use crate::error::UnavailableReason;

use super::Creature;

/// Check one action against the creature's resource state.
///
/// `Ok(())` means the action is currently legal.
pub fn check_availability(
    creature: &Creature,
    action: &Action,
    state: &dyn CombatState,
) -> Result<(), UnavailableReason> {
    match action.kind {
        ActionKind::Legendary => {
            let remaining = creature.remaining_legendary_actions();
            if remaining >= action.cost {
                Ok(())
            } else {
                Err(UnavailableReason::InsufficientLegendaryActions {
                    cost: action.cost,
                    remaining,
                })
            }
        }

        ActionKind::Mythic => {
            if !creature.mythic_phase_active() {
                return Err(UnavailableReason::MythicPhaseInactive);
            }
            let remaining = creature.remaining_mythic_actions();
            if remaining >= action.cost {
                Ok(())
            } else {
                Err(UnavailableReason::InsufficientMythicActions {
                    cost: action.cost,
                    remaining,
                })
            }
        }

        ActionKind::VillainAction => {
            if creature.used_villain_actions_this_round() < creature.villain_actions_per_round() {
                Ok(())
            } else {
                Err(UnavailableReason::VillainActionSpent)
            }
        }

        ActionKind::ParagonAction => {
            if creature.current_paragon_phase() > 0 {
                Ok(())
            } else {
                Err(UnavailableReason::ParagonNotStarted)
            }
        }

        ActionKind::Recharge => match creature.recharge_state(&action.id) {
            None => Err(UnavailableReason::NoRechargeEntry),
            Some(entry) if entry.charged => Ok(()),
            Some(_) => Err(UnavailableReason::NotCharged),
        },

        ActionKind::Reaction => {
            if state.used_reaction() {
                return Err(UnavailableReason::ReactionSpent);
            }
            match &action.trigger {
                // No declared trigger: usable against any event.
                None => Ok(()),
                Some(trigger) => match state.trigger() {
                    None => Err(UnavailableReason::NoTrigger),
                    Some(event) if trigger.matches(event) => Ok(()),
                    Some(_) => Err(UnavailableReason::TriggerMismatch),
                },
            }
        }

        ActionKind::BonusAction => {
            if !state.is_turn_of(creature.id()) {
                Err(UnavailableReason::NotItsTurn)
            } else if state.used_bonus_action() {
                Err(UnavailableReason::BonusActionSpent)
            } else {
                Ok(())
            }
        }

        ActionKind::Lair => Ok(()),
    }
}
