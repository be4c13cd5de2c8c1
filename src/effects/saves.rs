//! Saving-throw evaluation.

use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};

use crate::combat::{Combatant, CombatState};
use crate::core::Ability;

use super::SaveSpec;

/// The result of one saving throw.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveOutcome {
    pub ability: Ability,
    pub dc: i64,
    /// The kept natural die.
    pub natural: i64,
    pub bonus: i64,
    pub total: i64,
    pub saved: bool,
    /// Every d20 rolled: two under advantage or disadvantage.
    pub rolls: SmallVec<[i64; 2]>,
}

/// Roll `target`'s saving throw against `save`.
///
/// The bonus is the explicit override if the stat block has one, else
/// the ability modifier. Advantage keeps the higher of two dice,
/// disadvantage the lower; when both flags are set, advantage wins.
/// A natural 20 always succeeds and a natural 1 always fails, whatever
/// the bonus and DC.
pub fn check_save(target: &Combatant, save: &SaveSpec, state: &mut dyn CombatState) -> SaveOutcome {
    let bonus = target.save_bonus(save.ability);

    let first = state.roll_d20();
    let mut rolls: SmallVec<[i64; 2]> = smallvec![first];
    let natural = if save.advantage {
        let second = state.roll_d20();
        rolls.push(second);
        first.max(second)
    } else if save.disadvantage {
        let second = state.roll_d20();
        rolls.push(second);
        first.min(second)
    } else {
        first
    };

    let total = natural + bonus;
    let saved = match natural {
        20 => true,
        1 => false,
        _ => total >= save.dc,
    };

    SaveOutcome {
        ability: save.ability,
        dc: save.dc,
        natural,
        bonus,
        total,
        saved,
        rolls,
    }
}
