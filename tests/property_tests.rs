//! Property tests for the engine invariants.

mod common;

use boss_engine::{
    Ability, Action, ActionId, ActionKind, Combatant, CombatState, Creature, DiceExpr, Effect,
    Interpreter, LocalCombatState, SaveSpec, Side, TargetOptions, TargetSpec,
};
use proptest::prelude::*;

use common::ScriptedState;

fn check_save_with_roll(bonus: i64, dc: i64, roll: i64) -> bool {
    let target = Combatant::new("target", "Target", Side::Player, 10)
        .with_saving_throw(Ability::Wisdom, bonus);
    let mut state = ScriptedState::new(LocalCombatState::with_seed(0)).script_d20s([roll]);
    boss_engine::effects::check_save(&target, &SaveSpec::new(Ability::Wisdom, dc), &mut state).saved
}

proptest! {
    /// Legendary pool bounds hold under arbitrary action sequences,
    /// with resets interleaved.
    #[test]
    fn prop_legendary_pool_stays_in_bounds(
        max in 0u32..6,
        sequence in proptest::collection::vec(0usize..4, 0..40),
    ) {
        let mut creature = Creature::new("boss", "Boss").with_legendary_actions(max);
        for cost in 1..=3u32 {
            creature = creature.with_action(
                Action::new(format!("act-{cost}"), format!("Act {cost}"), ActionKind::Legendary)
                    .with_cost(cost)
                    .with_effect(Effect::damage(TargetSpec::Enemies, 1)),
            );
        }
        let mut state = LocalCombatState::with_seed(1)
            .with_combatant(Combatant::new("boss", "Boss", Side::Monster, 100))
            .with_combatant(Combatant::new("hero", "Hero", Side::Player, 100));
        let mut interp = Interpreter::with_seed(1);

        for step in sequence {
            if step == 3 {
                creature.reset_legendary_actions();
            } else {
                let id = ActionId::new(format!("act-{}", step + 1));
                let _ = creature.use_action(&id, &mut state, &TargetOptions::none(), &mut interp);
            }
            prop_assert!(creature.remaining_legendary_actions() <= creature.max_legendary_actions());
        }

        creature.reset_legendary_actions();
        prop_assert_eq!(creature.remaining_legendary_actions(), max);
    }

    /// The paragon phase counter is monotone and never passes its bound.
    #[test]
    fn prop_paragon_phase_monotone_and_bounded(
        phases in 0u32..6,
        attempts in 0usize..20,
    ) {
        let mut creature = Creature::new("boss", "Boss").with_paragon_phases(phases);
        let mut last = creature.current_paragon_phase();

        for _ in 0..attempts {
            let advanced = creature.advance_paragon_phase();
            let current = creature.current_paragon_phase();
            prop_assert!(current >= last);
            prop_assert!(current <= phases);
            prop_assert_eq!(advanced, current == last + 1);
            last = current;
        }
    }

    /// A natural 20 saves and a natural 1 fails, for any bonus and DC.
    #[test]
    fn prop_natural_rolls_override_arithmetic(bonus in -30i64..30, dc in -10i64..50) {
        prop_assert!(check_save_with_roll(bonus, dc, 20));
        prop_assert!(!check_save_with_roll(bonus, dc, 1));
    }

    /// Between the naturals, the save is pure arithmetic.
    #[test]
    fn prop_save_arithmetic(bonus in -10i64..10, dc in 0i64..30, roll in 2i64..20) {
        prop_assert_eq!(check_save_with_roll(bonus, dc, roll), roll + bonus >= dc);
    }

    /// A recharge roll charges the ability exactly when it meets the
    /// threshold.
    #[test]
    fn prop_recharge_threshold(threshold in 1u8..=6, roll in 1i64..=6) {
        let mut creature = Creature::new("boss", "Boss")
            .with_recharge(ActionId::new("breath"), threshold, false);
        let mut state = ScriptedState::new(LocalCombatState::with_seed(0)).script_d6s([roll]);

        let recharged = creature.attempt_recharge(&mut state);
        let charged = creature.recharge_state(&"breath".into()).unwrap().charged;

        prop_assert_eq!(charged, roll >= i64::from(threshold));
        prop_assert_eq!(recharged.len(), usize::from(charged));
    }

    /// Dice notation survives a display/parse round trip.
    #[test]
    fn prop_dice_notation_round_trips(count in 1u32..100, sides in 1u32..1000, modifier in -50i64..50) {
        let dice = DiceExpr::new(count, sides, modifier);
        let reparsed: DiceExpr = dice.to_string().parse().unwrap();
        prop_assert_eq!(reparsed, dice);
    }

    /// Rolls always land inside the expression's bounds.
    #[test]
    fn prop_dice_rolls_within_bounds(count in 1u32..10, sides in 1u32..20, seed in 0u64..1000) {
        let dice = DiceExpr::new(count, sides, 0);
        let mut state = LocalCombatState::with_seed(seed);
        let total = state.roll_dice(&dice);
        prop_assert!(total >= dice.min() && total <= dice.max());
    }
}
