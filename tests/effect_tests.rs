//! Effect interpreter integration tests.
//!
//! Full effect trees applied against a live combat state: AOE
//! re-targeting, per-target save branching, fault isolation, and the
//! save-gate modifiers on damage, conditions, and movement.

mod common;

use boss_engine::{
    Ability, Action, ActionKind, AreaSpec, Combatant, CombatState, Creature, DiceExpr, Effect,
    EffectOutcome, Interpreter, LocalCombatState, SaveSpec, Side, SummonSpec, TargetOptions,
    TargetSpec,
};

use common::ScriptedState;

fn arena() -> LocalCombatState {
    LocalCombatState::with_seed(42)
        .with_combatant(Combatant::new("dragon", "Dragon", Side::Monster, 300))
        .with_combatant(Combatant::new("fighter", "Fighter", Side::Player, 40))
        .with_combatant(
            Combatant::new("wizard", "Wizard", Side::Player, 25).with_resistance("fire"),
        )
}

fn lair(effects: impl IntoIterator<Item = Effect>) -> Action {
    let mut action = Action::new("test", "Test", ActionKind::Lair);
    action.effects = effects.into_iter().collect();
    action
}

fn run(action: &Action, state: &mut dyn CombatState) -> boss_engine::ActionResult {
    let mut interp = Interpreter::with_seed(7);
    interp.apply_action(action, &"dragon".into(), state, &TargetOptions::none())
}

/// AOE damage over N targets reports N entries and a total equal to the
/// sum of the adjusted per-target damages.
#[test]
fn test_aoe_damage_totals_adjusted_per_target() {
    let mut state = arena();
    let action = lair([Effect::aoe(
        AreaSpec::sphere(20),
        [Effect::typed_damage(TargetSpec::All, 10, "fire")],
    )]);

    let result = run(&action, &mut state);
    assert!(result.success);

    let EffectOutcome::Area { targets, effects, .. } = &result.effects[0] else {
        panic!("expected area outcome");
    };
    assert_eq!(targets.len(), 3);

    let EffectOutcome::Damage { total, targets: reports, .. } = &effects[0] else {
        panic!("expected damage outcome");
    };
    assert_eq!(reports.len(), 3);
    assert_eq!(*total, reports.iter().map(|r| r.damage).sum::<i64>());

    // The fire-resistant wizard takes half.
    let wizard = reports.iter().find(|r| r.target == "wizard".into()).unwrap();
    assert_eq!(wizard.damage, 5);
    assert!(wizard.resistance_applied);
    assert_eq!(*total, 25);
}

/// The save effect rolls per target and dispatches each to its own
/// branch, re-targeted to that single combatant.
#[test]
fn test_save_branches_per_target() {
    // Fighter rolls 20 (saves), wizard rolls 1 (fails).
    let mut state = ScriptedState::new(arena()).script_d20s([20, 1]);
    let action = lair([Effect::Save {
        targets: Some(TargetSpec::Players),
        save: SaveSpec::new(Ability::Dexterity, 15),
        on_success: vec![Effect::healing(TargetSpec::Selected, 5)],
        on_failure: vec![Effect::damage(TargetSpec::Selected, 10)],
    }]);

    let result = run(&action, &mut state);

    let EffectOutcome::Save { targets } = &result.effects[0] else {
        panic!("expected save outcome");
    };
    assert_eq!(targets.len(), 2);

    let fighter = &targets[0];
    assert_eq!(fighter.target, "fighter".into());
    assert!(fighter.outcome.saved);
    assert!(matches!(
        &fighter.effects[0],
        EffectOutcome::Healing { targets, .. } if targets[0].target == "fighter".into()
    ));

    let wizard = &targets[1];
    assert_eq!(wizard.target, "wizard".into());
    assert!(!wizard.outcome.saved);
    assert!(matches!(
        &wizard.effects[0],
        EffectOutcome::Damage { targets, .. } if targets[0].target == "wizard".into()
    ));
    assert_eq!(state.combatant(&"wizard".into()).unwrap().hp, 15);
    // Fighter was at full health; the heal restores nothing.
    assert_eq!(state.combatant(&"fighter".into()).unwrap().hp, 40);
}

/// With `half_on_success`, a successful save still runs the failure
/// branch, at half damage.
#[test]
fn test_save_half_on_success_halves_failure_branch() {
    let mut state = ScriptedState::new(arena()).script_d20s([20]);
    let action = lair([Effect::Save {
        targets: Some(TargetSpec::Specific {
            ids: vec!["fighter".into()],
        }),
        save: SaveSpec::new(Ability::Dexterity, 18).half_on_success(),
        on_success: Vec::new(),
        on_failure: vec![Effect::damage(TargetSpec::Selected, 11)],
    }]);

    let result = run(&action, &mut state);

    let EffectOutcome::Save { targets } = &result.effects[0] else {
        panic!("expected save outcome");
    };
    assert!(targets[0].outcome.saved);
    let EffectOutcome::Damage { total, .. } = &targets[0].effects[0] else {
        panic!("expected damage outcome");
    };
    assert_eq!(*total, 5);
    assert_eq!(state.combatant(&"fighter".into()).unwrap().hp, 35);
}

/// A damage effect with an embedded save gate negates on success.
#[test]
fn test_damage_save_gate_negates() {
    let mut state = ScriptedState::new(arena()).script_d20s([20, 1]);
    let action = lair([Effect::typed_damage(TargetSpec::Players, 12, "cold")
        .with_save(SaveSpec::new(Ability::Constitution, 15).negate_on_success())]);

    let result = run(&action, &mut state);

    let EffectOutcome::Damage { total, targets, .. } = &result.effects[0] else {
        panic!("expected damage outcome");
    };
    // Fighter saved (nothing), wizard failed (full 12).
    assert_eq!(targets[0].damage, 0);
    assert_eq!(targets[1].damage, 12);
    assert_eq!(*total, 12);
}

/// A condition save gate with `half_duration_on_success` rounds the
/// halved duration up.
#[test]
fn test_condition_half_duration_rounds_up() {
    let mut state = ScriptedState::new(arena()).script_d20s([20]);
    let action = lair([Effect::condition(
        TargetSpec::Specific {
            ids: vec!["fighter".into()],
        },
        "restrained",
        Some(5),
    )
    .with_save(SaveSpec::new(Ability::Strength, 15).half_duration_on_success())]);

    let result = run(&action, &mut state);

    let EffectOutcome::Condition { targets, .. } = &result.effects[0] else {
        panic!("expected condition outcome");
    };
    assert!(targets[0].applied);
    assert_eq!(targets[0].duration, Some(3));

    let fighter = state.combatant(&"fighter".into()).unwrap();
    assert_eq!(fighter.conditions[0].duration, Some(3));
}

/// Movement negated by a save never reaches the combat state, so it
/// succeeds even without a spatial model.
#[test]
fn test_movement_negated_on_save_needs_no_spatial_model() {
    let mut state = ScriptedState::new(arena()).script_d20s([20]);
    let action = lair([Effect::Movement {
        targets: Some(TargetSpec::Specific {
            ids: vec!["fighter".into()],
        }),
        distance: 20,
        direction: Some("away".to_string()),
        save: Some(SaveSpec::new(Ability::Strength, 15).negate_on_success()),
    }]);

    let result = run(&action, &mut state);
    assert!(result.success);

    let EffectOutcome::Movement { targets } = &result.effects[0] else {
        panic!("expected movement outcome");
    };
    assert!(!targets[0].moved);
    assert_eq!(targets[0].distance, 0);
}

/// Without a spatial model, unnegated movement fails but the effects
/// after it still run.
#[test]
fn test_movement_failure_is_isolated() {
    let mut state = arena();
    let action = lair([
        Effect::Movement {
            targets: Some(TargetSpec::Players),
            distance: 10,
            direction: None,
            save: None,
        },
        Effect::damage(TargetSpec::Players, 5),
    ]);

    let result = run(&action, &mut state);
    assert!(!result.success);
    assert!(matches!(result.effects[0], EffectOutcome::Failed { .. }));
    assert!(matches!(result.effects[1], EffectOutcome::Damage { .. }));
    assert_eq!(state.combatant(&"fighter".into()).unwrap().hp, 35);
}

/// Dice amounts route through the combat state's roller.
#[test]
fn test_dice_damage_rolls_once_for_all_targets() {
    let mut state = arena();
    let action = lair([Effect::damage(
        TargetSpec::Players,
        DiceExpr::new(2, 6, 3),
    )]);

    let result = run(&action, &mut state);

    let EffectOutcome::Damage { targets, .. } = &result.effects[0] else {
        panic!("expected damage outcome");
    };
    // One roll shared by every target.
    assert_eq!(targets[0].damage, targets[1].damage);
    let rolled = targets[0].damage;
    assert!((5..=15).contains(&rolled));
}

/// Healing is clamped by the combat state and reported per target.
#[test]
fn test_healing_reports_actual_amount() {
    let mut state = arena();
    state
        .combatant_mut(&"wizard".into())
        .unwrap()
        .hp = 10;

    let action = lair([Effect::healing(
        TargetSpec::Specific {
            ids: vec!["wizard".into()],
        },
        100,
    )]);
    let result = run(&action, &mut state);

    let EffectOutcome::Healing { total, targets } = &result.effects[0] else {
        panic!("expected healing outcome");
    };
    assert_eq!(*total, 15);
    assert_eq!(targets[0].healing, 15);
    assert_eq!(state.combatant(&"wizard".into()).unwrap().hp, 25);
}

/// Summoning joins the encounter mid-action; the new combatants are
/// visible to later effects.
#[test]
fn test_summons_visible_to_later_effects() {
    let mut state = arena();
    let action = lair([
        Effect::Summon {
            creature: SummonSpec {
                name: "Shadow".to_string(),
                max_hp: 16,
                side: Side::Monster,
            },
            count: 2,
            position: None,
        },
        Effect::damage(TargetSpec::Monsters, 1),
    ]);

    let result = run(&action, &mut state);

    let EffectOutcome::Summon { requested, summoned } = &result.effects[0] else {
        panic!("expected summon outcome");
    };
    assert_eq!(*requested, 2);
    assert_eq!(summoned.len(), 2);

    // dragon + 2 shadows.
    let EffectOutcome::Damage { targets, .. } = &result.effects[1] else {
        panic!("expected damage outcome");
    };
    assert_eq!(targets.len(), 3);
    assert_eq!(state.combatants().len(), 5);
}

/// An AOE wrapping a save wrapping damage: the full nesting works and
/// totals stay consistent.
#[test]
fn test_breath_weapon_tree() {
    // Everyone is in the cone; fighter saves, dragon and wizard fail.
    let mut state = ScriptedState::new(arena()).script_d20s([1, 20, 1]);
    let action = lair([Effect::aoe(
        AreaSpec::cone(60),
        [Effect::Save {
            targets: None,
            save: SaveSpec::new(Ability::Dexterity, 18).half_on_success(),
            on_success: Vec::new(),
            on_failure: vec![Effect::typed_damage(TargetSpec::Selected, 20, "fire")],
        }],
    )]);

    let result = run(&action, &mut state);
    assert!(result.success);

    let EffectOutcome::Area { effects, .. } = &result.effects[0] else {
        panic!("expected area outcome");
    };
    let EffectOutcome::Save { targets } = &effects[0] else {
        panic!("expected save outcome");
    };
    assert_eq!(targets.len(), 3);

    // Dragon failed: full 20. Fighter saved: half. Wizard failed but
    // resists fire: half again.
    assert_eq!(state.combatant(&"dragon".into()).unwrap().hp, 280);
    assert_eq!(state.combatant(&"fighter".into()).unwrap().hp, 30);
    assert_eq!(state.combatant(&"wizard".into()).unwrap().hp, 15);
}

/// Custom effects resolve targets but leave the payload untouched.
#[test]
fn test_custom_effect_passthrough() {
    let mut state = arena();
    let payload = serde_json::json!({"mechanic": "lair-collapse", "round": 3});
    let action = lair([Effect::Custom {
        targets: Some(TargetSpec::Monsters),
        payload: payload.clone(),
    }]);

    let result = run(&action, &mut state);
    assert!(result.success);

    let EffectOutcome::Custom { targets, payload: echoed } = &result.effects[0] else {
        panic!("expected custom outcome");
    };
    assert_eq!(targets.len(), 1);
    assert_eq!(echoed, &payload);
    // Nothing was mutated.
    assert_eq!(state.combatant(&"fighter".into()).unwrap().hp, 40);
}

/// Bad dice notation is rejected when the action is loaded, before the
/// interpreter can ever see it.
#[test]
fn test_action_with_bad_dice_fails_to_load() {
    let result = serde_json::from_str::<Action>(
        r#"{
            "id": "glitch",
            "name": "Glitch",
            "type": "lair",
            "effects": [{"type": "damage", "amount": "2x6"}]
        }"#,
    );
    assert!(result.is_err());
}

/// A whole action loaded from JSON resolves end to end through the
/// creature.
#[test]
fn test_action_from_json_end_to_end() {
    let action: Action = serde_json::from_str(
        r#"{
            "id": "tail-sweep",
            "name": "Tail Sweep",
            "type": "legendary",
            "cost": 2,
            "effects": [
                {
                    "type": "aoe",
                    "area": {"shape": "sphere", "size": 15},
                    "effects": [
                        {
                            "type": "damage",
                            "amount": 10,
                            "damage_type": "bludgeoning",
                            "save": {"ability": "dexterity", "dc": 20, "half_on_success": true}
                        }
                    ]
                }
            ]
        }"#,
    )
    .unwrap();

    let mut creature = Creature::new("dragon", "Dragon")
        .with_legendary_actions(3)
        .with_action(action);
    let mut state = arena();
    let mut interp = Interpreter::with_seed(7);

    let result = creature
        .use_action(&"tail-sweep".into(), &mut state, &TargetOptions::none(), &mut interp)
        .unwrap();

    assert!(result.success);
    assert_eq!(creature.remaining_legendary_actions(), 1);
    assert!(matches!(result.effects[0], EffectOutcome::Area { .. }));
}
