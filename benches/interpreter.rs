//! Interpreter throughput benchmarks.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use boss_engine::{
    Ability, Action, ActionKind, AreaSpec, Combatant, Creature, DiceExpr, Effect, Interpreter,
    LocalCombatState, SaveSpec, Side, TargetOptions, TargetSpec,
};

fn arena(combatants: usize) -> LocalCombatState {
    let mut state = LocalCombatState::with_seed(42)
        .with_combatant(Combatant::new("dragon", "Dragon", Side::Monster, 546));
    for i in 0..combatants {
        state.add_combatant(Combatant::new(
            format!("hero-{i}"),
            format!("Hero {i}"),
            Side::Player,
            45,
        ));
    }
    state
}

fn breath_weapon() -> Action {
    Action::new("fire-breath", "Fire Breath", ActionKind::Recharge).with_effect(Effect::aoe(
        AreaSpec::cone(60),
        [
            Effect::typed_damage(TargetSpec::All, DiceExpr::new(13, 6, 0), "fire")
                .with_save(SaveSpec::new(Ability::Dexterity, 24).half_on_success()),
        ],
    ))
}

fn bench_apply_action(c: &mut Criterion) {
    let mut group = c.benchmark_group("apply_action");
    for size in [4usize, 16, 64] {
        group.bench_with_input(BenchmarkId::new("breath", size), &size, |b, &size| {
            let action = breath_weapon();
            let mut state = arena(size);
            let mut interp = Interpreter::with_seed(7);
            b.iter(|| {
                let result = interp.apply_action(
                    black_box(&action),
                    &"dragon".into(),
                    &mut state,
                    &TargetOptions::none(),
                );
                black_box(result)
            });
        });
    }
    group.finish();
}

fn bench_available_actions(c: &mut Criterion) {
    let mut creature = Creature::new("dragon", "Dragon")
        .with_legendary_actions(3)
        .with_mythic_actions(2)
        .with_villain_actions(1)
        .with_paragon_phases(2);
    for i in 0..20 {
        let kind = match i % 5 {
            0 => ActionKind::Legendary,
            1 => ActionKind::Mythic,
            2 => ActionKind::Lair,
            3 => ActionKind::VillainAction,
            _ => ActionKind::ParagonAction,
        };
        creature = creature.with_action(Action::new(
            format!("act-{i}"),
            format!("Act {i}"),
            kind,
        ));
    }
    let state = arena(8);

    c.bench_function("available_actions/20", |b| {
        b.iter(|| black_box(creature.available_actions(black_box(&state))))
    });
}

criterion_group!(benches, bench_apply_action, bench_available_actions);
criterion_main!(benches);
