//! Built-in archetype templates.
//!
//! A starter set covering the three economies game masters reach for
//! most: a legendary dragon, a mythic avatar, and a villain mastermind.

use crate::actions::{Action, ActionKind, ReactionTrigger};
use crate::core::{Ability, ActionId, DiceExpr, TemplateId};
use crate::effects::{AreaSpec, Effect, SaveSpec, SummonSpec, TargetSpec};

use super::library::{ActionTemplate, RechargeSeed, TemplateCategory, TemplateLibrary};

/// The built-in library.
pub(super) fn library() -> TemplateLibrary {
    let mut library = TemplateLibrary::new();

    library.add_category(TemplateCategory {
        id: "dragon".to_string(),
        name: "Dragons".to_string(),
    });
    library.add_category(TemplateCategory {
        id: "mythic".to_string(),
        name: "Mythic Creatures".to_string(),
    });
    library.add_category(TemplateCategory {
        id: "villain".to_string(),
        name: "Villains".to_string(),
    });

    library.add_template(ancient_dragon());
    library.add_template(mythic_avatar());
    library.add_template(villain_mastermind());

    library
}

fn ancient_dragon() -> ActionTemplate {
    ActionTemplate {
        id: TemplateId::new("ancient-dragon"),
        name: "Ancient Dragon".to_string(),
        category: "dragon".to_string(),
        description: "Legendary actions and a rechargeable breath weapon.".to_string(),
        max_legendary_actions: Some(3),
        max_mythic_actions: None,
        paragon_phases: None,
        villain_actions_per_round: None,
        recharge_abilities: vec![RechargeSeed {
            action_id: ActionId::new("fire-breath"),
            threshold: 5,
        }],
        actions: vec![
            Action::new("tail-attack", "Tail Attack", ActionKind::Legendary)
                .with_description("The dragon makes a tail attack.")
                .with_effect(Effect::typed_damage(
                    TargetSpec::Selected,
                    DiceExpr::new(2, 8, 8),
                    "bludgeoning",
                )),
            Action::new("wing-attack", "Wing Attack", ActionKind::Legendary)
                .with_description(
                    "The dragon beats its wings, battering and toppling everyone nearby.",
                )
                .with_cost(2)
                .with_effect(Effect::aoe(
                    AreaSpec::sphere(15),
                    [
                        Effect::typed_damage(
                            TargetSpec::All,
                            DiceExpr::new(2, 6, 8),
                            "bludgeoning",
                        )
                        .with_save(SaveSpec::new(Ability::Dexterity, 22).negate_on_success()),
                        Effect::condition(TargetSpec::All, "prone", None)
                            .with_save(SaveSpec::new(Ability::Dexterity, 22).negate_on_success()),
                    ],
                )),
            Action::new("fire-breath", "Fire Breath", ActionKind::Recharge)
                .with_description("A cone of fire; half damage on a successful save.")
                .with_effect(Effect::aoe(
                    AreaSpec::cone(60),
                    [Effect::typed_damage(
                        TargetSpec::All,
                        DiceExpr::new(13, 6, 0),
                        "fire",
                    )
                    .with_save(SaveSpec::new(Ability::Dexterity, 24).half_on_success())],
                )),
        ],
    }
}

fn mythic_avatar() -> ActionTemplate {
    ActionTemplate {
        id: TemplateId::new("mythic-avatar"),
        name: "Mythic Avatar".to_string(),
        category: "mythic".to_string(),
        description: "A second wind of mythic actions once bloodied.".to_string(),
        max_legendary_actions: Some(3),
        max_mythic_actions: Some(2),
        paragon_phases: None,
        villain_actions_per_round: None,
        recharge_abilities: Vec::new(),
        actions: vec![
            Action::new("rend", "Rend", ActionKind::Legendary)
                .with_effect(Effect::typed_damage(
                    TargetSpec::Selected,
                    DiceExpr::new(3, 10, 5),
                    "slashing",
                )),
            Action::new("mythic-restoration", "Mythic Restoration", ActionKind::Mythic)
                .with_description("The avatar knits itself back together.")
                .with_effect(Effect::healing(TargetSpec::Actor, DiceExpr::new(4, 12, 10))),
            Action::new("annihilating-ray", "Annihilating Ray", ActionKind::Mythic)
                .with_cost(2)
                .with_effect(
                    Effect::typed_damage(
                        TargetSpec::Random { count: 2 },
                        DiceExpr::new(6, 10, 0),
                        "radiant",
                    )
                    .with_save(SaveSpec::new(Ability::Constitution, 21).half_on_success()),
                ),
        ],
    }
}

fn villain_mastermind() -> ActionTemplate {
    ActionTemplate {
        id: TemplateId::new("villain-mastermind"),
        name: "Villain Mastermind".to_string(),
        category: "villain".to_string(),
        description: "One villain action per round plus a defensive reaction.".to_string(),
        max_legendary_actions: None,
        max_mythic_actions: None,
        paragon_phases: Some(2),
        villain_actions_per_round: Some(1),
        recharge_abilities: Vec::new(),
        actions: vec![
            Action::new("call-reinforcements", "Call Reinforcements", ActionKind::VillainAction)
                .with_description("Two guards answer the mastermind's signal.")
                .with_effect(Effect::Summon {
                    creature: SummonSpec {
                        name: "Guard".to_string(),
                        max_hp: 11,
                        side: crate::combat::Side::Monster,
                    },
                    count: 2,
                    position: None,
                }),
            Action::new("contingency-ward", "Contingency Ward", ActionKind::Reaction)
                .with_description("A prepared ward blunts an incoming spell.")
                .with_trigger(ReactionTrigger::SpellCast { min_level: Some(3) })
                .with_effect(Effect::healing(TargetSpec::Actor, DiceExpr::new(2, 10, 0))),
            Action::new("unveil-true-form", "Unveil True Form", ActionKind::ParagonAction)
                .with_description("The mastermind sheds its disguise.")
                .with_effect(Effect::Custom {
                    targets: Some(TargetSpec::Actor),
                    payload: serde_json::json!({"reveal": "true-form"}),
                }),
        ],
    }
}
