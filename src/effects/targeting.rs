//! Target resolution.
//!
//! Turns a declarative [`TargetSpec`] into concrete combatant ids
//! against the current encounter. Specs are data; resolution is the only
//! place that looks at the world.

use serde::{Deserialize, Serialize};

use crate::combat::CombatState;
use crate::core::{CombatantId, EngineRng};

use super::AreaSpec;

/// Declarative target selection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TargetSpec {
    /// Every combatant.
    All,
    /// Combatants on the player side.
    Players,
    /// Combatants on the monster side.
    Monsters,
    /// Combatants on the acting creature's side (including it).
    Allies,
    /// Combatants on the other side.
    Enemies,
    /// The acting creature only.
    #[serde(rename = "self")]
    Actor,
    /// `count` combatants, chosen uniformly.
    Random { count: usize },
    /// Whoever the combat state reports inside the area.
    Area { area: AreaSpec },
    /// The listed ids, filtered to those present.
    Specific { ids: Vec<CombatantId> },
    /// The caller's explicitly selected targets.
    Selected,
}

/// Per-call targeting input: the caller's explicitly selected list.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetOptions {
    #[serde(default)]
    pub selected: Vec<CombatantId>,
}

impl TargetOptions {
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn selected(ids: impl IntoIterator<Item = CombatantId>) -> Self {
        Self {
            selected: ids.into_iter().collect(),
        }
    }
}

/// Resolve a spec to concrete combatant ids.
///
/// No spec falls back to the caller's selected targets. `allies` and
/// `enemies` compare against the acting creature's side; an actor the
/// state does not know resolves both to empty.
pub fn resolve_targets(
    spec: Option<&TargetSpec>,
    actor: &CombatantId,
    state: &dyn CombatState,
    options: &TargetOptions,
    rng: &mut EngineRng,
) -> Vec<CombatantId> {
    let Some(spec) = spec else {
        return options.selected.clone();
    };

    match spec {
        TargetSpec::All => state.combatants().iter().map(|c| c.id.clone()).collect(),
        TargetSpec::Players => by_side(state, crate::combat::Side::Player),
        TargetSpec::Monsters => by_side(state, crate::combat::Side::Monster),
        TargetSpec::Allies => match state.combatant(actor) {
            Some(me) => by_side(state, me.side),
            None => Vec::new(),
        },
        TargetSpec::Enemies => match state.combatant(actor) {
            Some(me) => {
                let mine = me.side;
                state
                    .combatants()
                    .iter()
                    .filter(|c| c.side != mine)
                    .map(|c| c.id.clone())
                    .collect()
            }
            None => Vec::new(),
        },
        TargetSpec::Actor => vec![actor.clone()],
        TargetSpec::Random { count } => {
            let mut ids: Vec<CombatantId> =
                state.combatants().iter().map(|c| c.id.clone()).collect();
            rng.pick(&mut ids, *count).to_vec()
        }
        TargetSpec::Area { area } => state.combatants_in_area(area),
        TargetSpec::Specific { ids } => state
            .combatants()
            .iter()
            .filter(|c| ids.contains(&c.id))
            .map(|c| c.id.clone())
            .collect(),
        TargetSpec::Selected => options.selected.clone(),
    }
}

fn by_side(state: &dyn CombatState, side: crate::combat::Side) -> Vec<CombatantId> {
    state
        .combatants()
        .iter()
        .filter(|c| c.side == side)
        .map(|c| c.id.clone())
        .collect()
}
