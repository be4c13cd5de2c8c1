//! The creature aggregate root.
//!
//! Owns every resource pool, the action catalog, the recharge table,
//! and the action history. All mutation goes through its methods so the
//! pool invariants hold at all times: `0 <= remaining <= max` for every
//! pool, the paragon phase never decreases, and a recharge flag flips
//! to charged only via a recharge roll and to spent only via use of its
//! action.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::actions::{Action, ActionKind};
use crate::combat::CombatState;
use crate::core::{ActionId, CombatantId};
use crate::effects::{ActionResult, Interpreter, TargetOptions};
use crate::error::UseActionError;
use crate::events::{CreatureEvent, EventBus, ListenerId};

use super::availability::check_availability;

/// Recharge bookkeeping for one action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RechargeState {
    /// Minimum d6 roll that recharges the ability.
    pub threshold: u8,
    pub charged: bool,
}

/// One executed action, oldest first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub action_id: ActionId,
    pub name: String,
    pub kind: ActionKind,
    pub round: u32,
    pub success: bool,
}

/// A boss monster with special action economies.
#[derive(Debug, Serialize, Deserialize)]
pub struct Creature {
    id: CombatantId,
    name: String,
    #[serde(default)]
    actions: Vec<Action>,
    #[serde(default)]
    max_legendary_actions: u32,
    #[serde(default)]
    remaining_legendary_actions: u32,
    #[serde(default)]
    max_mythic_actions: u32,
    #[serde(default)]
    remaining_mythic_actions: u32,
    #[serde(default)]
    mythic_phase_active: bool,
    #[serde(default)]
    paragon_phases: u32,
    #[serde(default)]
    current_paragon_phase: u32,
    #[serde(default)]
    villain_actions_per_round: u32,
    #[serde(default)]
    used_villain_actions_this_round: u32,
    #[serde(default)]
    recharge: FxHashMap<ActionId, RechargeState>,
    #[serde(default)]
    resistances: FxHashSet<String>,
    #[serde(default)]
    immunities: FxHashSet<String>,
    #[serde(default)]
    vulnerabilities: FxHashSet<String>,
    #[serde(default)]
    history: Vec<ActionRecord>,
    #[serde(skip)]
    listeners: EventBus,
}

impl Creature {
    /// Create a creature with empty pools and no actions.
    #[must_use]
    pub fn new(id: impl Into<CombatantId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            actions: Vec::new(),
            max_legendary_actions: 0,
            remaining_legendary_actions: 0,
            max_mythic_actions: 0,
            remaining_mythic_actions: 0,
            mythic_phase_active: false,
            paragon_phases: 0,
            current_paragon_phase: 0,
            villain_actions_per_round: 0,
            used_villain_actions_this_round: 0,
            recharge: FxHashMap::default(),
            resistances: FxHashSet::default(),
            immunities: FxHashSet::default(),
            vulnerabilities: FxHashSet::default(),
            history: Vec::new(),
            listeners: EventBus::new(),
        }
    }

    /// Grant a legendary pool, starting full (builder pattern).
    #[must_use]
    pub fn with_legendary_actions(mut self, max: u32) -> Self {
        self.max_legendary_actions = max;
        self.remaining_legendary_actions = max;
        self
    }

    /// Grant a mythic pool, starting full but gated behind the mythic
    /// phase (builder pattern).
    #[must_use]
    pub fn with_mythic_actions(mut self, max: u32) -> Self {
        self.max_mythic_actions = max;
        self.remaining_mythic_actions = max;
        self
    }

    /// Grant paragon phases, none started yet (builder pattern).
    #[must_use]
    pub fn with_paragon_phases(mut self, phases: u32) -> Self {
        self.paragon_phases = phases;
        self
    }

    /// Grant villain actions per round (builder pattern).
    #[must_use]
    pub fn with_villain_actions(mut self, per_round: u32) -> Self {
        self.villain_actions_per_round = per_round;
        self
    }

    /// Bind a recharge die to an action (builder pattern).
    #[must_use]
    pub fn with_recharge(mut self, action: ActionId, threshold: u8, charged: bool) -> Self {
        self.recharge
            .insert(action, RechargeState { threshold, charged });
        self
    }

    /// Add an action (builder pattern). Unlike [`add_action`] this emits
    /// no event, which is fine before anyone has subscribed.
    ///
    /// [`add_action`]: Self::add_action
    #[must_use]
    pub fn with_action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    /// Add a damage resistance tag (builder pattern). Informational:
    /// adjustments are applied by the combat-state collaborator.
    #[must_use]
    pub fn with_resistance(mut self, damage_type: impl Into<String>) -> Self {
        self.resistances.insert(damage_type.into());
        self
    }

    /// Add a damage immunity tag (builder pattern).
    #[must_use]
    pub fn with_immunity(mut self, damage_type: impl Into<String>) -> Self {
        self.immunities.insert(damage_type.into());
        self
    }

    /// Add a damage vulnerability tag (builder pattern).
    #[must_use]
    pub fn with_vulnerability(mut self, damage_type: impl Into<String>) -> Self {
        self.vulnerabilities.insert(damage_type.into());
        self
    }

    // === Accessors ===

    #[must_use]
    pub fn id(&self) -> &CombatantId {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    #[must_use]
    pub fn action(&self, id: &ActionId) -> Option<&Action> {
        self.actions.iter().find(|a| &a.id == id)
    }

    #[must_use]
    pub fn max_legendary_actions(&self) -> u32 {
        self.max_legendary_actions
    }

    #[must_use]
    pub fn remaining_legendary_actions(&self) -> u32 {
        self.remaining_legendary_actions
    }

    #[must_use]
    pub fn max_mythic_actions(&self) -> u32 {
        self.max_mythic_actions
    }

    #[must_use]
    pub fn remaining_mythic_actions(&self) -> u32 {
        self.remaining_mythic_actions
    }

    #[must_use]
    pub fn mythic_phase_active(&self) -> bool {
        self.mythic_phase_active
    }

    #[must_use]
    pub fn paragon_phases(&self) -> u32 {
        self.paragon_phases
    }

    #[must_use]
    pub fn current_paragon_phase(&self) -> u32 {
        self.current_paragon_phase
    }

    #[must_use]
    pub fn villain_actions_per_round(&self) -> u32 {
        self.villain_actions_per_round
    }

    #[must_use]
    pub fn used_villain_actions_this_round(&self) -> u32 {
        self.used_villain_actions_this_round
    }

    #[must_use]
    pub fn recharge_state(&self, action: &ActionId) -> Option<&RechargeState> {
        self.recharge.get(action)
    }

    #[must_use]
    pub fn history(&self) -> &[ActionRecord] {
        &self.history
    }

    #[must_use]
    pub fn resistances(&self) -> &FxHashSet<String> {
        &self.resistances
    }

    #[must_use]
    pub fn immunities(&self) -> &FxHashSet<String> {
        &self.immunities
    }

    #[must_use]
    pub fn vulnerabilities(&self) -> &FxHashSet<String> {
        &self.vulnerabilities
    }

    // === Listeners ===

    /// Register a lifecycle listener; the returned id removes it again.
    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&CreatureEvent) + Send + 'static,
    ) -> ListenerId {
        self.listeners.subscribe(listener)
    }

    /// Remove a listener. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    // === Catalog ===

    /// Append an action to the catalog.
    pub fn add_action(&mut self, action: Action) {
        let action_id = action.id.clone();
        self.actions.push(action);
        self.listeners
            .emit(&CreatureEvent::ActionAdded { action_id });
    }

    /// Remove an action, dropping any recharge entry bound to it.
    pub fn remove_action(&mut self, id: &ActionId) -> Option<Action> {
        let index = self.actions.iter().position(|a| &a.id == id)?;
        let action = self.actions.remove(index);
        self.recharge.remove(id);
        self.listeners.emit(&CreatureEvent::ActionRemoved {
            action_id: action.id.clone(),
        });
        Some(action)
    }

    /// Bind (or rebind) a recharge die to an action, starting charged.
    pub fn set_recharge(&mut self, action: ActionId, threshold: u8) {
        self.recharge.insert(
            action,
            RechargeState {
                threshold,
                charged: true,
            },
        );
    }

    // === Availability ===

    /// The currently legal subset of the catalog. Pure read.
    #[must_use]
    pub fn available_actions(&self, state: &dyn CombatState) -> Vec<&Action> {
        self.actions
            .iter()
            .filter(|action| check_availability(self, action, state).is_ok())
            .collect()
    }

    // === Resource lifecycle ===

    /// Refill the legendary pool. Callers invoke this at the start of
    /// the creature's own turn; it is not automatic.
    pub fn reset_legendary_actions(&mut self) {
        self.remaining_legendary_actions = self.max_legendary_actions;
        self.listeners.emit(&CreatureEvent::LegendaryActionsReset {
            remaining: self.remaining_legendary_actions,
        });
    }

    /// Refill the mythic pool.
    pub fn reset_mythic_actions(&mut self) {
        self.remaining_mythic_actions = self.max_mythic_actions;
        self.listeners.emit(&CreatureEvent::MythicActionsReset {
            remaining: self.remaining_mythic_actions,
        });
    }

    /// Enter the mythic phase and refill the mythic pool.
    pub fn activate_mythic_phase(&mut self) {
        self.mythic_phase_active = true;
        self.reset_mythic_actions();
        self.listeners.emit(&CreatureEvent::MythicPhaseActivated);
    }

    /// Leave the mythic phase. The pool drops to zero and stays there
    /// until the phase is activated again.
    pub fn deactivate_mythic_phase(&mut self) {
        self.mythic_phase_active = false;
        self.remaining_mythic_actions = 0;
        self.listeners.emit(&CreatureEvent::MythicPhaseDeactivated);
    }

    /// Clear the villain-action counter. Callers invoke this at round
    /// start.
    pub fn reset_villain_actions(&mut self) {
        self.used_villain_actions_this_round = 0;
        self.listeners.emit(&CreatureEvent::VillainActionsReset);
    }

    /// Advance to the next paragon phase, if one remains. Never
    /// decrements and never wraps.
    pub fn advance_paragon_phase(&mut self) -> bool {
        if self.current_paragon_phase >= self.paragon_phases {
            return false;
        }
        self.current_paragon_phase += 1;
        self.listeners.emit(&CreatureEvent::ParagonPhaseAdvanced {
            phase: self.current_paragon_phase,
        });
        true
    }

    /// Roll a d6 for every spent recharge ability; a roll at or above
    /// its threshold charges it. Charged entries are untouched. Returns
    /// the newly charged action ids.
    pub fn attempt_recharge(&mut self, state: &mut dyn CombatState) -> Vec<ActionId> {
        let mut ids: Vec<ActionId> = self.recharge.keys().cloned().collect();
        ids.sort();

        let mut recharged = Vec::new();
        for id in ids {
            let Some(entry) = self.recharge.get_mut(&id) else {
                continue;
            };
            if entry.charged {
                continue;
            }
            let roll = state.roll_d6();
            if roll >= i64::from(entry.threshold) {
                entry.charged = true;
                recharged.push(id);
            }
        }

        for id in &recharged {
            self.listeners.emit(&CreatureEvent::AbilityRecharged {
                action_id: id.clone(),
            });
        }
        recharged
    }

    // === Orchestration ===

    /// Execute an action: availability check, effect interpretation,
    /// resource deduction, history append, then event emission.
    ///
    /// Availability is checked before any mutation, so an `Err` leaves
    /// creature and encounter untouched. Once the check passes,
    /// deduction and the history append happen regardless of
    /// effect-level failures inside the result tree.
    pub fn use_action(
        &mut self,
        action_id: &ActionId,
        state: &mut dyn CombatState,
        options: &TargetOptions,
        interpreter: &mut Interpreter,
    ) -> Result<ActionResult, UseActionError> {
        let Some(action) = self.action(action_id).cloned() else {
            warn!(creature = %self.name, action = %action_id, "unknown action");
            return Err(UseActionError::NotFound(action_id.clone()));
        };

        if let Err(reason) = check_availability(self, &action, state) {
            warn!(creature = %self.name, action = %action_id, %reason, "action unavailable");
            return Err(UseActionError::Unavailable {
                action: action_id.clone(),
                reason,
            });
        }

        let result = interpreter.apply_action(&action, &self.id, state, options);
        self.deduct(&action, state);

        self.history.push(ActionRecord {
            action_id: action.id.clone(),
            name: action.name.clone(),
            kind: action.kind,
            round: state.round(),
            success: result.success,
        });

        debug!(creature = %self.name, action = %action_id, success = result.success, "action used");
        self.listeners.emit(&CreatureEvent::ActionUsed {
            action_id: action.id,
            kind: action.kind,
            success: result.success,
        });

        Ok(result)
    }

    /// Pay the action's resource cost.
    fn deduct(&mut self, action: &Action, state: &mut dyn CombatState) {
        match action.kind {
            ActionKind::Legendary => {
                self.remaining_legendary_actions =
                    self.remaining_legendary_actions.saturating_sub(action.cost);
            }
            ActionKind::Mythic => {
                self.remaining_mythic_actions =
                    self.remaining_mythic_actions.saturating_sub(action.cost);
            }
            ActionKind::VillainAction => {
                self.used_villain_actions_this_round += 1;
            }
            ActionKind::Recharge => {
                if let Some(entry) = self.recharge.get_mut(&action.id) {
                    entry.charged = false;
                }
            }
            ActionKind::Reaction => state.set_reaction_used(true),
            ActionKind::BonusAction => state.set_bonus_action_used(true),
            ActionKind::Lair | ActionKind::ParagonAction => {}
        }
    }

    // === Serialization ===

    /// Serialize to JSON. Listeners are not part of the representation;
    /// the action history is.
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }

    /// Reconstruct from JSON produced by [`to_json`](Self::to_json).
    pub fn from_json(value: serde_json::Value) -> serde_json::Result<Self> {
        serde_json::from_value(value)
    }
}
