//! Creature lifecycle events.
//!
//! A synchronous listener bus. Listeners run in subscription order; a
//! panicking listener is caught and logged so it can neither block the
//! listeners after it nor abort the operation that emitted the event.

use std::panic::{catch_unwind, AssertUnwindSafe};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::actions::ActionKind;
use crate::core::ActionId;

/// Something a creature did or had done to it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CreatureEvent {
    ActionAdded {
        action_id: ActionId,
    },
    ActionRemoved {
        action_id: ActionId,
    },
    ActionUsed {
        action_id: ActionId,
        kind: ActionKind,
        success: bool,
    },
    LegendaryActionsReset {
        remaining: u32,
    },
    MythicActionsReset {
        remaining: u32,
    },
    VillainActionsReset,
    MythicPhaseActivated,
    MythicPhaseDeactivated,
    ParagonPhaseAdvanced {
        phase: u32,
    },
    AbilityRecharged {
        action_id: ActionId,
    },
}

/// Handle for removing a listener.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&CreatureEvent) + Send>;

/// Synchronous listener bus.
#[derive(Default)]
pub struct EventBus {
    listeners: Vec<(ListenerId, Listener)>,
    next_id: u64,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl EventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener; the returned id removes it again.
    pub fn subscribe(
        &mut self,
        listener: impl FnMut(&CreatureEvent) + Send + 'static,
    ) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Deliver `event` to every listener, in subscription order.
    pub fn emit(&mut self, event: &CreatureEvent) {
        for (id, listener) in &mut self.listeners {
            if catch_unwind(AssertUnwindSafe(|| listener(event))).is_err() {
                warn!(listener = id.0, ?event, "listener panicked, continuing");
            }
        }
    }
}
