//! Outward notifications.
//!
//! Collaborators register listeners on the [`EventBus`]; the model publishes
//! through it and additionally hands the events of each step back to the
//! caller, so a headless caller can work without any listener attached.

use bunnysim_data::{CauseOfDeath, GeneKind};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum SimEvent {
    BunnyBorn {
        id: Uuid,
        father_id: Option<Uuid>,
        mother_id: Option<Uuid>,
        generation: u32,
        is_original_mutant: bool,
    },
    BunnyDied {
        id: Uuid,
        generation: u32,
        age: u32,
        cause: CauseOfDeath,
    },
    GenerationChanged {
        generation: u32,
    },
    MutationInjected {
        gene: GeneKind,
        count: usize,
        generation: u32,
    },
    /// Every bunny has died.
    AllDied {
        generation: u32,
    },
    /// The population reached its maximum.
    BunniesTookOver {
        generation: u32,
        population: usize,
    },
    /// The generation cap was reached.
    GenerationLimitReached {
        generation: u32,
    },
    /// The configured generation 0 was rejected and the default used instead.
    ConfigurationWarning {
        message: String,
    },
}

impl SimEvent {
    /// True for events that end a run.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SimEvent::AllDied { .. }
                | SimEvent::BunniesTookOver { .. }
                | SimEvent::GenerationLimitReached { .. }
        )
    }
}

impl fmt::Display for SimEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimEvent::BunnyBorn { id, generation, .. } => {
                write!(f, "bunny {id} born in generation {generation}")
            }
            SimEvent::BunnyDied {
                id,
                generation,
                cause,
                ..
            } => write!(f, "bunny {id} died of {cause} in generation {generation}"),
            SimEvent::GenerationChanged { generation } => write!(f, "generation {generation}"),
            SimEvent::MutationInjected {
                gene,
                count,
                generation,
            } => write!(f, "{count} bunnies mutated {gene} in generation {generation}"),
            SimEvent::AllDied { generation } => {
                write!(f, "all of the bunnies died in generation {generation}")
            }
            SimEvent::BunniesTookOver {
                generation,
                population,
            } => write!(
                f,
                "bunnies have taken over the world ({population} in generation {generation})"
            ),
            SimEvent::GenerationLimitReached { generation } => {
                write!(f, "generation limit of {generation} reached")
            }
            SimEvent::ConfigurationWarning { message } => write!(f, "warning: {message}"),
        }
    }
}

/// Listener callback.
pub type Listener = Box<dyn FnMut(&SimEvent) + Send>;

/// Handle returned by [`EventBus::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(usize);

#[derive(Default)]
pub struct EventBus {
    listeners: Vec<(ListenerId, Listener)>,
    next_id: usize,
    emitted: Vec<SimEvent>,
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .field("emitted", &self.emitted.len())
            .finish()
    }
}

impl EventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&SimEvent) + Send + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    pub fn publish(&mut self, event: SimEvent) {
        for (_, listener) in &mut self.listeners {
            listener(&event);
        }
        self.emitted.push(event);
    }

    /// Events published since the last call.
    pub fn take_emitted(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.emitted)
    }

    /// Drops undelivered events without notifying anyone.
    pub fn clear_emitted(&mut self) {
        self.emitted.clear();
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}
