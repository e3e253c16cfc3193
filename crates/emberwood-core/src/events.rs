use serde::{Deserialize, Serialize};

use crate::types::{CookState, EntityHandle, FoodKind, HeldFood, VisitorRequest};

/// Notifications raised by the simulation for UI, audio and VFX.
///
/// Emitters push into an [`EventQueue`] during a tick; the session hands
/// the queue to the [`EventBus`] once the tick is done.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    FuelChanged {
        campfire: EntityHandle,
        current: f32,
        max: f32,
    },
    FireOut {
        campfire: EntityHandle,
    },
    FireRelit {
        campfire: EntityHandle,
    },
    CookStateChanged {
        station: EntityHandle,
        food: FoodKind,
        state: CookState,
    },
    CookingSlotChanged {
        station: EntityHandle,
        food: Option<FoodKind>,
    },
    WoodCountChanged {
        count: u32,
    },
    HeldFoodChanged {
        held: Option<HeldFood>,
    },
    VisitorRequestChanged {
        visitor: EntityHandle,
        request: VisitorRequest,
    },
    VisitorImpatient {
        visitor: EntityHandle,
    },
    VisitorServed {
        visitor: EntityHandle,
        correct: bool,
    },
    VisitorDeparted {
        visitor: EntityHandle,
    },
    TreeCut {
        tree: EntityHandle,
        spawned: u32,
    },
    TreeRegrown {
        tree: EntityHandle,
    },
    TargetChanged {
        target: Option<EntityHandle>,
    },
    InteractionStarted {
        target: EntityHandle,
        duration: f32,
    },
    InteractionCancelled {
        target: EntityHandle,
    },
}

impl GameEvent {
    /// Short stable name, used for tallies and log lines.
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::FuelChanged { .. } => "FuelChanged",
            GameEvent::FireOut { .. } => "FireOut",
            GameEvent::FireRelit { .. } => "FireRelit",
            GameEvent::CookStateChanged { .. } => "CookStateChanged",
            GameEvent::CookingSlotChanged { .. } => "CookingSlotChanged",
            GameEvent::WoodCountChanged { .. } => "WoodCountChanged",
            GameEvent::HeldFoodChanged { .. } => "HeldFoodChanged",
            GameEvent::VisitorRequestChanged { .. } => "VisitorRequestChanged",
            GameEvent::VisitorImpatient { .. } => "VisitorImpatient",
            GameEvent::VisitorServed { .. } => "VisitorServed",
            GameEvent::VisitorDeparted { .. } => "VisitorDeparted",
            GameEvent::TreeCut { .. } => "TreeCut",
            GameEvent::TreeRegrown { .. } => "TreeRegrown",
            GameEvent::TargetChanged { .. } => "TargetChanged",
            GameEvent::InteractionStarted { .. } => "InteractionStarted",
            GameEvent::InteractionCancelled { .. } => "InteractionCancelled",
        }
    }
}

/// Ordered buffer of events raised during a tick.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: Vec<GameEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &GameEvent> {
        self.events.iter()
    }

    /// Remove and return all queued events in emission order.
    pub fn drain(&mut self) -> std::vec::Drain<'_, GameEvent> {
        self.events.drain(..)
    }
}

/// Token returned by [`EventBus::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&GameEvent)>;

/// Explicit subscriber list. Subscribers see events by shared reference
/// and have no path back to the emitter.
#[derive(Default)]
pub struct EventBus {
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_id: u64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, subscriber: impl FnMut(&GameEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Returns false if the id was unknown or already removed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Deliver every queued event, in order, to every subscriber in
    /// subscription order. Leaves the queue empty.
    pub fn dispatch(&mut self, queue: &mut EventQueue) -> usize {
        let mut delivered = 0;
        for event in queue.drain() {
            for (_, subscriber) in self.subscribers.iter_mut() {
                subscriber(&event);
            }
            delivered += 1;
        }
        delivered
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
