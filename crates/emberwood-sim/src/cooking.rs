use emberwood_core::config::{CookThresholds, CookingConfig};
use emberwood_core::events::{EventQueue, GameEvent};
use emberwood_core::timer::Timer;
use emberwood_core::types::{CookState, EntityHandle, FoodKind, HeldFood};
use thiserror::Error;

/// Why a cooking slot call did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CookingRejected {
    #[error("slot already holds {0:?}")]
    SlotOccupied(FoodKind),
    #[error("slot is empty")]
    SlotEmpty,
    #[error("no cooking profile for {0:?}")]
    UnknownFood(FoodKind),
}

#[derive(Debug, Clone)]
struct CookingSlot {
    kind: FoodKind,
    /// State the item arrived in; the station never reports less.
    initial: CookState,
    thresholds: CookThresholds,
    heat: Timer,
    state: CookState,
}

/// Raw -> Cooked -> Burnt state for the single item on a station.
///
/// Heat exposure restarts from zero on every placement. The reported state
/// is the later of the arrival state and the state the timer has reached,
/// so it never moves backwards while the item stays put.
#[derive(Debug, Clone)]
pub struct CookingProcess {
    station: EntityHandle,
    cooking: CookingConfig,
    slot: Option<CookingSlot>,
    warned: Vec<FoodKind>,
}

impl CookingProcess {
    pub fn new(station: EntityHandle, cooking: &CookingConfig) -> Self {
        Self {
            station,
            cooking: cooking.clone(),
            slot: None,
            warned: Vec::new(),
        }
    }

    pub fn station(&self) -> EntityHandle {
        self.station
    }

    pub fn is_occupied(&self) -> bool {
        self.slot.is_some()
    }

    /// Food currently on the station.
    pub fn food(&self) -> Option<FoodKind> {
        self.slot.as_ref().map(|s| s.kind)
    }

    pub fn state(&self) -> Option<CookState> {
        self.slot.as_ref().map(|s| s.state)
    }

    /// Heat-exposure seconds since placement.
    pub fn elapsed(&self) -> Option<f32> {
        self.slot.as_ref().map(|s| s.heat.elapsed())
    }

    /// Put an item on the station and start timing from zero.
    pub fn place_item(
        &mut self,
        kind: FoodKind,
        initial: CookState,
        events: &mut EventQueue,
    ) -> Result<(), CookingRejected> {
        if let Some(slot) = &self.slot {
            return Err(CookingRejected::SlotOccupied(slot.kind));
        }
        let Some(thresholds) = self.cooking.thresholds(kind) else {
            if !self.warned.contains(&kind) {
                log::warn!(
                    "station {}: no cooking profile for {:?}, cannot cook it",
                    self.station,
                    kind
                );
                self.warned.push(kind);
            }
            return Err(CookingRejected::UnknownFood(kind));
        };

        let mut slot = CookingSlot {
            kind,
            initial,
            thresholds,
            heat: Timer::stopwatch(),
            state: initial,
        };
        if is_terminal(&slot) {
            slot.heat.pause();
        }
        self.slot = Some(slot);
        log::debug!("station {}: placed {:?} ({:?})", self.station, kind, initial);
        events.push(GameEvent::CookingSlotChanged {
            station: self.station,
            food: Some(kind),
        });
        Ok(())
    }

    /// Clear the slot and hand back the item in whatever state it reached.
    pub fn remove_item(&mut self, events: &mut EventQueue) -> Result<HeldFood, CookingRejected> {
        let slot = self.slot.take().ok_or(CookingRejected::SlotEmpty)?;
        events.push(GameEvent::CookingSlotChanged {
            station: self.station,
            food: None,
        });
        Ok(HeldFood {
            kind: slot.kind,
            state: slot.state,
        })
    }

    /// Apply `dt` seconds of heat. Raises one event per threshold crossed.
    pub fn tick(&mut self, dt: f32, events: &mut EventQueue) {
        let Some(slot) = self.slot.as_mut() else {
            return;
        };
        let elapsed = slot.heat.tick(dt);
        let reached = state_at(elapsed, &slot.thresholds).max(slot.initial);
        if reached <= slot.state {
            return;
        }

        for step in [CookState::Cooked, CookState::Burnt] {
            if step > slot.state && step <= reached {
                events.push(GameEvent::CookStateChanged {
                    station: self.station,
                    food: slot.kind,
                    state: step,
                });
            }
        }
        slot.state = reached;
        if is_terminal(slot) {
            slot.heat.pause();
        }
    }
}

/// State implied by `elapsed` seconds of heat alone.
fn state_at(elapsed: f32, thresholds: &CookThresholds) -> CookState {
    match thresholds.burn_time {
        Some(burn) if elapsed >= burn => CookState::Burnt,
        _ if elapsed >= thresholds.cook_time => CookState::Cooked,
        _ => CookState::Raw,
    }
}

/// Burnt food, and cooked food that cannot burn, stop advancing.
fn is_terminal(slot: &CookingSlot) -> bool {
    match slot.state {
        CookState::Burnt => true,
        CookState::Cooked => slot.thresholds.burn_time.is_none(),
        CookState::Raw => false,
    }
}
