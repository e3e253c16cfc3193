use emberwood_core::config::FuelConfig;
use emberwood_core::events::{EventQueue, GameEvent};
use emberwood_core::types::EntityHandle;

/// Campfire fuel: a scalar clamped to `[0, max]` that drains while lit.
///
/// Reaching zero puts the fire out exactly once; adding fuel afterwards
/// relights it and decay resumes from the new level.
#[derive(Debug, Clone)]
pub struct FuelReservoir {
    campfire: EntityHandle,
    level: f32,
    max: f32,
    decay_rate: f32,
    fuel_per_log: f32,
    lit: bool,
}

impl FuelReservoir {
    /// Starts full and lit.
    pub fn new(campfire: EntityHandle, config: &FuelConfig) -> Self {
        let max = config.max_fuel.max(0.0);
        Self {
            campfire,
            level: max,
            max,
            decay_rate: config.decay_rate.max(0.0),
            fuel_per_log: config.fuel_per_log.max(0.0),
            lit: max > 0.0,
        }
    }

    pub fn campfire(&self) -> EntityHandle {
        self.campfire
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn is_lit(&self) -> bool {
        self.lit
    }

    pub fn is_full(&self) -> bool {
        self.level >= self.max
    }

    /// Level as a fraction of max, for the UI bar.
    pub fn fraction(&self) -> f32 {
        if self.max <= 0.0 {
            0.0
        } else {
            self.level / self.max
        }
    }

    /// Drain `decay_rate * dt`. No-op once out.
    pub fn tick(&mut self, dt: f32, events: &mut EventQueue) {
        if !self.lit || !dt.is_finite() || dt <= 0.0 {
            return;
        }
        let next = (self.level - self.decay_rate * dt).max(0.0);
        if next != self.level {
            self.level = next;
            events.push(self.changed_event());
        }
        if self.level <= 0.0 {
            self.level = 0.0;
            self.lit = false;
            log::info!("campfire {} went out", self.campfire);
            events.push(GameEvent::FireOut {
                campfire: self.campfire,
            });
        }
    }

    /// Add `amount`, clamped to max. Rejected when already full or when
    /// `amount` is not positive. Relights an extinguished fire.
    pub fn add_fuel(&mut self, amount: f32, events: &mut EventQueue) -> bool {
        if self.is_full() || !amount.is_finite() || amount <= 0.0 {
            return false;
        }
        self.level = (self.level + amount).min(self.max);
        if !self.lit {
            self.lit = true;
            log::info!("campfire {} relit at {:.1}", self.campfire, self.level);
            events.push(GameEvent::FireRelit {
                campfire: self.campfire,
            });
        }
        events.push(self.changed_event());
        true
    }

    /// Add one log's worth of fuel.
    pub fn add_log(&mut self, events: &mut EventQueue) -> bool {
        self.add_fuel(self.fuel_per_log, events)
    }

    fn changed_event(&self) -> GameEvent {
        GameEvent::FuelChanged {
            campfire: self.campfire,
            current: self.level,
            max: self.max,
        }
    }
}
