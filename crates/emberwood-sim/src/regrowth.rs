use emberwood_core::config::RegrowthConfig;
use emberwood_core::events::{EventQueue, GameEvent};
use emberwood_core::timer::Timer;
use emberwood_core::types::{CapabilityKind, EntityHandle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegrowthState {
    Uncut,
    Cut,
}

/// What a successful harvest asks the world to spawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HarvestYield {
    pub count: u32,
    pub scatter_radius: f32,
    pub scatter_height: f32,
}

/// Cut/uncut cycle of a harvestable node. While cut the node offers no
/// interaction; it grows back on its own after `duration`.
#[derive(Debug, Clone)]
pub struct RegrowthGate {
    node: EntityHandle,
    state: RegrowthState,
    regrowth: Timer,
    harvest: HarvestYield,
}

impl RegrowthGate {
    pub fn new(node: EntityHandle, config: &RegrowthConfig) -> Self {
        Self {
            node,
            state: RegrowthState::Uncut,
            regrowth: Timer::new(config.duration),
            harvest: HarvestYield {
                count: config.logs_per_harvest,
                scatter_radius: config.scatter_radius.max(0.0),
                scatter_height: config.scatter_height,
            },
        }
    }

    pub fn node(&self) -> EntityHandle {
        self.node
    }

    pub fn state(&self) -> RegrowthState {
        self.state
    }

    pub fn is_cut(&self) -> bool {
        self.state == RegrowthState::Cut
    }

    /// The capability the node should expose right now.
    pub fn capability(&self) -> Option<CapabilityKind> {
        match self.state {
            RegrowthState::Uncut => Some(CapabilityKind::Interactable),
            RegrowthState::Cut => None,
        }
    }

    /// Seconds until the node is harvestable again; 0 while uncut.
    pub fn regrowth_remaining(&self) -> f32 {
        match self.state {
            RegrowthState::Uncut => 0.0,
            RegrowthState::Cut => self.regrowth.remaining(),
        }
    }

    /// Cut the node. None if it is already cut.
    pub fn harvest(&mut self, events: &mut EventQueue) -> Option<HarvestYield> {
        if self.is_cut() {
            return None;
        }
        self.state = RegrowthState::Cut;
        self.regrowth.reset();
        log::debug!("node {} harvested, {} units", self.node, self.harvest.count);
        events.push(GameEvent::TreeCut {
            tree: self.node,
            spawned: self.harvest.count,
        });
        Some(self.harvest)
    }

    pub fn tick(&mut self, dt: f32, events: &mut EventQueue) {
        if !self.is_cut() {
            return;
        }
        self.regrowth.tick(dt);
        if self.regrowth.finished() {
            self.state = RegrowthState::Uncut;
            self.regrowth.reset();
            log::debug!("node {} regrown", self.node);
            events.push(GameEvent::TreeRegrown { tree: self.node });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate(duration: f32) -> RegrowthGate {
        RegrowthGate::new(
            EntityHandle(4),
            &RegrowthConfig {
                duration,
                ..RegrowthConfig::default()
            },
        )
    }

    #[test]
    fn test_harvest_then_regrow() {
        let mut g = gate(30.0);
        let mut events = EventQueue::new();

        let y = g.harvest(&mut events).expect("uncut");
        assert_eq!(y.count, RegrowthConfig::default().logs_per_harvest);
        assert!(g.is_cut());
        assert_eq!(g.capability(), None);

        g.tick(10.0, &mut events);
        assert!(g.harvest(&mut events).is_none());
        assert!((g.regrowth_remaining() - 20.0).abs() < 1e-4);

        g.tick(20.01, &mut events);
        assert_eq!(g.state(), RegrowthState::Uncut);
        assert_eq!(g.capability(), Some(CapabilityKind::Interactable));
        assert!(g.harvest(&mut events).is_some());

        let names: Vec<&str> = events.iter().map(|e| e.name()).collect();
        assert_eq!(names, vec!["TreeCut", "TreeRegrown", "TreeCut"]);
    }

    #[test]
    fn test_tick_while_uncut_does_nothing() {
        let mut g = gate(5.0);
        let mut events = EventQueue::new();
        g.tick(100.0, &mut events);
        assert!(events.is_empty());

        // Time spent uncut does not count toward the next regrowth.
        g.harvest(&mut events);
        g.tick(4.0, &mut events);
        assert!(g.is_cut());
    }

    #[test]
    fn test_round_trip_for_many_step_sizes() {
        for steps in 1..=40u32 {
            let mut g = gate(12.0);
            let mut events = EventQueue::new();
            assert!(g.harvest(&mut events).is_some());
            let dt = 12.5 / steps as f32;
            for _ in 0..steps {
                g.tick(dt, &mut events);
            }
            assert!(!g.is_cut(), "not regrown with {steps} steps");
            assert!(g.harvest(&mut events).is_some());
            assert!(g.harvest(&mut events).is_none());
        }
    }
}
