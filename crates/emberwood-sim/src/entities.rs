//! Campsite objects and their interaction capabilities.

use emberwood_core::types::{CapabilityKind, CookState, EntityHandle, FoodKind, HeldFood};
use glam::Vec3;

use crate::capability::{Collectible, InteractContext, InteractOutcome, Interactable, Prompt};
use crate::cooking::CookingProcess;
use crate::fuel::FuelReservoir;
use crate::player::PlayerState;
use crate::regrowth::RegrowthGate;
use crate::visitor::RequestCycle;

#[derive(Debug, Clone)]
pub struct Campfire {
    pub handle: EntityHandle,
    pub position: Vec3,
    pub fuel: FuelReservoir,
}

impl Interactable for Campfire {
    fn prompt(&self, player: &PlayerState) -> Prompt {
        if player.wood() == 0 || self.fuel.is_full() {
            return Prompt::ineligible();
        }
        Prompt::instant("Add wood")
    }

    fn interact(&mut self, ctx: &mut InteractContext<'_>) -> InteractOutcome {
        if self.fuel.is_full() || !ctx.player.take_wood(ctx.events) {
            return InteractOutcome::Rejected;
        }
        if self.fuel.add_log(ctx.events) {
            InteractOutcome::Done
        } else {
            ctx.player.add_wood(1, ctx.events);
            InteractOutcome::Rejected
        }
    }
}

/// Cooking spot heated by one campfire.
#[derive(Debug, Clone)]
pub struct CookingStation {
    pub handle: EntityHandle,
    pub position: Vec3,
    pub campfire: EntityHandle,
    pub process: CookingProcess,
}

impl Interactable for CookingStation {
    fn prompt(&self, player: &PlayerState) -> Prompt {
        match (self.process.food(), player.held()) {
            (Some(food), None) => Prompt::instant(format!("Take {}", food.label())),
            (None, Some(held)) => Prompt::instant(format!("Cook {}", held.kind.label())),
            _ => Prompt::ineligible(),
        }
    }

    fn interact(&mut self, ctx: &mut InteractContext<'_>) -> InteractOutcome {
        if self.process.is_occupied() {
            if !ctx.player.has_free_hands() {
                return InteractOutcome::Rejected;
            }
            return match self.process.remove_item(ctx.events) {
                Ok(food) => {
                    ctx.player.hold(food, ctx.events);
                    InteractOutcome::Done
                }
                Err(_) => InteractOutcome::Rejected,
            };
        }

        let Some(held) = ctx.player.take_held(ctx.events) else {
            return InteractOutcome::Rejected;
        };
        match self.process.place_item(held.kind, held.state, ctx.events) {
            Ok(()) => InteractOutcome::Done,
            Err(rejected) => {
                log::debug!("station {}: {rejected}", self.handle);
                ctx.player.hold(held, ctx.events);
                InteractOutcome::Rejected
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct Tree {
    pub handle: EntityHandle,
    pub position: Vec3,
    pub gate: RegrowthGate,
    pub chop_duration: f32,
    chopping: bool,
}

impl Tree {
    pub fn new(handle: EntityHandle, position: Vec3, gate: RegrowthGate, chop_duration: f32) -> Self {
        Self {
            handle,
            position,
            gate,
            chop_duration,
            chopping: false,
        }
    }

    pub fn is_being_chopped(&self) -> bool {
        self.chopping
    }

    /// Mark the start of a long-form chop.
    pub fn begin_chop(&mut self) {
        self.chopping = true;
    }
}

impl Interactable for Tree {
    fn prompt(&self, _player: &PlayerState) -> Prompt {
        if self.gate.is_cut() {
            return Prompt::ineligible();
        }
        Prompt::timed("Chop tree", self.chop_duration)
    }

    fn interact(&mut self, ctx: &mut InteractContext<'_>) -> InteractOutcome {
        self.chopping = false;
        match self.gate.harvest(ctx.events) {
            Some(harvest) => InteractOutcome::Harvested(harvest),
            None => InteractOutcome::Rejected,
        }
    }

    fn stop_interaction(&mut self) {
        self.chopping = false;
    }
}

#[derive(Debug, Clone)]
pub struct Visitor {
    pub handle: EntityHandle,
    pub position: Vec3,
    pub cycle: RequestCycle,
}

impl Visitor {
    /// Only a visitor with an open request can be approached.
    pub fn capability(&self) -> Option<CapabilityKind> {
        if self.cycle.request().is_idle() {
            None
        } else {
            Some(CapabilityKind::Interactable)
        }
    }
}

impl Interactable for Visitor {
    fn prompt(&self, player: &PlayerState) -> Prompt {
        match (self.cycle.request().food(), player.held()) {
            (Some(_), Some(held)) => Prompt::instant(format!("Give {}", held.kind.label())),
            _ => Prompt::ineligible(),
        }
    }

    fn interact(&mut self, ctx: &mut InteractContext<'_>) -> InteractOutcome {
        if self.cycle.request().is_idle() {
            return InteractOutcome::Rejected;
        }
        let Some(held) = ctx.player.take_held(ctx.events) else {
            return InteractOutcome::Rejected;
        };
        let correct = self.cycle.serve(held.kind, held.state, ctx.events);
        InteractOutcome::Served { correct }
    }
}

/// Hands out raw food of one kind, without limit.
#[derive(Debug, Clone)]
pub struct Pantry {
    pub handle: EntityHandle,
    pub position: Vec3,
    pub food: FoodKind,
}

impl Interactable for Pantry {
    fn prompt(&self, player: &PlayerState) -> Prompt {
        if !player.has_free_hands() {
            return Prompt::ineligible();
        }
        Prompt::instant(format!("Take {}", self.food.label()))
    }

    fn interact(&mut self, ctx: &mut InteractContext<'_>) -> InteractOutcome {
        let food = HeldFood {
            kind: self.food,
            state: CookState::Raw,
        };
        if ctx.player.hold(food, ctx.events) {
            InteractOutcome::Done
        } else {
            InteractOutcome::Rejected
        }
    }
}

#[derive(Debug, Clone)]
pub struct WoodLog {
    pub handle: EntityHandle,
    pub position: Vec3,
    holder: Option<EntityHandle>,
}

impl WoodLog {
    pub fn new(handle: EntityHandle, position: Vec3) -> Self {
        Self {
            handle,
            position,
            holder: None,
        }
    }

    pub fn holder(&self) -> Option<EntityHandle> {
        self.holder
    }

    pub fn capability(&self) -> Option<CapabilityKind> {
        match self.holder {
            Some(_) => None,
            None => Some(CapabilityKind::Collectible),
        }
    }
}

impl Collectible for WoodLog {
    fn collect(&mut self, collector: EntityHandle, ctx: &mut InteractContext<'_>) -> bool {
        if self.holder.is_some() {
            return false;
        }
        self.holder = Some(collector);
        ctx.player.add_wood(1, ctx.events);
        true
    }

    fn drop_item(&mut self, collector: EntityHandle, at: Vec3, ctx: &mut InteractContext<'_>) {
        if self.holder != Some(collector) || !ctx.player.take_wood(ctx.events) {
            return;
        }
        self.holder = None;
        self.position = at;
    }
}

/// Everything in the campsite besides the player, one list per kind.
/// Lists keep spawn order.
#[derive(Debug, Default)]
pub struct Entities {
    pub campfires: Vec<Campfire>,
    pub stations: Vec<CookingStation>,
    pub trees: Vec<Tree>,
    pub visitors: Vec<Visitor>,
    pub pantries: Vec<Pantry>,
    pub logs: Vec<WoodLog>,
}

impl Entities {
    pub fn interactable(&self, handle: EntityHandle) -> Option<&dyn Interactable> {
        if let Some(e) = self.campfires.iter().find(|e| e.handle == handle) {
            return Some(e);
        }
        if let Some(e) = self.stations.iter().find(|e| e.handle == handle) {
            return Some(e);
        }
        if let Some(e) = self.trees.iter().find(|e| e.handle == handle) {
            return Some(e);
        }
        if let Some(e) = self.visitors.iter().find(|e| e.handle == handle) {
            return Some(e);
        }
        if let Some(e) = self.pantries.iter().find(|e| e.handle == handle) {
            return Some(e);
        }
        None
    }

    pub fn interactable_mut(&mut self, handle: EntityHandle) -> Option<&mut dyn Interactable> {
        if let Some(e) = self.campfires.iter_mut().find(|e| e.handle == handle) {
            return Some(e);
        }
        if let Some(e) = self.stations.iter_mut().find(|e| e.handle == handle) {
            return Some(e);
        }
        if let Some(e) = self.trees.iter_mut().find(|e| e.handle == handle) {
            return Some(e);
        }
        if let Some(e) = self.visitors.iter_mut().find(|e| e.handle == handle) {
            return Some(e);
        }
        if let Some(e) = self.pantries.iter_mut().find(|e| e.handle == handle) {
            return Some(e);
        }
        None
    }

    pub fn log_mut(&mut self, handle: EntityHandle) -> Option<&mut WoodLog> {
        self.logs.iter_mut().find(|l| l.handle == handle)
    }

    pub fn campfire(&self, handle: EntityHandle) -> Option<&Campfire> {
        self.campfires.iter().find(|c| c.handle == handle)
    }

    pub fn tree_mut(&mut self, handle: EntityHandle) -> Option<&mut Tree> {
        self.trees.iter_mut().find(|t| t.handle == handle)
    }

    pub fn station(&self, handle: EntityHandle) -> Option<&CookingStation> {
        self.stations.iter().find(|s| s.handle == handle)
    }

    pub fn visitor(&self, handle: EntityHandle) -> Option<&Visitor> {
        self.visitors.iter().find(|v| v.handle == handle)
    }

    pub fn tree(&self, handle: EntityHandle) -> Option<&Tree> {
        self.trees.iter().find(|t| t.handle == handle)
    }

    pub fn position_of(&self, handle: EntityHandle) -> Option<Vec3> {
        self.campfires
            .iter()
            .map(|e| (e.handle, e.position))
            .chain(self.stations.iter().map(|e| (e.handle, e.position)))
            .chain(self.trees.iter().map(|e| (e.handle, e.position)))
            .chain(self.visitors.iter().map(|e| (e.handle, e.position)))
            .chain(self.pantries.iter().map(|e| (e.handle, e.position)))
            .chain(self.logs.iter().map(|e| (e.handle, e.position)))
            .find(|(h, _)| *h == handle)
            .map(|(_, p)| p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use emberwood_core::config::{CookingConfig, FuelConfig, RegrowthConfig};
    use emberwood_core::events::EventQueue;

    fn player() -> PlayerState {
        PlayerState::new(EntityHandle(1), Vec3::ZERO)
    }

    #[test]
    fn test_campfire_prompt_needs_wood_and_room() {
        let mut fire = Campfire {
            handle: EntityHandle(2),
            position: Vec3::ZERO,
            fuel: FuelReservoir::new(EntityHandle(2), &FuelConfig::default()),
        };
        let mut p = player();
        let mut events = EventQueue::new();
        assert!(!fire.prompt(&p).is_eligible());

        p.add_wood(1, &mut events);
        assert!(!fire.prompt(&p).is_eligible(), "full fire takes no wood");

        fire.fuel.tick(30.0, &mut events);
        assert!(fire.prompt(&p).is_eligible());
        let mut ctx = InteractContext {
            player: &mut p,
            events: &mut events,
        };
        assert_eq!(fire.interact(&mut ctx), InteractOutcome::Done);
        assert_eq!(p.wood(), 0);
        assert_eq!(fire.fuel.level(), 95.0);
    }

    #[test]
    fn test_station_place_and_take() {
        let mut station = CookingStation {
            handle: EntityHandle(3),
            position: Vec3::ZERO,
            campfire: EntityHandle(2),
            process: CookingProcess::new(EntityHandle(3), &CookingConfig::default()),
        };
        let mut p = player();
        let mut events = EventQueue::new();
        assert!(!station.prompt(&p).is_eligible());

        p.hold(
            HeldFood {
                kind: FoodKind::Marshmallow,
                state: CookState::Raw,
            },
            &mut events,
        );
        assert_eq!(station.prompt(&p).text, "Cook marshmallow");
        {
            let mut ctx = InteractContext {
                player: &mut p,
                events: &mut events,
            };
            assert_eq!(station.interact(&mut ctx), InteractOutcome::Done);
        }
        assert!(p.has_free_hands());
        station.process.tick(2.0, &mut events);
        assert_eq!(station.prompt(&p).text, "Take marshmallow");

        let mut ctx = InteractContext {
            player: &mut p,
            events: &mut events,
        };
        assert_eq!(station.interact(&mut ctx), InteractOutcome::Done);
        assert_eq!(
            p.held(),
            Some(HeldFood {
                kind: FoodKind::Marshmallow,
                state: CookState::Cooked,
            })
        );
    }

    #[test]
    fn test_cut_tree_is_ineligible() {
        let gate = RegrowthGate::new(EntityHandle(4), &RegrowthConfig::default());
        let mut tree = Tree::new(EntityHandle(4), Vec3::ZERO, gate, 1.5);
        let mut p = player();
        let mut events = EventQueue::new();
        assert_eq!(tree.prompt(&p).duration, 1.5);

        tree.begin_chop();
        assert!(tree.is_being_chopped());
        let mut ctx = InteractContext {
            player: &mut p,
            events: &mut events,
        };
        assert!(matches!(
            tree.interact(&mut ctx),
            InteractOutcome::Harvested(_)
        ));
        assert!(!tree.is_being_chopped());
        assert!(!tree.prompt(&p).is_eligible());
    }

    #[test]
    fn test_log_collect_and_drop() {
        let mut log = WoodLog::new(EntityHandle(5), Vec3::ONE);
        let mut p = player();
        let mut events = EventQueue::new();
        let collector = p.handle();
        let mut ctx = InteractContext {
            player: &mut p,
            events: &mut events,
        };
        assert!(log.collect(collector, &mut ctx));
        assert!(!log.collect(EntityHandle(99), &mut ctx));
        assert_eq!(log.capability(), None);

        log.drop_item(EntityHandle(99), Vec3::ZERO, &mut ctx);
        assert_eq!(log.holder(), Some(collector));

        log.drop_item(collector, Vec3::new(3.0, 0.0, 0.0), &mut ctx);
        assert_eq!(log.holder(), None);
        assert_eq!(log.position.x, 3.0);
        assert_eq!(ctx.player.wood(), 0);
    }

    #[test]
    fn test_entities_lookup() {
        let mut entities = Entities::default();
        entities.pantries.push(Pantry {
            handle: EntityHandle(8),
            position: Vec3::new(1.0, 2.0, 3.0),
            food: FoodKind::Sausage,
        });
        assert!(entities.interactable(EntityHandle(8)).is_some());
        assert!(entities.interactable_mut(EntityHandle(9)).is_none());
        assert_eq!(
            entities.position_of(EntityHandle(8)),
            Some(Vec3::new(1.0, 2.0, 3.0))
        );
    }
}
