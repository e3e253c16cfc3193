use emberwood_core::config::GameConfig;
use emberwood_core::events::{EventBus, EventQueue, GameEvent, SubscriptionId};
use emberwood_core::timer::Timer;
use emberwood_core::types::{CapabilityKind, EntityHandle, FoodKind, HeldFood};
use emberwood_core::EmberError;
use emberwood_world::{Body, BodyRegistry, ColliderShape, ResolvedTarget, TargetResolver};
use glam::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::capability::{Collectible, InteractContext, InteractOutcome};
use crate::cooking::CookingProcess;
use crate::entities::{Campfire, CookingStation, Entities, Pantry, Tree, Visitor, WoodLog};
use crate::fuel::FuelReservoir;
use crate::player::PlayerState;
use crate::regrowth::{HarvestYield, RegrowthGate};
use crate::visitor::RequestCycle;

/// Input sampled by the host once per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInput {
    /// Seconds since the previous tick. 0 while paused.
    pub dt: f32,
    pub player_position: Vec3,
    /// Edge-triggered: true only on the frame the button went down.
    pub interact_pressed: bool,
}

/// Tally of serves, read by the external scoring layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    pub correct: u32,
    pub incorrect: u32,
}

/// What one tick produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    pub target: Option<ResolvedTarget>,
    pub events: usize,
}

#[derive(Debug, Clone, Copy)]
struct PendingAction {
    target: EntityHandle,
    progress: Timer,
}

/// One campsite: the player, every world object, and the per-tick flow
/// from proximity query to state machine updates to event dispatch.
pub struct Campsite {
    config: GameConfig,
    rng: SmallRng,
    registry: BodyRegistry,
    resolver: TargetResolver,
    player: PlayerState,
    entities: Entities,
    carried_logs: Vec<WoodLog>,
    pending: Option<PendingAction>,
    spawn_points: Vec<Vec3>,
    next_spawn_point: usize,
    spawn_timer: Timer,
    score: Score,
    events: EventQueue,
    bus: EventBus,
    next_handle: u32,
    ticks: u64,
}

impl Campsite {
    /// Empty campsite with the player standing at `player_position`.
    pub fn new(config: GameConfig, player_position: Vec3) -> Self {
        let player_handle = EntityHandle(1);
        let mut registry = BodyRegistry::new();
        registry.insert(Body {
            handle: player_handle,
            position: player_position,
            shape: ColliderShape::Convex,
            capability: None,
        });
        log::info!(
            "campsite created (seed {}, detection radius {})",
            config.seed,
            config.detection_radius
        );
        Self {
            rng: SmallRng::seed_from_u64(config.seed),
            resolver: TargetResolver::new(config.detection_radius).with_owner(player_handle),
            spawn_timer: Timer::new(config.visitors.spawn_interval),
            registry,
            player: PlayerState::new(player_handle, player_position),
            entities: Entities::default(),
            carried_logs: Vec::new(),
            pending: None,
            spawn_points: Vec::new(),
            next_spawn_point: 0,
            score: Score::default(),
            events: EventQueue::new(),
            bus: EventBus::new(),
            next_handle: player_handle.0 + 1,
            ticks: 0,
            config,
        }
    }

    fn allocate(&mut self) -> EntityHandle {
        let handle = EntityHandle(self.next_handle);
        self.next_handle += 1;
        handle
    }

    fn register(&mut self, handle: EntityHandle, position: Vec3, capability: Option<CapabilityKind>) {
        self.registry.insert(Body {
            handle,
            position,
            shape: ColliderShape::Convex,
            capability,
        });
    }

    pub fn add_campfire(&mut self, position: Vec3) -> EntityHandle {
        let handle = self.allocate();
        self.entities.campfires.push(Campfire {
            handle,
            position,
            fuel: FuelReservoir::new(handle, &self.config.fuel),
        });
        self.register(handle, position, Some(CapabilityKind::Interactable));
        handle
    }

    /// Add a cooking station heated by `campfire`.
    pub fn add_station(
        &mut self,
        position: Vec3,
        campfire: EntityHandle,
    ) -> Result<EntityHandle, EmberError> {
        if self.entities.campfire(campfire).is_none() {
            return Err(EmberError::MissingHeatSource { campfire });
        }
        let handle = self.allocate();
        self.entities.stations.push(CookingStation {
            handle,
            position,
            campfire,
            process: CookingProcess::new(handle, &self.config.cooking),
        });
        self.register(handle, position, Some(CapabilityKind::Interactable));
        Ok(handle)
    }

    pub fn add_tree(&mut self, position: Vec3) -> EntityHandle {
        let handle = self.allocate();
        let gate = RegrowthGate::new(handle, &self.config.regrowth);
        let capability = gate.capability();
        self.entities.trees.push(Tree::new(
            handle,
            position,
            gate,
            self.config.regrowth.chop_duration,
        ));
        self.register(handle, position, capability);
        handle
    }

    /// Add a pantry handing out raw `food`. Fails if no station could
    /// ever cook it.
    pub fn add_pantry(&mut self, position: Vec3, food: FoodKind) -> Result<EntityHandle, EmberError> {
        if self.config.cooking.profile(food).is_none() {
            log::warn!("no cooking profile for {food:?}, pantry not placed");
            return Err(EmberError::MissingFoodProfile(food));
        }
        let handle = self.allocate();
        self.entities.pantries.push(Pantry {
            handle,
            position,
            food,
        });
        self.register(handle, position, Some(CapabilityKind::Interactable));
        Ok(handle)
    }

    /// Static scenery the query sees but never targets.
    pub fn add_scenery(&mut self, position: Vec3, shape: ColliderShape) -> EntityHandle {
        let handle = self.allocate();
        self.registry.insert(Body {
            handle,
            position,
            shape,
            capability: None,
        });
        handle
    }

    pub fn spawn_log(&mut self, position: Vec3) -> EntityHandle {
        let handle = self.allocate();
        self.entities.logs.push(WoodLog::new(handle, position));
        self.register(handle, position, Some(CapabilityKind::Collectible));
        handle
    }

    pub fn spawn_visitor(&mut self, position: Vec3) -> EntityHandle {
        let handle = self.allocate();
        let cycle = RequestCycle::new(handle, &self.config.visitors, &mut self.rng);
        let visitor = Visitor {
            handle,
            position,
            cycle,
        };
        let capability = visitor.capability();
        self.entities.visitors.push(visitor);
        self.register(handle, position, capability);
        log::info!("visitor {handle} arrived");
        handle
    }

    /// Where the automatic spawner places new visitors, round-robin.
    pub fn add_visitor_spawn_point(&mut self, position: Vec3) {
        self.spawn_points.push(position);
    }

    /// Interrupt a visitor: cancel its request and timers.
    pub fn force_visitor_idle(&mut self, visitor: EntityHandle) -> Result<(), EmberError> {
        let v = self
            .entities
            .visitors
            .iter_mut()
            .find(|v| v.handle == visitor)
            .ok_or(EmberError::UnknownEntity(visitor))?;
        v.cycle.force_idle(&mut self.events);
        Ok(())
    }

    /// Let an interrupted visitor start asking again.
    pub fn rearm_visitor(&mut self, visitor: EntityHandle) -> Result<(), EmberError> {
        let v = self
            .entities
            .visitors
            .iter_mut()
            .find(|v| v.handle == visitor)
            .ok_or(EmberError::UnknownEntity(visitor))?;
        v.cycle.rearm(&mut self.rng);
        Ok(())
    }

    /// Put one carried log back on the ground at the player's feet.
    pub fn drop_wood(&mut self) -> Option<EntityHandle> {
        let mut log = self.carried_logs.pop()?;
        let at = self.player.position;
        let collector = self.player.handle();
        let mut ctx = InteractContext {
            player: &mut self.player,
            events: &mut self.events,
        };
        log.drop_item(collector, at, &mut ctx);
        if log.holder().is_some() {
            self.carried_logs.push(log);
            return None;
        }
        let handle = log.handle;
        self.register(handle, at, log.capability());
        self.entities.logs.push(log);
        Some(handle)
    }

    pub fn subscribe(&mut self, subscriber: impl FnMut(&GameEvent) + 'static) -> SubscriptionId {
        self.bus.subscribe(subscriber)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn held(&self) -> Option<HeldFood> {
        self.player.held()
    }

    pub fn wood(&self) -> u32 {
        self.player.wood()
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn target(&self) -> Option<ResolvedTarget> {
        self.resolver.current()
    }

    pub fn entities(&self) -> &Entities {
        &self.entities
    }

    pub fn registry(&self) -> &BodyRegistry {
        &self.registry
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Handle of the long-form action in progress, with its progress 0..=1.
    pub fn pending_action(&self) -> Option<(EntityHandle, f32)> {
        self.pending.map(|p| (p.target, p.progress.fraction()))
    }

    /// Text of the prompt for the current target, if it is eligible.
    pub fn prompt_text(&self) -> Option<String> {
        let target = self.resolver.current()?;
        match target.kind {
            CapabilityKind::Collectible => Some("Pick up".to_string()),
            CapabilityKind::Interactable => {
                let prompt = self.entities.interactable(target.handle)?.prompt(&self.player);
                prompt.is_eligible().then_some(prompt.text)
            }
        }
    }

    /// Advance the whole campsite by one frame.
    pub fn tick(&mut self, input: FrameInput) -> TickReport {
        let dt = if input.dt.is_finite() && input.dt > 0.0 {
            input.dt
        } else {
            0.0
        };
        self.ticks += 1;

        self.player.position = input.player_position;
        self.registry
            .set_position(self.player.handle(), input.player_position);
        self.sync_capabilities();

        let target = self.resolver.resolve(&self.registry, input.player_position);
        if self.resolver.changed() {
            self.events.push(GameEvent::TargetChanged {
                target: target.map(|t| t.handle),
            });
            self.cancel_pending_unless(target.map(|t| t.handle));
        }

        if input.interact_pressed {
            if let Some(target) = target {
                self.interact_with(target);
            }
        }

        self.advance_pending(dt);
        self.tick_machines(dt);
        self.tick_spawner(dt);
        self.remove_departed();
        self.sync_capabilities();

        let events = self.bus.dispatch(&mut self.events);
        TickReport { target, events }
    }

    /// Push each entity's current capability into the registry so the
    /// resolver sees cut trees, carried logs and idle visitors as absent.
    fn sync_capabilities(&mut self) {
        for tree in &self.entities.trees {
            self.registry.set_capability(tree.handle, tree.gate.capability());
        }
        for visitor in &self.entities.visitors {
            self.registry
                .set_capability(visitor.handle, visitor.capability());
        }
        for log in &self.entities.logs {
            self.registry.set_capability(log.handle, log.capability());
        }
    }

    fn interact_with(&mut self, target: ResolvedTarget) {
        match target.kind {
            CapabilityKind::Collectible => self.collect(target.handle),
            CapabilityKind::Interactable => {
                if self.pending.is_some_and(|p| p.target == target.handle) {
                    return;
                }
                let Some(entity) = self.entities.interactable(target.handle) else {
                    log::warn!("target {} has no interactable entity", target.handle);
                    return;
                };
                let prompt = entity.prompt(&self.player);
                if !prompt.is_eligible() {
                    return;
                }
                if prompt.duration > 0.0 {
                    self.start_pending(target.handle, prompt.duration);
                } else {
                    self.complete_interaction(target.handle);
                }
            }
        }
    }

    fn collect(&mut self, handle: EntityHandle) {
        let collector = self.player.handle();
        let Some(log) = self.entities.log_mut(handle) else {
            log::warn!("collectible {handle} has no entity");
            return;
        };
        let mut ctx = InteractContext {
            player: &mut self.player,
            events: &mut self.events,
        };
        if !log.collect(collector, &mut ctx) {
            return;
        }
        if let Some(idx) = self.entities.logs.iter().position(|l| l.handle == handle) {
            let log = self.entities.logs.remove(idx);
            self.registry.remove(handle);
            self.carried_logs.push(log);
        }
    }

    fn start_pending(&mut self, target: EntityHandle, duration: f32) {
        if let Some(tree) = self.entities.tree_mut(target) {
            tree.begin_chop();
        }
        self.pending = Some(PendingAction {
            target,
            progress: Timer::new(duration),
        });
        self.events.push(GameEvent::InteractionStarted { target, duration });
    }

    fn cancel_pending_unless(&mut self, keep: Option<EntityHandle>) {
        let Some(pending) = self.pending else {
            return;
        };
        if Some(pending.target) == keep {
            return;
        }
        self.pending = None;
        if let Some(entity) = self.entities.interactable_mut(pending.target) {
            entity.stop_interaction();
        }
        log::debug!("interaction with {} cancelled", pending.target);
        self.events.push(GameEvent::InteractionCancelled {
            target: pending.target,
        });
    }

    fn advance_pending(&mut self, dt: f32) {
        let Some(pending) = self.pending.as_mut() else {
            return;
        };
        pending.progress.tick(dt);
        if !pending.progress.finished() {
            return;
        }
        let target = pending.target;
        self.pending = None;
        self.complete_interaction(target);
    }

    fn complete_interaction(&mut self, handle: EntityHandle) {
        let Some(entity) = self.entities.interactable_mut(handle) else {
            return;
        };
        let mut ctx = InteractContext {
            player: &mut self.player,
            events: &mut self.events,
        };
        match entity.interact(&mut ctx) {
            InteractOutcome::Done | InteractOutcome::Rejected => {}
            InteractOutcome::Harvested(harvest) => self.scatter_logs(handle, harvest),
            InteractOutcome::Served { correct } => {
                if correct {
                    self.score.correct += 1;
                } else {
                    self.score.incorrect += 1;
                }
            }
        }
        self.carried_logs.truncate(self.player.wood() as usize);
    }

    fn scatter_logs(&mut self, origin: EntityHandle, harvest: HarvestYield) {
        let Some(center) = self.entities.position_of(origin) else {
            return;
        };
        for _ in 0..harvest.count {
            let angle = self.rng.gen_range(0.0..std::f32::consts::TAU);
            let radius = if harvest.scatter_radius > 0.0 {
                self.rng.gen_range(0.0..=harvest.scatter_radius)
            } else {
                0.0
            };
            let offset = Vec3::new(
                angle.cos() * radius,
                harvest.scatter_height,
                angle.sin() * radius,
            );
            self.spawn_log(center + offset);
        }
    }

    fn tick_machines(&mut self, dt: f32) {
        for fire in self.entities.campfires.iter_mut() {
            fire.fuel.tick(dt, &mut self.events);
        }

        let lit: Vec<EntityHandle> = self
            .entities
            .campfires
            .iter()
            .filter(|c| c.fuel.is_lit())
            .map(|c| c.handle)
            .collect();
        for station in self.entities.stations.iter_mut() {
            if lit.contains(&station.campfire) {
                station.process.tick(dt, &mut self.events);
            }
        }

        for tree in self.entities.trees.iter_mut() {
            tree.gate.tick(dt, &mut self.events);
        }

        for visitor in self.entities.visitors.iter_mut() {
            visitor.cycle.tick(dt, &mut self.rng, &mut self.events);
        }
    }

    fn tick_spawner(&mut self, dt: f32) {
        if self.config.visitors.spawn_interval <= 0.0 || self.spawn_points.is_empty() {
            return;
        }
        self.spawn_timer.tick(dt);
        if !self.spawn_timer.finished() {
            return;
        }
        self.spawn_timer.reset();
        if self.entities.visitors.len() >= self.config.visitors.max_visitors as usize {
            return;
        }
        let at = self.spawn_points[self.next_spawn_point % self.spawn_points.len()];
        self.next_spawn_point += 1;
        self.spawn_visitor(at);
    }

    fn remove_departed(&mut self) {
        let departed: Vec<EntityHandle> = self
            .entities
            .visitors
            .iter()
            .filter(|v| v.cycle.has_departed())
            .map(|v| v.handle)
            .collect();
        for handle in departed {
            self.entities.visitors.retain(|v| v.handle != handle);
            self.registry.remove(handle);
            if self.target().is_some_and(|t| t.handle == handle) {
                self.resolver.clear();
            }
        }
    }
}

impl std::fmt::Debug for Campsite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Campsite")
            .field("ticks", &self.ticks)
            .field("bodies", &self.registry.len())
            .field("wood", &self.player.wood())
            .field("score", &self.score)
            .finish()
    }
}
