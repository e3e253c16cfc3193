use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::Instant;

use emberwood_core::{EmberError, GameConfig};
use emberwood_sim::{Campsite, FrameInput};
use glam::Vec3;

use crate::scenes::Scenario;

/// The scripted player taps interact at most once per this many ticks.
pub const PRESS_EVERY: u32 = 3;

/// Outcome of one scenario run.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScenarioResult {
    pub scenario: String,
    pub tick_count: u32,
    pub sim_seconds: f32,
    pub served_correct: u32,
    pub served_incorrect: u32,
    pub wood_held: u32,
    /// Dispatched events by kind.
    pub events: BTreeMap<String, u32>,
    pub wall_ms: f64,
}

impl ScenarioResult {
    pub fn count(&self, event: &str) -> u32 {
        self.events.get(event).copied().unwrap_or(0)
    }

    pub fn total_events(&self) -> u32 {
        self.events.values().sum()
    }
}

/// Runs scenarios against fresh campsites built from one config.
pub struct ScenarioRunner {
    config: GameConfig,
    tick_count: u32,
    dt: f32,
}

impl ScenarioRunner {
    pub fn new(config: GameConfig, tick_count: u32, dt: f32) -> Self {
        Self {
            config,
            tick_count,
            dt,
        }
    }

    pub fn run(&self, scenario: &Scenario) -> Result<ScenarioResult, EmberError> {
        log::info!("Running scenario '{}': {}", scenario.name, scenario.description);
        let mut site = Campsite::new(self.config.clone(), Vec3::ZERO);
        let layout = scenario.setup(&mut site)?;

        let tally: Rc<RefCell<BTreeMap<String, u32>>> = Rc::default();
        let sink = Rc::clone(&tally);
        site.subscribe(move |event| {
            *sink
                .borrow_mut()
                .entry(event.name().to_string())
                .or_insert(0) += 1;
        });

        let start = Instant::now();
        for tick in 0..self.tick_count {
            let step = scenario.drive(&site, &layout);
            site.tick(FrameInput {
                dt: self.dt,
                player_position: step.at,
                interact_pressed: step.interact && tick % PRESS_EVERY == 0,
            });
        }
        let wall_ms = start.elapsed().as_secs_f64() * 1000.0;

        let score = site.score();
        let events = tally.borrow().clone();
        let result = ScenarioResult {
            scenario: scenario.name.to_string(),
            tick_count: self.tick_count,
            sim_seconds: self.tick_count as f32 * self.dt,
            served_correct: score.correct,
            served_incorrect: score.incorrect,
            wood_held: site.wood(),
            events,
            wall_ms,
        };
        log::info!(
            "  {} events, {} served ok, {:.2} ms",
            result.total_events(),
            result.served_correct,
            result.wall_ms
        );
        Ok(result)
    }
}
