use emberwood_core::events::EventQueue;
use emberwood_core::types::EntityHandle;
use glam::Vec3;

use crate::player::PlayerState;
use crate::regrowth::HarvestYield;

/// Text to show for the current target and how long the action takes.
#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    pub text: String,
    /// Seconds of continuous interaction. 0 = instant, negative = ineligible.
    pub duration: f32,
}

impl Prompt {
    pub fn instant(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            duration: 0.0,
        }
    }

    pub fn timed(text: impl Into<String>, duration: f32) -> Self {
        Self {
            text: text.into(),
            duration: duration.max(0.0),
        }
    }

    /// Show nothing, allow nothing.
    pub fn ineligible() -> Self {
        Self {
            text: String::new(),
            duration: -1.0,
        }
    }

    pub fn is_eligible(&self) -> bool {
        self.duration >= 0.0
    }
}

/// Mutable state an interaction may touch.
pub struct InteractContext<'a> {
    pub player: &'a mut PlayerState,
    pub events: &'a mut EventQueue,
}

/// Result of `Interactable::interact`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InteractOutcome {
    Done,
    /// Nothing happened; state was not what the prompt promised.
    Rejected,
    /// A node was cut; the owner spawns the yield.
    Harvested(HarvestYield),
    Served { correct: bool },
}

/// World object the player uses in place.
pub trait Interactable {
    fn prompt(&self, player: &PlayerState) -> Prompt;

    fn interact(&mut self, ctx: &mut InteractContext<'_>) -> InteractOutcome;

    /// Cancel a long-form action before it completes.
    fn stop_interaction(&mut self) {}
}

/// World object the player picks up.
pub trait Collectible {
    /// Returns false if something else already holds it.
    fn collect(&mut self, collector: EntityHandle, ctx: &mut InteractContext<'_>) -> bool;

    /// Put it back into the world at `at`. No-op unless `collector` holds it.
    fn drop_item(&mut self, collector: EntityHandle, at: Vec3, ctx: &mut InteractContext<'_>);
}
