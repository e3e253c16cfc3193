pub mod campsite;
pub mod capability;
pub mod cooking;
pub mod entities;
pub mod fuel;
pub mod player;
pub mod regrowth;
pub mod visitor;

pub use campsite::{Campsite, FrameInput, Score, TickReport};
pub use capability::{Collectible, InteractContext, InteractOutcome, Interactable, Prompt};
pub use cooking::{CookingProcess, CookingRejected};
pub use fuel::FuelReservoir;
pub use player::PlayerState;
pub use regrowth::{HarvestYield, RegrowthGate, RegrowthState};
pub use visitor::RequestCycle;
