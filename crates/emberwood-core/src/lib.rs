pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod timer;
pub mod types;

pub use config::GameConfig;
pub use error::EmberError;
pub use events::{EventBus, EventQueue, GameEvent, SubscriptionId};
pub use timer::Timer;
pub use types::{CapabilityKind, CookState, EntityHandle, FoodKind, HeldFood, VisitorRequest};
