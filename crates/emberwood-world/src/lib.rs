pub mod proximity;
pub mod resolver;

pub use proximity::{Body, BodyRegistry, ColliderShape, ProximityHit, ProximityIndex};
pub use resolver::{select_target, ResolvedTarget, TargetResolver};
