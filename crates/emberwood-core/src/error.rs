use thiserror::Error;

use crate::types::{EntityHandle, FoodKind};

/// Setup-time errors. None of these halt a running tick: the caller logs
/// them once and the affected feature becomes a no-op.
#[derive(Debug, Error)]
pub enum EmberError {
    #[error("no cooking profile configured for {0:?}")]
    MissingFoodProfile(FoodKind),

    #[error("entity {0} is not registered")]
    UnknownEntity(EntityHandle),

    #[error("station needs campfire {campfire}, which does not exist")]
    MissingHeatSource { campfire: EntityHandle },
}
