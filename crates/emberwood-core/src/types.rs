use serde::{Deserialize, Serialize};

/// Opaque identity of a world object. 0 is never handed out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityHandle(pub u32);

impl std::fmt::Display for EntityHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which interaction capability a world object carries. A body carries at
/// most one; `Option<CapabilityKind>` encodes "neither".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CapabilityKind {
    /// Picked up on contact with the interact button. Always preferred.
    Collectible,
    /// Prompted, then used in place.
    Interactable,
}

/// Food the player can cook and serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FoodKind {
    Marshmallow,
    Sausage,
    HotChocolate,
}

impl FoodKind {
    pub const ALL: [FoodKind; 3] = [
        FoodKind::Marshmallow,
        FoodKind::Sausage,
        FoodKind::HotChocolate,
    ];

    /// Display name used in prompts.
    pub fn label(self) -> &'static str {
        match self {
            FoodKind::Marshmallow => "marshmallow",
            FoodKind::Sausage => "sausage",
            FoodKind::HotChocolate => "hot chocolate",
        }
    }
}

/// Cooking progress. Ordered: `Raw < Cooked < Burnt`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum CookState {
    #[default]
    Raw,
    Cooked,
    Burnt,
}

/// What a visitor currently wants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum VisitorRequest {
    #[default]
    Idle,
    Wants(FoodKind),
}

impl VisitorRequest {
    pub fn is_idle(self) -> bool {
        matches!(self, VisitorRequest::Idle)
    }

    /// The food asked for, if any.
    pub fn food(self) -> Option<FoodKind> {
        match self {
            VisitorRequest::Idle => None,
            VisitorRequest::Wants(kind) => Some(kind),
        }
    }
}

/// A food item in the player's hands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeldFood {
    pub kind: FoodKind,
    pub state: CookState,
}
