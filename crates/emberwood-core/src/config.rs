use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::types::FoodKind;

/// Top-level tuning for a campsite session, loaded from RON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Seed for the session RNG (visitor waits, request picks, log scatter).
    pub seed: u64,
    /// Radius of the omnidirectional interaction query.
    pub detection_radius: f32,
    pub fuel: FuelConfig,
    pub cooking: CookingConfig,
    pub regrowth: RegrowthConfig,
    pub visitors: VisitorConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            detection_radius: DETECTION_RADIUS,
            fuel: FuelConfig::default(),
            cooking: CookingConfig::default(),
            regrowth: RegrowthConfig::default(),
            visitors: VisitorConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FuelConfig {
    pub max_fuel: f32,
    /// Fuel lost per second while lit.
    pub decay_rate: f32,
    /// Fuel added by one log.
    pub fuel_per_log: f32,
}

impl Default for FuelConfig {
    fn default() -> Self {
        Self {
            max_fuel: MAX_FUEL,
            decay_rate: FUEL_DECAY_RATE,
            fuel_per_log: FUEL_PER_LOG,
        }
    }
}

/// Cook and burn points for one food, as fractions of the base duration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FoodProfile {
    pub kind: FoodKind,
    pub cook_fraction: f32,
    /// `None` for foods that never burn; they stop advancing once cooked.
    #[serde(default)]
    pub burn_fraction: Option<f32>,
}

/// Absolute thresholds in seconds, derived from a [`FoodProfile`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CookThresholds {
    pub cook_time: f32,
    pub burn_time: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CookingConfig {
    pub base_duration: f32,
    pub foods: Vec<FoodProfile>,
}

impl Default for CookingConfig {
    fn default() -> Self {
        Self {
            base_duration: BASE_COOK_DURATION,
            foods: vec![
                FoodProfile {
                    kind: FoodKind::Marshmallow,
                    cook_fraction: MARSHMALLOW_COOK_FRACTION,
                    burn_fraction: Some(MARSHMALLOW_BURN_FRACTION),
                },
                FoodProfile {
                    kind: FoodKind::Sausage,
                    cook_fraction: SAUSAGE_COOK_FRACTION,
                    burn_fraction: Some(SAUSAGE_BURN_FRACTION),
                },
                FoodProfile {
                    kind: FoodKind::HotChocolate,
                    cook_fraction: HOT_CHOCOLATE_COOK_FRACTION,
                    burn_fraction: None,
                },
            ],
        }
    }
}

impl CookingConfig {
    pub fn profile(&self, kind: FoodKind) -> Option<&FoodProfile> {
        self.foods.iter().find(|p| p.kind == kind)
    }

    /// Thresholds in seconds for `kind`, or None if it has no profile.
    pub fn thresholds(&self, kind: FoodKind) -> Option<CookThresholds> {
        self.profile(kind).map(|p| CookThresholds {
            cook_time: p.cook_fraction * self.base_duration,
            burn_time: p.burn_fraction.map(|b| b * self.base_duration),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegrowthConfig {
    /// Seconds from cut to regrown.
    pub duration: f32,
    /// Seconds the player must keep chopping.
    pub chop_duration: f32,
    pub logs_per_harvest: u32,
    pub scatter_radius: f32,
    pub scatter_height: f32,
}

impl Default for RegrowthConfig {
    fn default() -> Self {
        Self {
            duration: REGROWTH_DURATION,
            chop_duration: CHOP_DURATION,
            logs_per_harvest: LOGS_PER_TREE,
            scatter_radius: LOG_SCATTER_RADIUS,
            scatter_height: LOG_SCATTER_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisitorConfig {
    pub wait_min: f32,
    pub wait_max: f32,
    /// Seconds into a request before the impatience warning.
    pub alert_after: f32,
    /// Seconds between resolution and departure.
    pub depart_delay: f32,
    /// Seconds between automatic arrivals; 0 disables them.
    pub spawn_interval: f32,
    pub max_visitors: u32,
}

impl Default for VisitorConfig {
    fn default() -> Self {
        Self {
            wait_min: VISITOR_WAIT_MIN,
            wait_max: VISITOR_WAIT_MAX,
            alert_after: VISITOR_ALERT_AFTER,
            depart_delay: VISITOR_DEPART_DELAY,
            spawn_interval: VISITOR_SPAWN_INTERVAL,
            max_visitors: MAX_VISITORS,
        }
    }
}
