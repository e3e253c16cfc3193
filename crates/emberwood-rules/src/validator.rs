use std::collections::HashSet;

use emberwood_core::config::GameConfig;
use emberwood_core::types::FoodKind;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("'{field}' must be positive, got {value}")]
    NotPositive { field: &'static str, value: f32 },
    #[error("'{field}' must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },
    #[error("Visitor wait range is inverted: min {min} > max {max}")]
    InvertedWaitRange { min: f32, max: f32 },
    #[error("Duplicate cooking profile for {0:?}")]
    DuplicateFoodProfile(FoodKind),
    #[error("No cooking profile for {0:?}")]
    MissingFoodProfile(FoodKind),
    #[error("{kind:?} burns at {burn} before it cooks at {cook}")]
    BurnBeforeCook { kind: FoodKind, cook: f32, burn: f32 },
}

/// Check a config for values the simulation cannot run with.
pub fn validate_config(config: &GameConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let positive = [
        ("detection_radius", config.detection_radius),
        ("fuel.max_fuel", config.fuel.max_fuel),
        ("fuel.fuel_per_log", config.fuel.fuel_per_log),
        ("cooking.base_duration", config.cooking.base_duration),
        ("regrowth.duration", config.regrowth.duration),
    ];
    for (field, value) in positive {
        // NaN fails this too
        if !(value > 0.0) {
            errors.push(ValidationError::NotPositive { field, value });
        }
    }

    let non_negative = [
        ("fuel.decay_rate", config.fuel.decay_rate),
        ("regrowth.chop_duration", config.regrowth.chop_duration),
        ("regrowth.scatter_radius", config.regrowth.scatter_radius),
        ("visitors.wait_min", config.visitors.wait_min),
        ("visitors.alert_after", config.visitors.alert_after),
        ("visitors.depart_delay", config.visitors.depart_delay),
        ("visitors.spawn_interval", config.visitors.spawn_interval),
    ];
    for (field, value) in non_negative {
        if !(value >= 0.0) {
            errors.push(ValidationError::Negative { field, value });
        }
    }

    let visitors = &config.visitors;
    if visitors.wait_min > visitors.wait_max {
        errors.push(ValidationError::InvertedWaitRange {
            min: visitors.wait_min,
            max: visitors.wait_max,
        });
    }

    let mut seen = HashSet::new();
    for profile in &config.cooking.foods {
        if !seen.insert(profile.kind) {
            errors.push(ValidationError::DuplicateFoodProfile(profile.kind));
        }
        if !(profile.cook_fraction > 0.0) {
            errors.push(ValidationError::NotPositive {
                field: "cooking.foods.cook_fraction",
                value: profile.cook_fraction,
            });
        }
        if let Some(burn) = profile.burn_fraction {
            if burn <= profile.cook_fraction {
                errors.push(ValidationError::BurnBeforeCook {
                    kind: profile.kind,
                    cook: profile.cook_fraction,
                    burn,
                });
            }
        }
    }
    // Visitors may ask for any kind, so every kind needs a profile.
    for kind in FoodKind::ALL {
        if !seen.contains(&kind) {
            errors.push(ValidationError::MissingFoodProfile(kind));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
