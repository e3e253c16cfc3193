//! Default tuning values. The RON config overrides all of these; the
//! constants back `Default` impls and tests.

/// Omnidirectional interaction detection radius in world units.
pub const DETECTION_RADIUS: f32 = 2.5;

/// Campfire fuel cap.
pub const MAX_FUEL: f32 = 100.0;

/// Fuel lost per second while lit.
pub const FUEL_DECAY_RATE: f32 = 1.0;

/// Fuel restored by one wood log.
pub const FUEL_PER_LOG: f32 = 25.0;

/// Base cooking duration in seconds. Per-food thresholds are fractions of this.
pub const BASE_COOK_DURATION: f32 = 8.0;

/// Marshmallow: cooked at 15% of base, burnt at 73.5%.
pub const MARSHMALLOW_COOK_FRACTION: f32 = 0.15;
pub const MARSHMALLOW_BURN_FRACTION: f32 = 0.735;

/// Sausage: cooked at 37.4% of base, burnt at 86.4%.
pub const SAUSAGE_COOK_FRACTION: f32 = 0.374;
pub const SAUSAGE_BURN_FRACTION: f32 = 0.864;

/// Hot chocolate: cooked at 58.5% of base, never burns.
pub const HOT_CHOCOLATE_COOK_FRACTION: f32 = 0.585;

/// Seconds a cut tree waits before it can be chopped again.
pub const REGROWTH_DURATION: f32 = 30.0;

/// Seconds of continuous interaction needed to chop a tree.
pub const CHOP_DURATION: f32 = 1.5;

/// Logs spawned per successful harvest.
pub const LOGS_PER_TREE: u32 = 3;

/// Horizontal scatter radius for spawned logs.
pub const LOG_SCATTER_RADIUS: f32 = 1.2;

/// Vertical offset applied to spawned logs before they settle.
pub const LOG_SCATTER_HEIGHT: f32 = 0.5;

/// Idle-wait range in seconds before a visitor makes a request.
pub const VISITOR_WAIT_MIN: f32 = 4.0;
pub const VISITOR_WAIT_MAX: f32 = 10.0;

/// Seconds into a request before the UI shows an impatience warning.
pub const VISITOR_ALERT_AFTER: f32 = 20.0;

/// Seconds between a resolved request and the visitor leaving.
pub const VISITOR_DEPART_DELAY: f32 = 3.0;

/// Seconds between automatic visitor arrivals. 0 disables the spawner.
pub const VISITOR_SPAWN_INTERVAL: f32 = 15.0;

/// Upper bound on simultaneous visitors.
pub const MAX_VISITORS: u32 = 3;

/// Default RNG seed for a session.
pub const DEFAULT_SEED: u64 = 42;
