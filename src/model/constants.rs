// Engine defaults and fixed model constants
pub const DEFAULT_RATING: i32 = 1500;
pub const STANDARD_K: f64 = 32.0;
pub const PROVISIONAL_K: f64 = 80.0;
pub const PROVISIONAL_RACES: u32 = 15;
pub const MULLIGAN_CAP: u32 = 3;
// A rider must sit this far above the base rating before a loss can be dampened
pub const MULLIGAN_RATING_MARGIN: i32 = 300;
// Bottom quartile of the field counts as a catastrophic finish
pub const MULLIGAN_FIELD_QUANTILE: f64 = 0.75;
pub const ELO_DIVISOR: f64 = 400.0;
pub const ELITE_THRESHOLD_RATIO: f64 = 0.9;
pub const VOLATILITY_WINDOW: usize = 10;
// Season churn decay
pub const RETENTION_FALLBACK: f64 = 0.85;
pub const RETENTION_FLOOR: f64 = 0.5;
pub const RETENTION_CEILING: f64 = 0.95;
pub const EFFECTIVE_RETENTION_FLOOR: f64 = 0.1;
pub const EFFECTIVE_RETENTION_CEILING: f64 = 1.0;
// Era insights
pub const INSIGHT_MIN_POOL: usize = 10;
pub const INSIGHT_TOP_N: usize = 10;
pub const CHASE_PACK_START: usize = 1;
pub const CHASE_PACK_END: usize = 6;
// Baseline estimator position bands
pub const BASELINE_FRONT_SEED_MAX_POS: u32 = 2;
pub const BASELINE_FRONT_SAMPLE_MAX_POS: u32 = 5;
pub const BASELINE_MID_SEED_MAX_POS: u32 = 10;
pub const BASELINE_MID_SAMPLE_MIN_POS: u32 = 7;
pub const BASELINE_MID_SAMPLE_MAX_POS: u32 = 12;
