pub const DEFAULT_THRESHOLD: f64 = 100.0;
pub const DEFAULT_THROTTLE: f64 = 64.0;
pub const DEFAULT_BATCH_SIZE: usize = 20;

pub const INTERSECTION_TRIGGER_RATIO: f64 = 0.0;
