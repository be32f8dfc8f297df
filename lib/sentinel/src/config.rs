use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use crate::constants::{DEFAULT_THRESHOLD, DEFAULT_THROTTLE};
use crate::errors::SentinelError;

/// How a sentinel decides that the end of the content is near.
#[derive(Clone, Copy, Debug, Default, Display, EnumIter, EnumString, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum SentinelStrategy {
    /// Measure the marker on throttled scroll and resize events.
    Polling,
    /// Let an intersection observer report when the marker nears the viewport.
    #[default]
    Observer,
}

/// Trigger distance and rate limit shared by both sentinel strategies.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SentinelConfig {
    /// Distance in pixels between the marker and the viewport's bottom edge below which loading is triggered.
    pub threshold: f64,
    /// Minimum number of milliseconds between two evaluations.
    pub throttle: f64,
}

impl Default for SentinelConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            throttle: DEFAULT_THROTTLE,
        }
    }
}

impl SentinelConfig {
    pub fn new(threshold: f64, throttle: f64) -> Result<Self, SentinelError> {
        Self { threshold, throttle }.validate()
    }

    /// Returns the validated configuration, or the defaults after logging why the given values were rejected.
    pub fn or_default(threshold: f64, throttle: f64) -> Self {
        match Self::new(threshold, throttle) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Invalid scroll sentinel configuration, falling back to defaults: {e}");
                Self::default()
            }
        }
    }

    pub fn validate(self) -> Result<Self, SentinelError> {
        if !self.threshold.is_finite() {
            return Err(SentinelError::InvalidThreshold(self.threshold));
        }
        if !self.throttle.is_finite() || self.throttle < 0.0 {
            return Err(SentinelError::InvalidThrottle(self.throttle));
        }
        Ok(self)
    }

    /// Margin added around the viewport when observing the marker, e.g. `100px`.
    pub fn root_margin(&self) -> String {
        format!("{}px", self.threshold)
    }
}
