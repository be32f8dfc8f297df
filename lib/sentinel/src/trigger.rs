use crate::config::SentinelConfig;
use crate::throttle::RateLimiter;

/// Caller-controlled gates of the load signal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadFlags {
    pub has_more: bool,
    pub is_loading: bool,
}

impl LoadFlags {
    pub fn new(has_more: bool, is_loading: bool) -> Self {
        Self { has_more, is_loading }
    }

    pub fn can_load(&self) -> bool {
        self.has_more && !self.is_loading
    }
}

/// Outcome of evaluating a sentinel trigger.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TriggerDecision {
    /// Invoke the load callback.
    Fire,
    /// Nothing to do.
    Skip,
    /// A load is due but rate-limited, evaluate again after the given number of milliseconds.
    RetryAfter(f64),
}

/// Position of the marker relative to the viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarkerMeasurement {
    /// Distance between the top of the viewport and the top of the marker.
    pub marker_top: f64,
    pub viewport_height: f64,
}

impl MarkerMeasurement {
    /// Distance between the marker and the bottom edge of the viewport, negative once the marker is visible.
    pub fn distance_to_viewport(&self) -> f64 {
        self.marker_top - self.viewport_height
    }
}

/// Trigger policy of the polling sentinel, evaluated by the throttled scroll and resize handlers.
///
/// Holds no state between evaluations: an event skipped for its position or its flags never prevents the next one from firing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PositionTrigger {
    threshold: f64,
}

impl PositionTrigger {
    pub fn new(config: &SentinelConfig) -> Self {
        Self {
            threshold: config.threshold,
        }
    }

    pub fn is_within_threshold(&self, measurement: &MarkerMeasurement) -> bool {
        measurement.distance_to_viewport() < self.threshold
    }

    /// Evaluates the trigger, the marker is only measured when the flags allow loading.
    pub fn evaluate<F>(&self, flags: LoadFlags, measure: F) -> TriggerDecision
    where
        F: FnOnce() -> Option<MarkerMeasurement>,
    {
        if !flags.can_load() {
            return TriggerDecision::Skip;
        }
        match measure() {
            Some(measurement) if self.is_within_threshold(&measurement) => TriggerDecision::Fire,
            _ => TriggerDecision::Skip,
        }
    }
}

/// Lifecycle of an observing sentinel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Activation {
    /// Waiting for the first scroll or resize event.
    #[default]
    Pending,
    Observing,
    /// Unmounted, will never fire again.
    Detached,
}

/// Edge-triggered policy of the observing sentinel.
///
/// Each transition of the marker into the margin-expanded viewport fires at most once. A transition that cannot fire
/// because of the load flags stays armed until the flags allow it or the marker leaves the viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisibilityTrigger {
    activation: Activation,
    is_intersecting: bool,
    has_fired: bool,
    rate_limiter: RateLimiter,
}

impl VisibilityTrigger {
    pub fn new(config: &SentinelConfig) -> Self {
        Self {
            activation: Activation::Pending,
            is_intersecting: false,
            has_fired: false,
            rate_limiter: RateLimiter::new(config.throttle),
        }
    }

    pub fn activation(&self) -> Activation {
        self.activation
    }

    pub fn is_intersecting(&self) -> bool {
        self.is_intersecting
    }

    /// Starts observing. Returns true only for the call that performed the transition.
    pub fn activate(&mut self) -> bool {
        match self.activation {
            Activation::Pending => {
                self.activation = Activation::Observing;
                true
            },
            Activation::Observing | Activation::Detached => false,
        }
    }

    pub fn detach(&mut self) {
        self.activation = Activation::Detached;
        self.is_intersecting = false;
    }

    /// Handles an observation of the marker.
    pub fn observe(&mut self, is_intersecting: bool, now_ms: f64, flags: LoadFlags) -> TriggerDecision {
        if self.activation != Activation::Observing {
            return TriggerDecision::Skip;
        }
        if !is_intersecting {
            self.is_intersecting = false;
            self.has_fired = false;
            return TriggerDecision::Skip;
        }
        self.is_intersecting = true;
        self.reevaluate(now_ms, flags)
    }

    /// Evaluates the current transition again, after a flag change or a rate-limited attempt.
    pub fn reevaluate(&mut self, now_ms: f64, flags: LoadFlags) -> TriggerDecision {
        if self.activation != Activation::Observing || !self.is_intersecting || self.has_fired || !flags.can_load() {
            return TriggerDecision::Skip;
        }
        if !self.rate_limiter.try_acquire(now_ms) {
            return TriggerDecision::RetryAfter(self.rate_limiter.remaining_ms(now_ms));
        }
        self.has_fired = true;
        TriggerDecision::Fire
    }
}

#[cfg(test)]
mod tests {
    use crate::config::SentinelConfig;
    use crate::trigger::{Activation, LoadFlags, MarkerMeasurement, PositionTrigger, TriggerDecision, VisibilityTrigger};

    const READY: LoadFlags = LoadFlags { has_more: true, is_loading: false };
    const LOADING: LoadFlags = LoadFlags { has_more: true, is_loading: true };
    const EXHAUSTED: LoadFlags = LoadFlags { has_more: false, is_loading: false };

    fn measurement(marker_top: f64) -> Option<MarkerMeasurement> {
        Some(MarkerMeasurement { marker_top, viewport_height: 800.0 })
    }

    #[test]
    fn test_load_flags_can_load() {
        assert!(READY.can_load());
        assert!(!LOADING.can_load());
        assert!(!EXHAUSTED.can_load());
        assert!(!LoadFlags::new(false, true).can_load());
        assert!(!LoadFlags::default().can_load());
    }

    #[test]
    fn test_marker_measurement_distance() {
        let measurement = MarkerMeasurement { marker_top: 850.0, viewport_height: 800.0 };
        assert_eq!(measurement.distance_to_viewport(), 50.0);
    }

    #[test]
    fn test_position_trigger_threshold() {
        let trigger = PositionTrigger::new(&SentinelConfig::default());
        assert!(trigger.is_within_threshold(&MarkerMeasurement { marker_top: 899.0, viewport_height: 800.0 }));
        assert!(!trigger.is_within_threshold(&MarkerMeasurement { marker_top: 900.0, viewport_height: 800.0 }));
        assert!(trigger.is_within_threshold(&MarkerMeasurement { marker_top: 10.0, viewport_height: 800.0 }));
    }

    #[test]
    fn test_position_trigger_evaluate() {
        let trigger = PositionTrigger::new(&SentinelConfig::default());
        assert_eq!(trigger.evaluate(READY, || measurement(2000.0)), TriggerDecision::Skip);
        assert_eq!(trigger.evaluate(READY, || measurement(850.0)), TriggerDecision::Fire);
        assert_eq!(trigger.evaluate(READY, || measurement(850.0)), TriggerDecision::Fire);
        assert_eq!(trigger.evaluate(READY, || None), TriggerDecision::Skip);
    }

    #[test]
    fn test_position_trigger_gated_by_flags() {
        let trigger = PositionTrigger::new(&SentinelConfig::default());
        let mut measured = false;
        assert_eq!(trigger.evaluate(LOADING, || { measured = true; measurement(0.0) }), TriggerDecision::Skip);
        assert_eq!(trigger.evaluate(EXHAUSTED, || { measured = true; measurement(0.0) }), TriggerDecision::Skip);
        assert!(!measured);
    }

    #[test]
    fn test_position_trigger_fires_after_skipped_events() {
        let trigger = PositionTrigger::new(&SentinelConfig::default());
        // far from the end, then a load in progress: neither consumes anything
        assert_eq!(trigger.evaluate(READY, || measurement(3000.0)), TriggerDecision::Skip);
        assert_eq!(trigger.evaluate(LOADING, || measurement(850.0)), TriggerDecision::Skip);
        // the trailing evaluation of the window sees the marker within the threshold
        assert_eq!(trigger.evaluate(READY, || measurement(850.0)), TriggerDecision::Fire);
    }

    #[test]
    fn test_visibility_trigger_activation() {
        let mut trigger = VisibilityTrigger::new(&SentinelConfig::default());
        assert_eq!(trigger.activation(), Activation::Pending);
        assert_eq!(trigger.observe(true, 0.0, READY), TriggerDecision::Skip);
        assert!(!trigger.is_intersecting());
        assert!(trigger.activate());
        assert!(!trigger.activate());
        assert_eq!(trigger.activation(), Activation::Observing);
        trigger.detach();
        assert!(!trigger.activate());
        assert_eq!(trigger.activation(), Activation::Detached);
        assert_eq!(trigger.observe(true, 1000.0, READY), TriggerDecision::Skip);
    }

    #[test]
    fn test_visibility_trigger_fires_once_per_transition() {
        let mut trigger = VisibilityTrigger::new(&SentinelConfig::default());
        trigger.activate();
        assert_eq!(trigger.observe(true, 0.0, READY), TriggerDecision::Fire);
        assert_eq!(trigger.observe(true, 500.0, READY), TriggerDecision::Skip);
        assert_eq!(trigger.reevaluate(600.0, READY), TriggerDecision::Skip);
        assert_eq!(trigger.observe(false, 700.0, READY), TriggerDecision::Skip);
        assert_eq!(trigger.observe(true, 800.0, READY), TriggerDecision::Fire);
    }

    #[test]
    fn test_visibility_trigger_armed_while_loading() {
        let mut trigger = VisibilityTrigger::new(&SentinelConfig::default());
        trigger.activate();
        assert_eq!(trigger.observe(true, 0.0, LOADING), TriggerDecision::Skip);
        assert_eq!(trigger.reevaluate(100.0, EXHAUSTED), TriggerDecision::Skip);
        assert_eq!(trigger.reevaluate(200.0, READY), TriggerDecision::Fire);
        assert_eq!(trigger.reevaluate(300.0, READY), TriggerDecision::Skip);
    }

    #[test]
    fn test_visibility_trigger_disarmed_when_leaving() {
        let mut trigger = VisibilityTrigger::new(&SentinelConfig::default());
        trigger.activate();
        assert_eq!(trigger.observe(true, 0.0, LOADING), TriggerDecision::Skip);
        assert_eq!(trigger.observe(false, 50.0, LOADING), TriggerDecision::Skip);
        assert_eq!(trigger.reevaluate(100.0, READY), TriggerDecision::Skip);
    }

    #[test]
    fn test_visibility_trigger_rate_limited() {
        let mut trigger = VisibilityTrigger::new(&SentinelConfig::default());
        trigger.activate();
        assert_eq!(trigger.observe(true, 1000.0, READY), TriggerDecision::Fire);
        assert_eq!(trigger.observe(false, 1010.0, READY), TriggerDecision::Skip);
        assert_eq!(trigger.observe(true, 1020.0, READY), TriggerDecision::RetryAfter(44.0));
        assert_eq!(trigger.reevaluate(1050.0, READY), TriggerDecision::RetryAfter(14.0));
        assert_eq!(trigger.reevaluate(1064.0, READY), TriggerDecision::Fire);
        assert_eq!(trigger.reevaluate(1100.0, READY), TriggerDecision::Skip);
    }

    #[test]
    fn test_visibility_trigger_detached_never_fires() {
        let mut trigger = VisibilityTrigger::new(&SentinelConfig::default());
        trigger.activate();
        assert_eq!(trigger.observe(true, 0.0, LOADING), TriggerDecision::Skip);
        trigger.detach();
        assert_eq!(trigger.reevaluate(100.0, READY), TriggerDecision::Skip);
        assert_eq!(trigger.observe(true, 200.0, READY), TriggerDecision::Skip);
    }
}
