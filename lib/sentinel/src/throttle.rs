/// Leading-edge rate limiter applied to observer loads: the first load passes, later ones pass once `interval_ms` has elapsed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RateLimiter {
    interval_ms: f64,
    last_evaluation_ms: Option<f64>,
}

impl RateLimiter {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms: interval_ms.max(0.0),
            last_evaluation_ms: None,
        }
    }

    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    /// Milliseconds left before the next evaluation is allowed at `now_ms`.
    pub fn remaining_ms(&self, now_ms: f64) -> f64 {
        match self.last_evaluation_ms {
            None => 0.0,
            Some(last_ms) if now_ms < last_ms => self.interval_ms,
            Some(last_ms) => (self.interval_ms - (now_ms - last_ms)).max(0.0),
        }
    }

    /// Records an evaluation at `now_ms` if the interval has elapsed since the previous one.
    pub fn try_acquire(&mut self, now_ms: f64) -> bool {
        match self.last_evaluation_ms {
            // clock went backwards, restart the interval from the new reference
            Some(last_ms) if now_ms < last_ms => {
                self.last_evaluation_ms = Some(now_ms);
                false
            },
            _ if self.remaining_ms(now_ms) > 0.0 => false,
            _ => {
                self.last_evaluation_ms = Some(now_ms);
                true
            },
        }
    }

}

/// Current time in milliseconds, as used to drive [`RateLimiter`] from event handlers.
pub fn now_ms() -> f64 {
    chrono::Utc::now().timestamp_millis() as f64
}
