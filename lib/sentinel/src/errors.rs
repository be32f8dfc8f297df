use leptos::prelude::*;
use leptos::{component, view, IntoView};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const INVALID_CONFIG_MESSAGE: &str = "The scroll sentinel is misconfigured.";
const MEASUREMENT_MESSAGE: &str = "Could not locate the end of the list.";
const LOAD_FAILED_MESSAGE: &str = "Sorry, we couldn't load more items.";

#[derive(Clone, Debug, Error, PartialEq, Serialize, Deserialize)]
pub enum SentinelError {
    #[error("invalid threshold {0}, expected a finite number of pixels")]
    InvalidThreshold(f64),
    #[error("invalid throttle {0}, expected a finite, non-negative number of milliseconds")]
    InvalidThrottle(f64),
    #[error("cannot measure sentinel: {0}")]
    MeasurementUnavailable(String),
    #[error("load failed: {0}")]
    LoadFailed(String),
}

impl SentinelError {
    pub fn user_message(&self) -> String {
        match self {
            SentinelError::InvalidThreshold(_) | SentinelError::InvalidThrottle(_) => String::from(INVALID_CONFIG_MESSAGE),
            SentinelError::MeasurementUnavailable(_) => String::from(MEASUREMENT_MESSAGE),
            SentinelError::LoadFailed(_) => String::from(LOAD_FAILED_MESSAGE),
        }
    }

    /// Constructs a new [`SentinelError::LoadFailed`] from some other type.
    pub fn load_failed(msg: impl ToString) -> Self {
        Self::LoadFailed(msg.to_string())
    }
}

/// Displays an error encountered while loading more items
#[component]
pub fn LoadErrorDisplay(
    error: SentinelError
) -> impl IntoView {
    let user_message = error.user_message();

    log::error!("Caught sentinel error: {error}");
    view! {
        <div class="w-full flex items-center gap-2 justify-center">
            <h3 class="text-xl">{user_message}</h3>
        </div>
    }.into_any()
}
