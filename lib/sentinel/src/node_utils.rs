use leptos::prelude::*;
use leptos::html::ElementType;
use leptos::wasm_bindgen::JsCast;
use web_sys::Element;

use crate::errors::SentinelError;
use crate::trigger::MarkerMeasurement;

/// Measures the position of the element referenced by `node_ref` relative to the window's viewport.
pub fn measure_marker<NR>(
    node_ref: NodeRef<NR>,
) -> Result<MarkerMeasurement, SentinelError>
where
    NR: ElementType,
    NR::Output: Clone + AsRef<Element> + JsCast + 'static,
{
    let marker = node_ref.get_untracked().ok_or_else(
        || SentinelError::MeasurementUnavailable(String::from("marker is not mounted"))
    )?;
    let element = AsRef::<Element>::as_ref(&marker);
    let marker_top = element.get_bounding_client_rect().top();
    Ok(MarkerMeasurement {
        marker_top,
        viewport_height: viewport_height()?,
    })
}

pub fn viewport_height() -> Result<f64, SentinelError> {
    web_sys::window()
        .ok_or_else(|| SentinelError::MeasurementUnavailable(String::from("no window")))?
        .inner_height()
        .ok()
        .and_then(|height| height.as_f64())
        .ok_or_else(|| SentinelError::MeasurementUnavailable(String::from("viewport height is not a number")))
}
