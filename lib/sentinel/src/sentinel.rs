use std::time::Duration;

use leptos::ev;
use leptos::html;
use leptos::prelude::*;
use leptos_use::{
    use_event_listener_with_options, use_intersection_observer_with_options, use_throttle_fn_with_options, use_window,
    ThrottleOptions, UseEventListenerOptions, UseIntersectionObserverOptions, UseIntersectionObserverReturn,
};

use crate::config::{SentinelConfig, SentinelStrategy};
use crate::constants::{DEFAULT_THRESHOLD, DEFAULT_THROTTLE, INTERSECTION_TRIGGER_RATIO};
use crate::layout::{LayoutFn, SentinelLayout, SentinelParts, WrapperFn};
use crate::node_utils::measure_marker;
use crate::throttle::now_ms;
use crate::trigger::{LoadFlags, MarkerMeasurement, PositionTrigger, TriggerDecision, VisibilityTrigger};

/// Infinite scroll sentinel measuring its marker on throttled window scroll and resize events.
#[component]
pub fn InfiniteList(
    /// whether the source has more items to load
    #[prop(into)]
    has_more: Signal<bool>,
    /// whether a load is in progress
    #[prop(into)]
    is_loading: Signal<bool>,
    /// requests the next batch of items
    #[prop(into)]
    on_load_more: Callback<()>,
    /// distance in pixels between the marker and the bottom of the viewport that triggers loading
    #[prop(default = DEFAULT_THRESHOLD)]
    threshold: f64,
    /// minimum delay in milliseconds between two evaluations
    #[prop(default = DEFAULT_THROTTLE)]
    throttle: f64,
    #[prop(optional)]
    render: Option<LayoutFn>,
    #[prop(optional)]
    wrapper: Option<WrapperFn>,
    #[prop(optional)]
    children: Option<Children>,
) -> impl IntoView {
    let config = SentinelConfig::or_default(threshold, throttle);
    let marker_ref = NodeRef::<html::Div>::new();
    let flags = Signal::derive(move || LoadFlags::new(has_more.get(), is_loading.get()));

    use_position_sentinel(config, marker_ref, flags, on_load_more);

    sentinel_view(marker_ref, children, render, wrapper)
}

/// Infinite scroll sentinel relying on an intersection observer, set up after the first window scroll or resize.
#[component]
pub fn InfiniteScroll(
    /// whether the source has more items to load
    #[prop(into)]
    has_more: Signal<bool>,
    /// whether a load is in progress
    #[prop(into)]
    is_loading: Signal<bool>,
    /// requests the next batch of items
    #[prop(into)]
    on_load_more: Callback<()>,
    /// margin in pixels added below the viewport when observing the marker
    #[prop(default = DEFAULT_THRESHOLD)]
    threshold: f64,
    /// minimum delay in milliseconds between two load requests
    #[prop(default = DEFAULT_THROTTLE)]
    throttle: f64,
    #[prop(optional)]
    render: Option<LayoutFn>,
    #[prop(optional)]
    wrapper: Option<WrapperFn>,
    #[prop(optional)]
    children: Option<Children>,
) -> impl IntoView {
    let config = SentinelConfig::or_default(threshold, throttle);
    let marker_ref = NodeRef::<html::Div>::new();
    let flags = Signal::derive(move || LoadFlags::new(has_more.get(), is_loading.get()));

    let trigger = use_visibility_sentinel(config, marker_ref, flags, on_load_more);

    // a transition that reached the marker while loading fires once loading is allowed again
    Effect::new(move |_| {
        let current_flags = flags.get();
        let decision = trigger.try_update_value(|trigger| trigger.reevaluate(now_ms(), current_flags)).unwrap_or(TriggerDecision::Skip);
        run_visibility_decision(decision, trigger, flags, on_load_more);
    });

    sentinel_view(marker_ref, children, render, wrapper)
}

/// Attaches the throttled window listeners of the polling sentinel. Listeners and trigger are released with the current owner.
pub(crate) fn use_position_sentinel(
    config: SentinelConfig,
    marker_ref: NodeRef<html::Div>,
    flags: Signal<LoadFlags>,
    on_load_more: Callback<()>,
) -> StoredValue<PositionTrigger> {
    let trigger = StoredValue::new(PositionTrigger::new(&config));

    let check_position = move || {
        evaluate_position(
            trigger,
            flags.get_untracked(),
            || match measure_marker(marker_ref) {
                Ok(measurement) => Some(measurement),
                Err(e) => {
                    log::debug!("Skip sentinel evaluation: {e}");
                    None
                }
            },
            on_load_more,
        );
    };

    // the trailing edge evaluates the last position of each throttle window
    let throttled_check = use_throttle_fn_with_options(
        check_position,
        config.throttle,
        ThrottleOptions::default().leading(true).trailing(true),
    );
    let throttled_check_on_resize = throttled_check.clone();
    let _ = use_event_listener_with_options(
        use_window(),
        ev::scroll,
        move |_| { throttled_check(); },
        UseEventListenerOptions::default().passive(true),
    );
    let _ = use_event_listener_with_options(
        use_window(),
        ev::resize,
        move |_| { throttled_check_on_resize(); },
        UseEventListenerOptions::default().passive(true),
    );

    trigger
}

/// Evaluates the polling trigger and invokes the load callback when it fires. A disposed trigger never fires.
pub(crate) fn evaluate_position<F>(
    trigger: StoredValue<PositionTrigger>,
    flags: LoadFlags,
    measure: F,
    on_load_more: Callback<()>,
) -> TriggerDecision
where
    F: FnOnce() -> Option<MarkerMeasurement>,
{
    let decision = trigger.try_with_value(|trigger| trigger.evaluate(flags, measure)).unwrap_or(TriggerDecision::Skip);
    if decision == TriggerDecision::Fire {
        log::debug!("{} sentinel reached, load more items.", SentinelStrategy::Polling);
        untrack(|| on_load_more.run(()));
    }
    decision
}

/// Sets up the intersection observer of the observing sentinel, started by the first window scroll or resize.
pub(crate) fn use_visibility_sentinel(
    config: SentinelConfig,
    marker_ref: NodeRef<html::Div>,
    flags: Signal<LoadFlags>,
    on_load_more: Callback<()>,
) -> StoredValue<VisibilityTrigger> {
    let trigger = StoredValue::new(VisibilityTrigger::new(&config));

    let UseIntersectionObserverReturn { resume, stop, .. } = use_intersection_observer_with_options(
        marker_ref,
        move |entries, _| {
            let Some(is_intersecting) = entries.last().map(|entry| entry.is_intersecting()) else {
                return;
            };
            let decision = trigger.try_update_value(
                |trigger| trigger.observe(is_intersecting, now_ms(), flags.get_untracked())
            ).unwrap_or(TriggerDecision::Skip);
            run_visibility_decision(decision, trigger, flags, on_load_more);
        },
        UseIntersectionObserverOptions::default()
            .immediate(false)
            .root_margin(config.root_margin())
            .thresholds(vec![INTERSECTION_TRIGGER_RATIO]),
    );

    // measuring before the first user interaction could happen before the layout has settled
    let activate = move || {
        if trigger.try_update_value(|trigger| trigger.activate()).unwrap_or(false) {
            log::debug!("{} sentinel activated with threshold {}px.", SentinelStrategy::Observer, config.threshold);
            resume();
        }
    };
    let activate_on_scroll = activate.clone();
    let _ = use_event_listener_with_options(
        use_window(),
        ev::scroll,
        move |_| activate_on_scroll(),
        UseEventListenerOptions::default().passive(true),
    );
    let _ = use_event_listener_with_options(
        use_window(),
        ev::resize,
        move |_| activate(),
        UseEventListenerOptions::default().passive(true),
    );

    on_cleanup(move || {
        trigger.try_update_value(|trigger| trigger.detach());
        stop();
    });

    trigger
}

/// Evaluates the armed transition again, as done once a rate-limited load is due.
pub(crate) fn reevaluate_visibility(
    trigger: StoredValue<VisibilityTrigger>,
    flags: Signal<LoadFlags>,
    on_load_more: Callback<()>,
) {
    let decision = trigger.try_update_value(
        |trigger| trigger.reevaluate(now_ms(), flags.get_untracked())
    ).unwrap_or(TriggerDecision::Skip);
    run_visibility_decision(decision, trigger, flags, on_load_more);
}

/// Invokes the load callback or schedules a new evaluation of a rate-limited transition.
fn run_visibility_decision(
    decision: TriggerDecision,
    trigger: StoredValue<VisibilityTrigger>,
    flags: Signal<LoadFlags>,
    on_load_more: Callback<()>,
) {
    match decision {
        TriggerDecision::Fire => {
            log::debug!("{} sentinel reached, load more items.", SentinelStrategy::Observer);
            untrack(|| on_load_more.run(()));
        },
        TriggerDecision::RetryAfter(delay_ms) => set_timeout(
            move || reevaluate_visibility(trigger, flags, on_load_more),
            Duration::from_millis(delay_ms.ceil() as u64),
        ),
        TriggerDecision::Skip => (),
    }
}

/// Renders the marker and the content with the selected layout.
fn sentinel_view(
    marker_ref: NodeRef<html::Div>,
    children: Option<Children>,
    render: Option<LayoutFn>,
    wrapper: Option<WrapperFn>,
) -> AnyView {
    let marker = view! {
        <div node_ref=marker_ref aria-hidden="true" data-scroll-sentinel=""/>
    }.into_any();
    let content = match children {
        Some(children) => children().into_any(),
        None => ().into_any(),
    };
    SentinelLayout::select(render, wrapper).apply(SentinelParts { marker, content })
}
