use leptos::prelude::*;

/// The two pieces rendered by a sentinel, handed over to custom layouts.
pub struct SentinelParts {
    /// Invisible anchor whose position signals the end of the content.
    pub marker: AnyView,
    pub content: AnyView,
}

/// One-shot layout callback, e.g. to place the marker inside a table row.
pub type LayoutFn = Box<dyn FnOnce(SentinelParts) -> AnyView + Send>;

/// Reusable wrapper taking the sentinel's parts, usable like a component.
pub type WrapperFn = fn(SentinelParts) -> AnyView;

pub enum SentinelLayout {
    Render(LayoutFn),
    Wrapper(WrapperFn),
    Default,
}

impl SentinelLayout {
    /// A render callback takes precedence over a wrapper, the default layout is used when neither is given.
    pub fn select(render: Option<LayoutFn>, wrapper: Option<WrapperFn>) -> Self {
        match (render, wrapper) {
            (Some(render), _) => SentinelLayout::Render(render),
            (None, Some(wrapper)) => SentinelLayout::Wrapper(wrapper),
            (None, None) => SentinelLayout::Default,
        }
    }

    pub fn apply(self, parts: SentinelParts) -> AnyView {
        match self {
            SentinelLayout::Render(render) => render(parts),
            SentinelLayout::Wrapper(wrapper) => wrapper(parts),
            SentinelLayout::Default => default_layout(parts),
        }
    }
}

/// Renders the content followed by the marker.
pub fn default_layout(parts: SentinelParts) -> AnyView {
    let SentinelParts { marker, content } = parts;
    view! {
        <div>
            {content}
            {marker}
        </div>
    }.into_any()
}
