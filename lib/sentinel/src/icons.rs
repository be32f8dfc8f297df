use leptos::prelude::*;

#[component]
pub fn LoadingIcon(#[prop(default = "loading loading-spinner loading-md my-5")] class: &'static str) -> impl IntoView {
    view! {
        <div class="w-full flex items-center justify-center">
            <span class=class/>
        </div>
    }
}
