use std::time::Duration;

use leptos::prelude::*;
use strum::IntoEnumIterator;

use scroll_sentinel::config::SentinelStrategy;
use scroll_sentinel::constants::DEFAULT_BATCH_SIZE;
use scroll_sentinel::errors::{LoadErrorDisplay, SentinelError};
use scroll_sentinel::feed::{handle_additional_load, handle_initial_load};
use scroll_sentinel::icons::LoadingIcon;
use scroll_sentinel::layout::SentinelParts;
use scroll_sentinel::sentinel::{InfiniteList, InfiniteScroll};

pub const DEMO_ITEM_COUNT: usize = 110;
pub const DEMO_LOAD_DELAY: Duration = Duration::from_millis(400);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DemoItem {
    pub id: usize,
    pub title: String,
}

/// Returns the page of demo items starting at `offset`, the feed holds [`DEMO_ITEM_COUNT`] items.
pub fn load_demo_page(offset: usize, batch_size: usize) -> Result<Vec<DemoItem>, SentinelError> {
    if offset > DEMO_ITEM_COUNT {
        return Err(SentinelError::load_failed(format!("offset {offset} is past the end of the feed")));
    }
    let end = (offset + batch_size).min(DEMO_ITEM_COUNT);
    Ok((offset..end).map(|id| DemoItem { id, title: format!("Item #{}", id + 1) }).collect())
}

/// Places the marker in the last row of a table.
fn table_layout(parts: SentinelParts) -> AnyView {
    let SentinelParts { marker, content } = parts;
    view! {
        <table class="table">
            <tbody>
                {content}
                <tr><td>{marker}</td></tr>
            </tbody>
        </table>
    }.into_any()
}

/// Demo page rendering an endless feed with either sentinel strategy.
#[component]
pub fn DemoApp() -> impl IntoView {
    let strategy = RwSignal::new(SentinelStrategy::default());
    let item_vec = RwSignal::new(Vec::<DemoItem>::new());
    let has_more = RwSignal::new(true);
    let is_loading = RwSignal::new(false);
    let load_error = RwSignal::new(None);

    Effect::new(move |_| {
        log::info!("Reload demo feed with {} sentinel.", strategy.get());
        handle_initial_load(load_demo_page(0, DEFAULT_BATCH_SIZE), item_vec, has_more, load_error, DEFAULT_BATCH_SIZE);
    });

    let load_more = Callback::new(move |_| {
        if is_loading.get_untracked() {
            return;
        }
        is_loading.set(true);
        set_timeout(
            move || {
                let num_items = item_vec.read_untracked().len();
                handle_additional_load(load_demo_page(num_items, DEFAULT_BATCH_SIZE), item_vec, has_more, load_error, DEFAULT_BATCH_SIZE);
                is_loading.set(false);
            },
            DEMO_LOAD_DELAY,
        );
    });

    view! {
        <div class="flex flex-col gap-2 p-2">
            <div class="join">
            {
                SentinelStrategy::iter().map(|option| view! {
                    <button
                        class="btn join-item"
                        class=("btn-active", move || strategy.get() == option)
                        on:click=move |_| strategy.set(option)
                    >
                        {option.to_string()}
                    </button>
                }).collect_view()
            }
            </div>
            {
                move || match strategy.get() {
                    SentinelStrategy::Polling => view! {
                        <InfiniteList has_more is_loading on_load_more=load_more>
                            <DemoItemList item_vec/>
                        </InfiniteList>
                    }.into_any(),
                    SentinelStrategy::Observer => view! {
                        <InfiniteScroll has_more is_loading on_load_more=load_more threshold=300.0 wrapper=table_layout>
                            <For
                                each=move || item_vec.get().into_iter()
                                key=|item| item.id
                                children=move |item| view! { <tr><td>{item.title}</td></tr> }
                            />
                        </InfiniteScroll>
                    }.into_any(),
                }
            }
            <Show when=move || is_loading.get()>
                <LoadingIcon/>
            </Show>
            {
                move || load_error.get().map(|error| view! { <LoadErrorDisplay error/> })
            }
            <Show when=move || !has_more.get() && load_error.read().is_none()>
                <div class="w-full text-center">"You reached the end of the feed."</div>
            </Show>
        </div>
    }
}

#[component]
fn DemoItemList(item_vec: RwSignal<Vec<DemoItem>>) -> impl IntoView {
    view! {
        <ul class="flex flex-col gap-1">
            <For
                each=move || item_vec.get().into_iter()
                key=|item| item.id
                children=move |item| view! {
                    <li class="p-4 rounded-sm bg-base-200">{item.title}</li>
                }
            />
        </ul>
    }
}

#[cfg(test)]
mod tests {
    use crate::demo::{load_demo_page, DEMO_ITEM_COUNT};

    #[test]
    fn test_load_demo_page() {
        let page = load_demo_page(0, 20).expect("First page should load");
        assert_eq!(page.len(), 20);
        assert_eq!(page[0].id, 0);
        assert_eq!(page[0].title, "Item #1");

        let last_page = load_demo_page(100, 20).expect("Last page should load");
        assert_eq!(last_page.len(), DEMO_ITEM_COUNT - 100);
        assert_eq!(last_page.last().map(|item| item.id), Some(DEMO_ITEM_COUNT - 1));

        assert!(load_demo_page(DEMO_ITEM_COUNT, 20).expect("Page at the end should load").is_empty());
        assert!(load_demo_page(DEMO_ITEM_COUNT + 1, 20).is_err());
    }
}
