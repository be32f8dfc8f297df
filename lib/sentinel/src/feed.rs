use leptos::prelude::*;

use crate::errors::SentinelError;

/// Replaces the loaded items with the first page and resets the sentinel flags.
pub fn handle_initial_load<T: Clone + Send + Sync + 'static>(
    load_result: Result<Vec<T>, SentinelError>,
    loaded_vec: RwSignal<Vec<T>>,
    has_more: RwSignal<bool>,
    load_error: RwSignal<Option<SentinelError>>,
    batch_size: usize,
) {
    match load_result {
        Ok(init_vec) => {
            has_more.set(init_vec.len() >= batch_size);
            load_error.set(None);
            loaded_vec.set(init_vec);
        },
        Err(e) => {
            log::debug!("Initial load failed: {e}");
            loaded_vec.write().clear();
            has_more.set(false);
            load_error.set(Some(e));
        },
    };
}

/// Appends a page to the loaded items. A page shorter than `batch_size` or an error ends the feed.
pub fn handle_additional_load<T: Clone + Send + Sync + 'static>(
    mut load_result: Result<Vec<T>, SentinelError>,
    loaded_vec: RwSignal<Vec<T>>,
    has_more: RwSignal<bool>,
    load_error: RwSignal<Option<SentinelError>>,
    batch_size: usize,
) {
    match load_result {
        Ok(ref mut additional_vec) => {
            if additional_vec.len() < batch_size {
                has_more.set(false);
            }
            if !additional_vec.is_empty() {
                loaded_vec.update(|loaded_vec| loaded_vec.append(additional_vec))
            }
        },
        Err(e) => {
            log::debug!("Additional load failed: {e}");
            has_more.set(false);
            load_error.set(Some(e));
        },
    }
}
