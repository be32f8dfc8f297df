pub mod demo;

#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    use crate::demo::DemoApp;
    // initializes logging using the `log` crate
    _ = console_log::init_with_level(log::Level::Debug);
    console_error_panic_hook::set_once();

    leptos::mount::mount_to_body(DemoApp);
}
