mod app;
mod components;
mod context;
mod layout;
mod markdown;
mod settings;
mod store;

use leptos::prelude::*;
use wasm_bindgen::JsValue;

use app::App;

fn main() {
    console_error_panic_hook::set_once();

    let buffer = rolling_logger::RollingBuffer::new(rolling_logger::DEFAULT_CAPACITY)
        .with_echo(|line| web_sys::console::log_1(&JsValue::from_str(line)));
    if let Err(e) = rolling_logger::init_logger("rov-checklist", buffer) {
        web_sys::console::error_1(&JsValue::from_str(&format!("logger init failed: {}", e)));
    }

    mount_to_body(App);
}
