// Shared helpers for the map viewer.

use wasm_bindgen::JsValue;

pub fn clog(msg: &str) {
    web_sys::console::log_1(&JsValue::from_str(msg));
}

/// Wait time as shown in the detail popup.
pub fn format_wait_time(mins: u32) -> String {
    if mins == 0 {
        "No wait".to_string()
    } else {
        format!("~{} min", mins)
    }
}
