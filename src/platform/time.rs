//! Wall-clock helpers
//!
//! History ids are millisecond timestamps; display timestamps are local
//! `HH:MM:SS` strings in the Belgian locale.

/// Locale used for browser timestamps
#[cfg(target_arch = "wasm32")]
const LOCALE: &str = "nl-BE";
/// Time zone used for browser timestamps
#[cfg(target_arch = "wasm32")]
const TIME_ZONE: &str = "Europe/Brussels";

/// Milliseconds since the Unix epoch
#[cfg(target_arch = "wasm32")]
pub fn now_millis() -> u64 {
    js_sys::Date::now() as u64
}

/// Current local time, e.g. `14:30:25`
#[cfg(target_arch = "wasm32")]
pub fn local_time_string() -> String {
    use wasm_bindgen::JsValue;

    let options = js_sys::Object::new();
    if let Err(e) = js_sys::Reflect::set(
        &options,
        &JsValue::from_str("timeZone"),
        &JsValue::from_str(TIME_ZONE),
    ) {
        log::warn!("Failed to set time zone option, using browser default: {:?}", e);
    }
    js_sys::Date::new_0()
        .to_locale_time_string_with_options(LOCALE, &options)
        .into()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn now_millis() -> u64 {
    chrono::Utc::now().timestamp_millis().max(0) as u64
}

#[cfg(not(target_arch = "wasm32"))]
pub fn local_time_string() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_time_format() {
        let t = local_time_string();
        let parts: Vec<&str> = t.split(':').collect();
        assert_eq!(parts.len(), 3);
        assert!(parts.iter().all(|p| p.len() == 2 && p.parse::<u8>().is_ok()));
    }

    #[test]
    fn test_now_millis_is_recent() {
        // 2020-01-01T00:00:00Z
        assert!(now_millis() > 1_577_836_800_000);
    }
}
