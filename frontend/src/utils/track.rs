use serde_json::{json, Map, Value};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{js_sys, window, Window};

use crate::state::ab::get_ab_variant;

/// Records an analytics event. The sink is whatever the host page set up
/// (`dataLayer`, `gtag`); without one the event only reaches the console in
/// debug builds.
pub fn track(event: &str, payload: Value) {
    let merged = merge_context(base_context(), payload);
    if cfg!(debug_assertions) {
        gloo_console::log!("[track]", event, merged.to_string());
    }
    if let Some(win) = window() {
        push_data_layer(&win, event, &merged);
        call_gtag(&win, event, &merged);
    }
}

pub fn current_path() -> String {
    window()
        .map(|w| {
            let location = w.location();
            page_path(
                &location.pathname().unwrap_or_default(),
                &location.search().unwrap_or_default(),
            )
        })
        .unwrap_or_default()
}

/// Path plus query string, the shape every event reports as `path`.
pub(crate) fn page_path(pathname: &str, search: &str) -> String {
    format!("{}{}", pathname, search)
}

fn base_context() -> Value {
    json!({
        "abVariant": get_ab_variant().as_str(),
        "path": current_path(),
    })
}

/// Payload keys override context keys. Non-object payloads land under
/// `value`.
pub(crate) fn merge_context(base: Value, payload: Value) -> Value {
    let mut merged = match base {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    match payload {
        Value::Object(map) => merged.extend(map),
        Value::Null => {}
        other => {
            merged.insert("value".to_string(), other);
        }
    }
    Value::Object(merged)
}

pub(crate) fn data_layer_record(event: &str, merged: &Value) -> Value {
    let mut record = Map::new();
    record.insert("event".to_string(), Value::String(event.to_string()));
    if let Value::Object(map) = merged {
        record.extend(map.clone());
    }
    Value::Object(record)
}

fn to_js(value: &Value) -> Option<JsValue> {
    js_sys::JSON::parse(&value.to_string()).ok()
}

fn push_data_layer(win: &Window, event: &str, merged: &Value) {
    let Ok(layer) = js_sys::Reflect::get(win, &JsValue::from_str("dataLayer")) else {
        return;
    };
    let Ok(layer) = layer.dyn_into::<js_sys::Array>() else {
        return;
    };
    if let Some(record) = to_js(&data_layer_record(event, merged)) {
        layer.push(&record);
    }
}

fn call_gtag(win: &Window, event: &str, merged: &Value) {
    let Ok(gtag) = js_sys::Reflect::get(win, &JsValue::from_str("gtag")) else {
        return;
    };
    let Ok(gtag) = gtag.dyn_into::<js_sys::Function>() else {
        return;
    };
    if let Some(params) = to_js(merged) {
        if let Err(e) = gtag.call3(
            &JsValue::NULL,
            &JsValue::from_str("event"),
            &JsValue::from_str(event),
            &params,
        ) {
            log::warn!("gtag call failed: {:?}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_overrides_context() {
        let merged = merge_context(
            json!({"abVariant": "A", "path": "/"}),
            json!({"path": "/malad", "step": 2}),
        );
        assert_eq!(merged, json!({"abVariant": "A", "path": "/malad", "step": 2}));
    }

    #[test]
    fn scalar_payload_is_wrapped() {
        let merged = merge_context(json!({"abVariant": "B"}), json!("clicked"));
        assert_eq!(merged, json!({"abVariant": "B", "value": "clicked"}));
        assert_eq!(merge_context(json!({}), Value::Null), json!({}));
    }

    #[test]
    fn page_path_keeps_the_query() {
        assert_eq!(page_path("/malad", "?bhk=2&scroll=1"), "/malad?bhk=2&scroll=1");
        assert_eq!(page_path("/", ""), "/");
        let merged = merge_context(
            json!({"abVariant": "A", "path": "/"}),
            json!({"path": page_path("/kandivali", "?area=Kandivali%20East")}),
        );
        assert_eq!(merged["path"], "/kandivali?area=Kandivali%20East");
    }

    #[test]
    fn data_layer_record_carries_event_name() {
        let record = data_layer_record("lead_step_next", &json!({"step": 2}));
        assert_eq!(record, json!({"event": "lead_step_next", "step": 2}));
    }
}
