//! Building the edge function's view of an HTTP request.
//!
//! The edge runtime presents query parameters, headers, and cookies as
//! objects keyed by lowercase name, each entry `{"value": ...}`. Repeated
//! names keep the first value and list every value under `multiValue`.

use serde_json::{Map, Value, json};

use blogstack_edge::EdgeRequest;

/// Convert HTTP request parts into an [`EdgeRequest`].
#[must_use]
pub fn edge_request_from_parts(parts: &http::request::Parts) -> EdgeRequest {
    let mut request = EdgeRequest::new(parts.method.as_str(), parts.uri.path());

    if let Some(query) = parts.uri.query() {
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
            insert_value(&mut request.querystring, name, value);
        }
    }

    for (name, value) in &parts.headers {
        let Ok(value) = value.to_str() else {
            continue;
        };
        if *name == http::header::COOKIE {
            for cookie in value.split(';').map(str::trim).filter(|c| !c.is_empty()) {
                let (name, value) = cookie.split_once('=').unwrap_or((cookie, ""));
                insert_value(&mut request.cookies, name, value);
            }
        }
        insert_value(&mut request.headers, name.as_str(), value);
    }

    request
}

fn insert_value(map: &mut Map<String, Value>, name: &str, value: &str) {
    match map.get_mut(name) {
        None => {
            map.insert(name.to_owned(), json!({ "value": value }));
        }
        Some(Value::Object(entry)) => {
            let first = entry.get("value").cloned().unwrap_or(Value::Null);
            let values = entry
                .entry("multiValue")
                .or_insert_with(|| json!([{ "value": first }]));
            if let Value::Array(values) = values {
                values.push(json!({ "value": value }));
            }
        }
        Some(_) => {}
    }
}
