//! Shared fixtures for steamstash behavior tests: a scripted transport
//! double plus builders for the JSON bodies the Steam endpoints return.

use std::collections::VecDeque;
use std::sync::Mutex;

pub use std::sync::Arc;

use serde_json::json;
pub use serde_json::Value;

use steamstash_core::{HttpClient, HttpError, HttpRequest, HttpResponse};

/// Canonical account used across the journeys.
pub const STEAM_ID: &str = "76561198038148658";

/// Transport double that replays a scripted response sequence and records
/// every URL it was asked for.
pub struct ScriptedHttpClient {
    responses: Mutex<VecDeque<Result<HttpResponse, HttpError>>>,
    urls: Mutex<Vec<String>>,
}

impl ScriptedHttpClient {
    pub fn with_responses(responses: Vec<Result<HttpResponse, HttpError>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            urls: Mutex::new(Vec::new()),
        })
    }

    pub fn call_count(&self) -> usize {
        self.urls
            .lock()
            .expect("url store should not be poisoned")
            .len()
    }

    pub fn urls(&self) -> Vec<String> {
        self.urls
            .lock()
            .expect("url store should not be poisoned")
            .clone()
    }
}

impl HttpClient for ScriptedHttpClient {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.urls
            .lock()
            .expect("url store should not be poisoned")
            .push(request.url);
        self.responses
            .lock()
            .expect("response script should not be poisoned")
            .pop_front()
            .unwrap_or_else(|| Err(HttpError::new("response script exhausted")))
    }
}

/// Successful vanity resolution envelope.
pub fn vanity_ok(steam_id: &str) -> Result<HttpResponse, HttpError> {
    Ok(HttpResponse::ok_json(
        json!({"response": {"steamid": steam_id, "success": 1}}).to_string(),
    ))
}

/// Vanity resolution envelope for a handle that maps to nothing.
pub fn vanity_no_match() -> Result<HttpResponse, HttpError> {
    Ok(HttpResponse::ok_json(
        json!({"response": {"success": 42, "message": "No match"}}).to_string(),
    ))
}

/// Player summaries envelope with one player object.
pub fn summaries(persona: &str, profile_url: &str) -> Result<HttpResponse, HttpError> {
    Ok(HttpResponse::ok_json(
        json!({
            "response": {"players": [{
                "steamid": STEAM_ID,
                "personaname": persona,
                "profileurl": profile_url,
                "avatar": "https://avatars.example/small.jpg",
                "personastate": 1,
                "communityvisibilitystate": 3,
                "timecreated": 1_431_959_739,
            }]}
        })
        .to_string(),
    ))
}

/// One inventory page holding `descriptions`; passing `last_assetid` turns
/// on the continuation signal.
pub fn inventory_page(
    descriptions: Vec<Value>,
    last_assetid: Option<&str>,
) -> Result<HttpResponse, HttpError> {
    let assets: Vec<Value> = descriptions
        .iter()
        .enumerate()
        .map(|(n, description)| {
            json!({
                "assetid": (9_000 + n).to_string(),
                "classid": description["classid"],
                "instanceid": "0",
                "amount": "1",
            })
        })
        .collect();

    let mut body = json!({"assets": assets, "descriptions": descriptions, "success": 1});
    if let Some(last) = last_assetid {
        body["more_items"] = json!(1);
        body["last_assetid"] = json!(last);
    }
    Ok(HttpResponse::ok_json(body.to_string()))
}

/// Bare description record with just an identity and a type label.
pub fn item(classid: &str, type_label: &str) -> Value {
    json!({
        "classid": classid,
        "instanceid": "0",
        "type": type_label,
        "name": format!("Item {classid}"),
        "market_name": format!("Item {classid}"),
        "market_hash_name": format!("Item {classid}"),
    })
}

/// Description record carrying a "Used By:" line for `hero`.
pub fn hero_item(classid: &str, type_label: &str, hero: &str) -> Value {
    with_description_line(item(classid, type_label), &format!("Used By: {hero}"))
}

pub fn with_description_line(mut record: Value, line: &str) -> Value {
    let mut lines = record["descriptions"].as_array().cloned().unwrap_or_default();
    lines.push(json!({"value": line}));
    record["descriptions"] = Value::Array(lines);
    record
}

pub fn giftable(record: Value) -> Value {
    with_description_line(record, "This item may be gifted once.")
}

pub fn marketable(mut record: Value) -> Value {
    record["marketable"] = json!(1);
    record
}

pub fn tradable(mut record: Value) -> Value {
    record["tradable"] = json!(1);
    record
}
