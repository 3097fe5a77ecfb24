//! # Custom Transport Example
//!
//! This example demonstrates how to swap the real HTTP transport for your
//! own by implementing the `HttpClient` trait.
//!
//! ## When to implement a custom transport
//!
//! - Replaying recorded payloads against new classification rules
//! - Driving the loader offline in tests and demos
//! - Adding instrumentation around every remote call
//!
//! ## Required trait methods
//!
//! The `HttpClient` trait requires implementing:
//! - `execute()` - Perform one request and return the response envelope
//!
//! ## Usage
//!
//! ```bash
//! cargo run --example custom_transport
//! ```

use std::sync::Arc;

use serde_json::json;
use steamstash_core::{
    BlobCache, CacheMode, HttpClient, HttpError, HttpRequest, HttpResponse, PlayerLoader,
    PlayerSelector, SteamApiClient, SteamId, DOTA2_APP_ID,
};

/// A canned transport that serves fixed payloads for demonstration.
///
/// The loader only ever issues GETs against the two Steam Web API
/// endpoints and the community inventory endpoint, so routing on the URL
/// is enough.
struct CannedTransport;

impl HttpClient for CannedTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        if request.url.contains("GetPlayerSummaries") {
            return Ok(HttpResponse::ok_json(
                json!({
                    "response": {"players": [{
                        "steamid": "76561198038148658",
                        "personaname": "Canned Persona",
                        "profileurl": "https://steamcommunity.com/id/canned/",
                    }]}
                })
                .to_string(),
            ));
        }

        // Everything else is the inventory walk; one page, no continuation
        Ok(HttpResponse::ok_json(
            json!({
                "assets": [
                    {"assetid": "1", "classid": "11", "instanceid": "0", "amount": "1"},
                    {"assetid": "2", "classid": "22", "instanceid": "0", "amount": "1"},
                ],
                "descriptions": [
                    {"classid": "11", "instanceid": "0", "type": "Mythical Courier"},
                    {
                        "classid": "22",
                        "instanceid": "0",
                        "type": "Rare Wearable",
                        "descriptions": [{"value": "Used By: Lion"}],
                    },
                ],
                "success": 1,
            })
            .to_string(),
        ))
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let api = SteamApiClient::new("demo-key").with_http_client(Arc::new(CannedTransport));
    let cache = BlobCache::open(std::env::temp_dir().join("steamstash-demo"))?;
    let loader = PlayerLoader::new(api, cache);

    // Refresh mode keeps repeated runs on the canned transport instead of
    // the blobs a previous run left behind
    let player = loader.load(
        &PlayerSelector::Id(SteamId::new(76_561_198_038_148_658)),
        DOTA2_APP_ID,
        CacheMode::Refresh,
    )?;

    println!("Loaded {} items without touching the network:", player.inventory.len());
    for item in &player.inventory {
        println!("  {:<12} {}", item.tag, item.label);
    }

    Ok(())
}
