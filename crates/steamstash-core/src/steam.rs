use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, FetchStage};
use crate::events::{EventSink, NoopEventSink};
use crate::http_client::{HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient};
use crate::player::SteamId;

/// Application id for Dota 2, the default app whose inventory is loaded.
pub const DOTA2_APP_ID: u32 = 570;

/// Community inventory context holding the tradable item pool.
const CONTEXT_ID: u64 = 2;

/// Per-request transport timeout applied when the caller sets none.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Upper bound on inventory pages walked per account. The endpoint has no
/// documented page count; the bound turns a buggy or adversarial feed that
/// keeps signalling continuation into an error instead of an endless walk.
pub const DEFAULT_MAX_PAGES: usize = 200;

const RESOLVE_VANITY_URL: &str = "http://api.steampowered.com/ISteamUser/ResolveVanityURL/v0001/";
const PLAYER_SUMMARIES_URL: &str = "http://api.steampowered.com/ISteamUser/GetPlayerSummaries/v0002/";
const INVENTORY_URL: &str = "https://steamcommunity.com/inventory";

/// Success code of the vanity resolution envelope.
const VANITY_SUCCESS: i64 = 1;

/// Blocking client for the two Steam Web API endpoints and the community
/// inventory endpoint this crate needs.
///
/// Every call attaches the API credential as a query parameter and shares
/// one timeout. Calls are never retried; the first failure is returned to
/// the caller as-is.
#[derive(Clone)]
pub struct SteamApiClient {
    http: Arc<dyn HttpClient>,
    api_key: String,
    timeout_ms: u64,
    max_pages: usize,
    events: Arc<dyn EventSink>,
}

impl SteamApiClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: Arc::new(ReqwestHttpClient::new()),
            api_key: api_key.into(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            max_pages: DEFAULT_MAX_PAGES,
            events: Arc::new(NoopEventSink),
        }
    }

    pub fn with_http_client(mut self, http: Arc<dyn HttpClient>) -> Self {
        self.http = http;
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    pub fn with_events(mut self, events: Arc<dyn EventSink>) -> Self {
        self.events = events;
        self
    }

    /// Resolve a vanity handle to its numeric account id. Resolution is
    /// always a live call; handles can be re-pointed at any time, so the
    /// outcome is never cached.
    pub fn resolve_vanity(&self, handle: &str) -> Result<SteamId, Error> {
        self.events.resolving_vanity(handle);

        let url = format!(
            "{RESOLVE_VANITY_URL}?key={}&vanityurl={}",
            urlencoding::encode(&self.api_key),
            urlencoding::encode(handle),
        );

        let response = self
            .get(url)
            .map_err(|error| Error::resolution(handle, error.message()))?;
        if !response.is_success() {
            return Err(Error::resolution(
                handle,
                format!("upstream returned status {}", response.status),
            ));
        }

        let parsed: VanityResponse = serde_json::from_str(&response.body)
            .map_err(|err| Error::resolution(handle, format!("malformed response: {err}")))?;
        let envelope = parsed.response;

        if envelope.success != VANITY_SUCCESS {
            let detail = envelope
                .message
                .unwrap_or_else(|| String::from("no match"));
            return Err(Error::resolution(
                handle,
                format!("lookup reported {}: {detail}", envelope.success),
            ));
        }

        let raw = envelope.steam_id.ok_or_else(|| {
            Error::resolution(handle, "lookup succeeded without a steamid")
        })?;
        SteamId::parse(&raw)
            .map_err(|_| Error::resolution(handle, format!("unparsable steamid '{raw}'")))
    }

    /// Fetch the profile summary object for one account, verbatim. The
    /// remote envelope is unwrapped; the player object inside is not
    /// reshaped in any way.
    pub fn player_summary(&self, steam_id: SteamId) -> Result<Value, Error> {
        self.events.profile_fetch(steam_id);

        let url = format!(
            "{PLAYER_SUMMARIES_URL}?key={}&steamids={steam_id}",
            urlencoding::encode(&self.api_key),
        );

        let response = self
            .get(url)
            .map_err(|error| Error::fetch(FetchStage::Summaries, error.message()))?;
        if !response.is_success() {
            return Err(Error::fetch(
                FetchStage::Summaries,
                format!("upstream returned status {}", response.status),
            ));
        }

        let parsed: SummariesResponse = serde_json::from_str(&response.body).map_err(|err| {
            Error::fetch(FetchStage::Summaries, format!("malformed response: {err}"))
        })?;

        parsed.response.players.into_iter().next().ok_or_else(|| {
            Error::fetch(
                FetchStage::Summaries,
                format!("no player data returned for {steam_id}"),
            )
        })
    }

    /// Walk the paginated community inventory endpoint until it stops
    /// signalling more items, merging every page in order. Either the
    /// complete merged collection comes back or the first failing page
    /// aborts the walk; nothing partial escapes.
    pub fn inventory(&self, steam_id: SteamId, app_id: u32) -> Result<InventoryPayload, Error> {
        self.events.inventory_fetch(steam_id, app_id);

        let base = format!("{INVENTORY_URL}/{steam_id}/{app_id}/{CONTEXT_ID}");
        let mut merged = InventoryPayload::default();
        let mut cursor: Option<String> = None;
        let mut page = 0usize;

        loop {
            page += 1;
            if page > self.max_pages {
                return Err(Error::fetch(
                    FetchStage::Inventory,
                    format!(
                        "page limit of {} exceeded while the endpoint kept signalling more items",
                        self.max_pages
                    ),
                ));
            }

            let mut url = format!("{base}?key={}", urlencoding::encode(&self.api_key));
            if let Some(start) = &cursor {
                url.push_str("&start_assetid=");
                url.push_str(&urlencoding::encode(start));
            }

            let response = self
                .get(url)
                .map_err(|error| Error::fetch(FetchStage::Inventory, error.message()))?;
            if !response.is_success() {
                return Err(Error::fetch(
                    FetchStage::Inventory,
                    format!("upstream returned status {}", response.status),
                ));
            }

            let parsed: InventoryPage = serde_json::from_str(&response.body).map_err(|err| {
                Error::fetch(
                    FetchStage::Inventory,
                    format!("structurally invalid page: {err}"),
                )
            })?;

            self.events
                .inventory_page(page, parsed.assets.len(), parsed.descriptions.len());
            merged.assets.extend(parsed.assets);
            merged.descriptions.extend(parsed.descriptions);

            if parsed.more_items != 1 {
                return Ok(merged);
            }
            let last = parsed.last_assetid.ok_or_else(|| {
                Error::fetch(
                    FetchStage::Inventory,
                    "continuation signalled without a cursor",
                )
            })?;
            cursor = Some(last);
        }
    }

    fn get(&self, url: String) -> Result<HttpResponse, HttpError> {
        self.http
            .execute(HttpRequest::get(url).with_timeout_ms(self.timeout_ms))
    }
}

/// Merged inventory collection: every page's sequences appended in page
/// order. Serializes to exactly the two-key object the blob cache stores,
/// so a cached inventory reads back indistinguishable from a fresh walk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventoryPayload {
    pub assets: Vec<Value>,
    pub descriptions: Vec<Value>,
}

// Steam Web API response structures
#[derive(Debug, Clone, Deserialize)]
struct VanityResponse {
    response: VanityEnvelope,
}

#[derive(Debug, Clone, Deserialize)]
struct VanityEnvelope {
    #[serde(default)]
    success: i64,
    #[serde(rename = "steamid", default)]
    steam_id: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct SummariesResponse {
    response: SummariesEnvelope,
}

#[derive(Debug, Clone, Deserialize)]
struct SummariesEnvelope {
    #[serde(default)]
    players: Vec<Value>,
}

/// Wire shape of one inventory page. `assets` and `descriptions` are the
/// structural contract; a page missing either is invalid.
#[derive(Debug, Clone, Deserialize)]
struct InventoryPage {
    assets: Vec<Value>,
    descriptions: Vec<Value>,
    #[serde(default)]
    more_items: u8,
    #[serde(default)]
    last_assetid: Option<String>,
}
