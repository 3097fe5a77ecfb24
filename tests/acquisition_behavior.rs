//! Behavior-driven tests for the acquisition pipeline
//!
//! These tests verify WHAT a caller can accomplish with the loader:
//! resolving accounts, walking paginated inventories, and the cache
//! semantics of the blobs on disk.

use std::fs;
use std::path::Path;

use steamstash_core::{
    BlobCache, CacheKey, CacheMode, Error, ItemTag, PlayerLoader, PlayerSelector, SteamApiClient,
    SteamId, DOTA2_APP_ID,
};
use steamstash_tests::{
    hero_item, inventory_page, item, summaries, vanity_no_match, vanity_ok, Arc,
    ScriptedHttpClient, Value, STEAM_ID,
};
use tempfile::tempdir;

fn steam_id() -> SteamId {
    SteamId::new(76_561_198_038_148_658)
}

fn pipeline(http: Arc<ScriptedHttpClient>, root: &Path) -> (PlayerLoader, BlobCache) {
    let api = SteamApiClient::new("test-api-key").with_http_client(http);
    let cache = BlobCache::open(root).expect("cache should open");
    (PlayerLoader::new(api, cache.clone()), cache)
}

// =============================================================================
// Journey: Account Loading
// =============================================================================

#[test]
fn user_can_load_an_account_by_numeric_id() {
    // Given: a numeric SteamID and a remote with profile plus inventory
    let dir = tempdir().expect("tempdir");
    let http = ScriptedHttpClient::with_responses(vec![
        summaries("Sito", "https://steamcommunity.com/id/sito/"),
        inventory_page(vec![item("11", "Mythical Courier")], None),
    ]);
    let (loader, _) = pipeline(Arc::clone(&http), dir.path());

    // When: they load the account
    let player = loader
        .load(&PlayerSelector::Id(steam_id()), DOTA2_APP_ID, CacheMode::Use)
        .expect("load should succeed");

    // Then: the aggregate carries identity, profile, and classified items
    assert_eq!(player.steam_id, steam_id());
    assert_eq!(player.profile.persona_name.as_deref(), Some("Sito"));
    assert_eq!(player.inventory.len(), 1);
    assert_eq!(player.inventory[0].tag, ItemTag::Courier);

    // And: no resolution call was made
    assert!(http.urls().iter().all(|url| !url.contains("ResolveVanityURL")));
}

#[test]
fn user_can_load_an_account_by_vanity_handle() {
    // Given: a vanity handle known to the identity lookup
    let dir = tempdir().expect("tempdir");
    let http = ScriptedHttpClient::with_responses(vec![
        vanity_ok(STEAM_ID),
        summaries("Sito", "https://steamcommunity.com/id/sito/"),
        inventory_page(vec![item("11", "Mythical Courier")], None),
    ]);
    let (loader, _) = pipeline(Arc::clone(&http), dir.path());

    // When: they load by handle
    let player = loader
        .load(
            &PlayerSelector::handle("gabelogannewell"),
            DOTA2_APP_ID,
            CacheMode::Use,
        )
        .expect("load should succeed");

    // Then: the handle resolved to the numeric id and is kept on the player
    assert_eq!(player.steam_id, steam_id());
    assert_eq!(player.handle.as_deref(), Some("gabelogannewell"));

    // And: resolution went out first, before any blob work
    let urls = http.urls();
    assert!(urls[0].contains("ResolveVanityURL"));
    assert!(urls[0].contains("vanityurl=gabelogannewell"));
}

#[test]
fn unknown_handle_fails_before_any_blob_work() {
    // Given: a handle that maps to nothing
    let dir = tempdir().expect("tempdir");
    let http = ScriptedHttpClient::with_responses(vec![vanity_no_match()]);
    let (loader, _) = pipeline(Arc::clone(&http), dir.path());

    // When: the load is attempted
    let error = loader
        .load(&PlayerSelector::handle("nobody"), DOTA2_APP_ID, CacheMode::Use)
        .expect_err("resolution should fail");

    // Then: the failure is a resolution error naming the handle
    assert!(matches!(error, Error::Resolution { .. }));
    assert!(error.to_string().contains("nobody"));

    // And: neither blob endpoint was contacted, nothing was cached
    assert_eq!(http.call_count(), 1);
    assert_eq!(fs::read_dir(dir.path()).expect("read cache dir").count(), 0);
}

// =============================================================================
// Journey: Cache Semantics
// =============================================================================

#[test]
fn second_load_runs_entirely_offline() {
    // Given: an account loaded once, populating both blobs
    let dir = tempdir().expect("tempdir");
    let http = ScriptedHttpClient::with_responses(vec![
        summaries("Sito", "https://steamcommunity.com/id/sito/"),
        inventory_page(vec![hero_item("22", "Rare Wearable", "Lion")], None),
    ]);
    let (loader, _) = pipeline(Arc::clone(&http), dir.path());
    let selector = PlayerSelector::Id(steam_id());

    let first = loader
        .load(&selector, DOTA2_APP_ID, CacheMode::Use)
        .expect("first load");

    // When: the same account is loaded again in cache-first mode
    let second = loader
        .load(&selector, DOTA2_APP_ID, CacheMode::Use)
        .expect("second load");

    // Then: no further network calls happened
    assert_eq!(http.call_count(), 2);

    // And: the rebuilt player matches the first load in every field
    assert_eq!(second.inventory[0].tag, ItemTag::Hero);
    assert_eq!(second, first);
}

#[test]
fn refresh_ignores_stored_blobs_and_rewrites_them() {
    // Given: a cached account whose remote inventory has since changed
    let dir = tempdir().expect("tempdir");
    let http = ScriptedHttpClient::with_responses(vec![
        summaries("Sito", "https://steamcommunity.com/id/sito/"),
        inventory_page(vec![item("11", "Mythical Courier")], None),
        summaries("Sito Renamed", "https://steamcommunity.com/id/sito/"),
        inventory_page(vec![item("33", "Common Ward")], None),
    ]);
    let (loader, cache) = pipeline(Arc::clone(&http), dir.path());
    let selector = PlayerSelector::Id(steam_id());

    loader
        .load(&selector, DOTA2_APP_ID, CacheMode::Use)
        .expect("seed the cache");

    // When: the caller forces a refresh
    let refreshed = loader
        .load(&selector, DOTA2_APP_ID, CacheMode::Refresh)
        .expect("refresh load");

    // Then: both blobs were fetched again and the new state is served
    assert_eq!(http.call_count(), 4);
    assert_eq!(refreshed.profile.persona_name.as_deref(), Some("Sito Renamed"));
    assert_eq!(refreshed.inventory[0].tag, ItemTag::Ward);

    // And: the slots on disk now hold the refreshed blobs
    let raw = fs::read_to_string(cache.path_for(&CacheKey::inventory(steam_id(), DOTA2_APP_ID)))
        .expect("inventory blob should exist");
    assert!(raw.contains("Common Ward"));
    assert!(!raw.contains("Mythical Courier"));
}

#[test]
fn cached_blobs_are_plain_json_on_disk() {
    // Given: one completed load
    let dir = tempdir().expect("tempdir");
    let descriptions = vec![
        item("11", "Mythical Courier"),
        hero_item("22", "Rare Wearable", "Lion"),
    ];
    let http = ScriptedHttpClient::with_responses(vec![
        summaries("Sito", "https://steamcommunity.com/id/sito/"),
        inventory_page(descriptions.clone(), None),
    ]);
    let (loader, cache) = pipeline(http, dir.path());

    loader
        .load(&PlayerSelector::Id(steam_id()), DOTA2_APP_ID, CacheMode::Use)
        .expect("load should succeed");

    // When: the slots are read back as plain files
    let summary_raw =
        fs::read_to_string(cache.path_for(&CacheKey::summaries(steam_id()))).expect("summaries blob");
    let inventory_raw =
        fs::read_to_string(cache.path_for(&CacheKey::inventory(steam_id(), DOTA2_APP_ID)))
            .expect("inventory blob");

    // Then: the summaries blob is the player object, verbatim
    let summary: Value = serde_json::from_str(&summary_raw).expect("summaries blob parses");
    assert_eq!(summary["personaname"], "Sito");
    assert_eq!(summary["steamid"], STEAM_ID);

    // And: the inventory blob is the two-key merged payload, with the
    //      description records exactly as the wire delivered them
    let inventory: Value = serde_json::from_str(&inventory_raw).expect("inventory blob parses");
    assert!(inventory["assets"].is_array());
    assert_eq!(inventory["descriptions"], Value::Array(descriptions));
}

#[test]
fn failed_inventory_walk_leaves_no_inventory_blob() {
    // Given: a remote whose inventory endpoint is down
    let dir = tempdir().expect("tempdir");
    let http = ScriptedHttpClient::with_responses(vec![
        summaries("Sito", "https://steamcommunity.com/id/sito/"),
        Err(steamstash_core::HttpError::new("connection failed")),
    ]);
    let (loader, cache) = pipeline(http, dir.path());

    // When: the load is attempted
    let error = loader
        .load(&PlayerSelector::Id(steam_id()), DOTA2_APP_ID, CacheMode::Use)
        .expect_err("inventory fetch should fail");

    // Then: the failure is a fetch error
    assert!(matches!(error, Error::Fetch { .. }));

    // And: the summaries blob exists but no inventory slot was written
    assert!(cache.path_for(&CacheKey::summaries(steam_id())).exists());
    assert!(!cache
        .path_for(&CacheKey::inventory(steam_id(), DOTA2_APP_ID))
        .exists());
}

// =============================================================================
// Journey: Pagination
// =============================================================================

#[test]
fn large_inventories_arrive_complete_and_in_order() {
    // Given: an inventory spread over three pages
    let dir = tempdir().expect("tempdir");
    let http = ScriptedHttpClient::with_responses(vec![
        summaries("Sito", "https://steamcommunity.com/id/sito/"),
        inventory_page(
            vec![item("101", "Mythical Courier"), item("102", "Common Ward")],
            Some("9001"),
        ),
        inventory_page(vec![hero_item("103", "Rare Wearable", "Axe")], Some("9000")),
        inventory_page(vec![item("104", "Treasure Key"), item("105", "Rare Weather")], None),
    ]);
    let (loader, _) = pipeline(Arc::clone(&http), dir.path());

    // When: the account is loaded
    let player = loader
        .load(&PlayerSelector::Id(steam_id()), DOTA2_APP_ID, CacheMode::Use)
        .expect("load should succeed");

    // Then: every page's records are present, in page order
    let class_ids: Vec<&str> = player
        .inventory
        .iter()
        .map(|i| i.record.classid.as_str())
        .collect();
    assert_eq!(class_ids, ["101", "102", "103", "104", "105"]);

    // And: continuation cursors were forwarded page to page
    let urls = http.urls();
    assert!(!urls[1].contains("start_assetid"));
    assert!(urls[2].contains("start_assetid=9001"));
    assert!(urls[3].contains("start_assetid=9000"));
}

#[test]
fn runaway_continuation_is_cut_off_at_the_page_bound() {
    // Given: an endpoint that signals more items forever
    let dir = tempdir().expect("tempdir");
    let http = ScriptedHttpClient::with_responses(vec![
        summaries("Sito", "https://steamcommunity.com/id/sito/"),
        inventory_page(vec![item("1", "Common Ward")], Some("1")),
        inventory_page(vec![item("2", "Common Ward")], Some("2")),
        inventory_page(vec![item("3", "Common Ward")], Some("3")),
    ]);
    let api = SteamApiClient::new("test-api-key")
        .with_http_client(http.clone())
        .with_max_pages(2);
    let cache = BlobCache::open(dir.path()).expect("cache should open");
    let loader = PlayerLoader::new(api, cache.clone());

    // When: the load is attempted
    let error = loader
        .load(&PlayerSelector::Id(steam_id()), DOTA2_APP_ID, CacheMode::Use)
        .expect_err("the bound should trip");

    // Then: the walk stopped at the configured bound with a fetch error
    assert!(error.to_string().contains("page limit of 2"));
    assert_eq!(http.call_count(), 3); // summaries + two inventory pages

    // And: the aborted walk wrote no inventory blob
    assert!(!cache
        .path_for(&CacheKey::inventory(steam_id(), DOTA2_APP_ID))
        .exists());
}
