//! Bridges core pipeline events onto the `log` facade.

use std::path::Path;

use steamstash_core::{EventSink, SteamId};

/// Forwards acquisition events to the process logger installed by `main`.
/// Verbosity is controlled through `RUST_LOG` as usual; with the facade
/// silent the sink costs a virtual call per event and nothing else.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogEventSink;

impl EventSink for LogEventSink {
    fn cache_read(&self, path: &Path) {
        log::info!("reading '{}'", path.display());
    }

    fn cache_write(&self, path: &Path) {
        log::info!("saved '{}'", path.display());
    }

    fn resolving_vanity(&self, handle: &str) {
        log::info!("resolving vanity handle '{handle}'");
    }

    fn profile_fetch(&self, steam_id: SteamId) {
        log::info!("fetching player summaries online for {steam_id}");
    }

    fn inventory_fetch(&self, steam_id: SteamId, app_id: u32) {
        log::info!("fetching inventory online for {steam_id} (app {app_id})");
    }

    fn inventory_page(&self, page: usize, assets: usize, descriptions: usize) {
        log::debug!("inventory page {page}: {assets} assets, {descriptions} descriptions");
    }
}
