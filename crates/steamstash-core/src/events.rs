use std::path::Path;

use crate::player::SteamId;

/// Observer hooks for the acquisition pipeline.
///
/// Components take a sink at construction time instead of writing to a
/// process-wide logger. Every hook has an empty default body, so a sink
/// only implements the events it cares about and library callers that
/// never wire one in pay nothing.
pub trait EventSink: Send + Sync {
    /// A cache slot satisfied a read without going online.
    fn cache_read(&self, path: &Path) {
        let _ = path;
    }

    /// A freshly populated blob was written to its slot.
    fn cache_write(&self, path: &Path) {
        let _ = path;
    }

    /// A vanity handle is about to be resolved through the identity lookup.
    fn resolving_vanity(&self, handle: &str) {
        let _ = handle;
    }

    /// A profile summary is about to be fetched online.
    fn profile_fetch(&self, steam_id: SteamId) {
        let _ = steam_id;
    }

    /// An inventory walk is about to start.
    fn inventory_fetch(&self, steam_id: SteamId, app_id: u32) {
        let _ = (steam_id, app_id);
    }

    /// One inventory page arrived and was merged.
    fn inventory_page(&self, page: usize, assets: usize, descriptions: usize) {
        let _ = (page, assets, descriptions);
    }
}

/// Sink that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEventSink;

impl EventSink for NoopEventSink {}
