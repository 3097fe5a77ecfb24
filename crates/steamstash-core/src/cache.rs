//! File-backed caching for fetched JSON blobs.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Error;
use crate::events::{EventSink, NoopEventSink};
use crate::player::SteamId;

/// Defines how the blob store treats an existing slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheMode {
    /// Read the stored blob if the slot is occupied;
    /// otherwise, populate from the network and write the blob. (Default)
    Use,
    /// Always populate from the network, ignoring any stored blob,
    /// and overwrite the slot with the new blob.
    Refresh,
}

impl Default for CacheMode {
    fn default() -> Self {
        Self::Use
    }
}

/// Deterministic cache slot address. The same inputs always address the
/// same slot, so each account and resource combination owns exactly one
/// file and repeated loads overwrite rather than accumulate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheKey {
    Summaries { steam_id: SteamId },
    Inventory { steam_id: SteamId, app_id: u32 },
}

impl CacheKey {
    pub const fn summaries(steam_id: SteamId) -> Self {
        Self::Summaries { steam_id }
    }

    pub const fn inventory(steam_id: SteamId, app_id: u32) -> Self {
        Self::Inventory { steam_id, app_id }
    }

    /// File name of the slot inside the cache root.
    pub fn file_name(&self) -> String {
        match self {
            Self::Summaries { steam_id } => format!("{steam_id}_summaries.json"),
            Self::Inventory { steam_id, app_id } => {
                format!("{steam_id}_full_inventory_{app_id}.json")
            }
        }
    }
}

/// One JSON file per cache key under a fixed root directory.
///
/// Blobs never expire on their own; the only way past a stored blob is
/// `CacheMode::Refresh`. A populate failure writes nothing, so a slot is
/// either absent or holds a complete blob.
#[derive(Clone)]
pub struct BlobCache {
    root: PathBuf,
    events: Arc<dyn EventSink>,
}

impl BlobCache {
    /// Open a cache rooted at `root`, creating the directory if needed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, Error> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|err| {
            Error::cache_io(&root, format!("could not create cache directory: {err}"))
        })?;

        Ok(Self {
            root,
            events: Arc::new(NoopEventSink),
        })
    }

    /// Open the cache at the platform application data location.
    pub fn at_default_location() -> Result<Self, Error> {
        Self::open(default_cache_root()?)
    }

    pub fn with_events(mut self, events: Arc<dyn EventSink>) -> Self {
        self.events = events;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute path of the slot addressed by `key`.
    pub fn path_for(&self, key: &CacheKey) -> PathBuf {
        self.root.join(key.file_name())
    }

    /// Read-through core: return the stored blob for `key`, or invoke
    /// `populate`, write its output into the slot, and return it. A
    /// `populate` failure propagates untouched and leaves the slot exactly
    /// as it was.
    pub fn get_or_populate<T, F>(
        &self,
        key: &CacheKey,
        mode: CacheMode,
        populate: F,
    ) -> Result<T, Error>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Result<T, Error>,
    {
        let path = self.path_for(key);
        if mode == CacheMode::Use && path.exists() {
            return self.read_slot(&path);
        }

        let blob = populate()?;
        self.write_slot(&path, &blob)?;
        Ok(blob)
    }

    fn read_slot<T: DeserializeOwned>(&self, path: &Path) -> Result<T, Error> {
        let raw = fs::read_to_string(path).map_err(|err| Error::cache_io(path, err.to_string()))?;
        let blob = serde_json::from_str(&raw)
            .map_err(|err| Error::cache_io(path, format!("corrupt cache blob: {err}")))?;

        self.events.cache_read(path);
        Ok(blob)
    }

    fn write_slot<T: Serialize>(&self, path: &Path, blob: &T) -> Result<(), Error> {
        let raw = serde_json::to_string_pretty(blob)
            .map_err(|err| Error::cache_io(path, err.to_string()))?;
        fs::write(path, raw).map_err(|err| Error::cache_io(path, err.to_string()))?;

        self.events.cache_write(path);
        Ok(())
    }
}

/// `{platform data dir}/steamstash`, falling back to `~/.local/share` when
/// the platform lookup comes up empty.
fn default_cache_root() -> Result<PathBuf, Error> {
    let base = dirs::data_dir()
        .or_else(|| {
            dirs::home_dir().map(|mut home| {
                home.push(".local");
                home.push("share");
                home
            })
        })
        .ok_or_else(|| Error::configuration("could not resolve the platform data directory"))?;

    Ok(base.join("steamstash"))
}
