//! CLI argument definitions for steamstash.
//!
//! The interface is flag-driven: selectors pick the accounts to load,
//! display flags pick what gets printed, and filter flags narrow the
//! inventory listing. Loading happens for every selected account even when
//! nothing is displayed, which makes `steamstash -i <id>` a pure cache
//! warmer.
//!
//! # Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `-i, --steam-ids` | | Numeric SteamIDs to load |
//! | `-u, --steam-users` | | Vanity handles to resolve and load |
//! | `--app-id` | `570` | Application whose inventory is loaded |
//! | `--api-key-env` | `STEAM_API_KEY` | Environment variable holding the API key |
//! | `--refresh` | `false` | Ignore stored blobs and fetch online |
//! | `--cache-dir` | platform data dir | Cache directory override |
//! | `--timeout-ms` | `10000` | Transport timeout per request |
//! | `--max-pages` | `200` | Bound on inventory pages per account |
//!
//! # Examples
//!
//! ```bash
//! # Warm the cache for two accounts
//! steamstash -i 76561198038148658 -u gabelogannewell
//!
//! # Show a profile and its tradable couriers
//! steamstash -u gabelogannewell --display-inventory \
//!     --filter-by-type courier --filter-by-tradable
//!
//! # Re-fetch everything, bypassing stored blobs
//! steamstash -i 76561198038148658 --display-inventory-full --refresh
//! ```

use std::path::PathBuf;

use clap::Parser;

use steamstash_core::{
    InventoryFilter, ItemTag, PlayerSelector, SteamId, DEFAULT_MAX_PAGES, DEFAULT_TIMEOUT_MS,
    DOTA2_APP_ID,
};

use crate::error::CliError;

/// Steam inventory fetcher and classifier.
///
/// Loads player profiles and game inventories from the Steam Web API,
/// caches the raw JSON blobs locally, and renders classified, filterable
/// item listings.
#[derive(Debug, Parser)]
#[command(
    name = "steamstash",
    version,
    about = "Fetch, cache, and classify Steam inventories"
)]
pub struct Cli {
    /// Numeric 64-bit SteamIDs to load.
    #[arg(short = 'i', long, num_args = 1.., value_name = "STEAM_ID")]
    pub steam_ids: Vec<String>,

    /// Vanity handles to resolve and load.
    #[arg(short = 'u', long, num_args = 1.., value_name = "HANDLE")]
    pub steam_users: Vec<String>,

    /// Application id whose inventory is loaded (570 = Dota 2).
    #[arg(long, default_value_t = DOTA2_APP_ID, value_name = "APP_ID")]
    pub app_id: u32,

    /// Name of the environment variable holding the Steam Web API key.
    #[arg(long, default_value = "STEAM_API_KEY", value_name = "VAR")]
    pub api_key_env: String,

    /// Ignore stored blobs and fetch everything online again.
    #[arg(long)]
    pub refresh: bool,

    /// Cache directory override. Defaults to the platform data directory.
    #[arg(long, value_name = "PATH")]
    pub cache_dir: Option<PathBuf>,

    /// Transport timeout per request, in milliseconds.
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_MS, value_name = "MS")]
    pub timeout_ms: u64,

    /// Upper bound on inventory pages fetched per account.
    #[arg(long, default_value_t = DEFAULT_MAX_PAGES, value_name = "N")]
    pub max_pages: usize,

    /// Print the profile block for each loaded account.
    #[arg(long, help_heading = "Display")]
    pub display_player: bool,

    /// Print the classified inventory listing (implies --display-player).
    #[arg(long, help_heading = "Display")]
    pub display_inventory: bool,

    /// Include HERO and MISC items in the listing (implies --display-inventory).
    #[arg(long, help_heading = "Display")]
    pub display_inventory_full: bool,

    /// Keep only items belonging to this hero.
    #[arg(long, help_heading = "Filters", value_name = "HERO")]
    pub filter_by_hero: Option<String>,

    /// Keep only items with this taxonomy tag
    /// (bundle, courier, hero, hero_bundle, misc, ward, weather).
    #[arg(long, help_heading = "Filters", value_name = "TAG")]
    pub filter_by_type: Option<ItemTag>,

    /// Keep only marketable items.
    #[arg(long, help_heading = "Filters")]
    pub filter_by_marketable: bool,

    /// Keep only tradable items.
    #[arg(long, help_heading = "Filters")]
    pub filter_by_tradable: bool,

    /// Keep only items that may still be gifted once.
    #[arg(long, help_heading = "Filters")]
    pub filter_by_giftable: bool,
}

impl Cli {
    /// Resolve the display implication chain: a full listing implies the
    /// inventory listing, which implies the profile block.
    pub fn normalize(&mut self) {
        if self.display_inventory_full {
            self.display_inventory = true;
        }
        if self.display_inventory {
            self.display_player = true;
        }
    }

    /// Selectors in command-line order: ids first, then handles. At least
    /// one selector is required; there is nothing to do without one.
    pub fn selectors(&self) -> Result<Vec<PlayerSelector>, CliError> {
        if self.steam_ids.is_empty() && self.steam_users.is_empty() {
            return Err(CliError::Configuration(String::from(
                "no accounts selected; pass --steam-ids and/or --steam-users",
            )));
        }

        let mut selectors = Vec::with_capacity(self.steam_ids.len() + self.steam_users.len());
        for raw in &self.steam_ids {
            let id = SteamId::parse(raw).map_err(|err| {
                CliError::Configuration(format!("invalid steam id '{raw}': {err}"))
            })?;
            selectors.push(PlayerSelector::Id(id));
        }
        for handle in &self.steam_users {
            selectors.push(PlayerSelector::handle(handle));
        }
        Ok(selectors)
    }

    /// Inventory filter assembled from the filter and display flags.
    pub fn filter(&self) -> InventoryFilter {
        InventoryFilter {
            tag: self.filter_by_type,
            label: self.filter_by_hero.clone(),
            marketable: self.filter_by_marketable,
            tradable: self.filter_by_tradable,
            giftable: self.filter_by_giftable,
            full_view: self.display_inventory_full,
        }
    }

    /// Read the API key from the configured environment variable.
    pub fn api_key(&self) -> Result<String, CliError> {
        match std::env::var(&self.api_key_env) {
            Ok(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(CliError::Configuration(format!(
                "environment variable '{}' with the Steam Web API key is not set",
                self.api_key_env
            ))),
        }
    }
}
