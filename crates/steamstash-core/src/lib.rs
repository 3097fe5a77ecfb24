//! # Steamstash Core
//!
//! Core contracts and domain types for the steamstash inventory toolkit.
//!
//! ## Overview
//!
//! This crate provides the foundational components for steamstash:
//!
//! - **Steam Web API client** for identity resolution, profile summaries,
//!   and the paginated community inventory endpoint
//! - **File-backed blob cache** with explicit read-through semantics
//! - **Item taxonomy** classifying raw records through an ordered rule table
//! - **Account aggregate** combining profile, handle, and classified inventory
//! - **Event sink trait** so callers decide what, if anything, gets logged
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`cache`] | File-backed blob cache keyed by account and resource |
//! | [`error`] | Error taxonomy for the acquisition pipeline |
//! | [`events`] | Observer hooks with a no-op default |
//! | [`http_client`] | Blocking HTTP client abstraction |
//! | [`item`] | Raw and classified inventory records |
//! | [`player`] | Account aggregate, selectors, and the load pipeline |
//! | [`steam`] | Steam Web API client |
//! | [`taxonomy`] | Item tags and the classification rule table |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use steamstash_core::{
//!     BlobCache, CacheMode, PlayerLoader, PlayerSelector, SteamApiClient, DOTA2_APP_ID,
//! };
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api = SteamApiClient::new(std::env::var("STEAM_API_KEY")?);
//!     let cache = BlobCache::at_default_location()?;
//!     let loader = PlayerLoader::new(api, cache);
//!
//!     let player = loader.load(
//!         &PlayerSelector::handle("gabelogannewell"),
//!         DOTA2_APP_ID,
//!         CacheMode::Use,
//!     )?;
//!
//!     for item in &player.inventory {
//!         println!("{}: {}", item.tag, item.label);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod error;
pub mod events;
pub mod http_client;
pub mod item;
pub mod player;
pub mod steam;
pub mod taxonomy;

// Re-export commonly used types at crate root for convenience

// Caching
pub use cache::{BlobCache, CacheKey, CacheMode};

// Error types
pub use error::{Error, FetchStage};

// Event hooks
pub use events::{EventSink, NoopEventSink};

// HTTP client types
pub use http_client::{HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient};

// Inventory records
pub use item::{ClassifiedItem, DescriptionLine, ItemRecord};

// Account aggregate
pub use player::{
    InventoryFilter, Player, PlayerLoader, PlayerProfile, PlayerSelector, SteamId,
};

// Steam Web API client
pub use steam::{
    InventoryPayload, SteamApiClient, DEFAULT_MAX_PAGES, DEFAULT_TIMEOUT_MS, DOTA2_APP_ID,
};

// Taxonomy
pub use taxonomy::{classify, may_be_gifted_once, Classification, ItemTag};
