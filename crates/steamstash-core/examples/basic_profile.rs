//! # Basic Profile Example
//!
//! The smallest possible steamstash program: load one account through the
//! blob cache and print the profile plus a slice of the classified
//! inventory.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --example basic_profile
//! ```
//!
//! ## Prerequisites
//!
//! Set your Steam Web API key:
//!
//! ```bash
//! export STEAM_API_KEY=your_key_here
//! ```

use steamstash_core::{
    BlobCache, CacheMode, PlayerLoader, PlayerSelector, SteamApiClient, DOTA2_APP_ID,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // The credential travels as a query parameter on every call
    let api = SteamApiClient::new(std::env::var("STEAM_API_KEY")?);

    // Blobs land under the platform data directory; a second run of this
    // example is served entirely from disk
    let cache = BlobCache::at_default_location()?;
    let loader = PlayerLoader::new(api, cache);

    println!("📦 Loading account gabelogannewell...");
    let player = loader.load(
        &PlayerSelector::handle("gabelogannewell"),
        DOTA2_APP_ID,
        CacheMode::Use,
    )?;

    println!("✅ Steam ID: {}", player.steam_id);
    println!(
        "   Persona:  {}",
        player.profile.persona_name.as_deref().unwrap_or("-")
    );
    println!("   Items:    {}", player.inventory.len());

    for item in player.inventory.iter().take(10) {
        println!("   {:<12} {}", item.tag, item.label);
    }

    Ok(())
}
