mod cli;
mod error;
mod logging;
mod output;

use std::sync::Arc;

use clap::Parser;

use steamstash_core::{BlobCache, CacheMode, EventSink, PlayerLoader, SteamApiClient};

use crate::cli::Cli;
use crate::error::CliError;
use crate::logging::LogEventSink;

fn main() {
    pretty_env_logger::init();

    if let Err(error) = run() {
        eprintln!("error: {error}");
        std::process::exit(error.exit_code());
    }
}

fn run() -> Result<(), CliError> {
    let mut cli = Cli::parse();
    cli.normalize();

    let api_key = cli.api_key()?;
    let selectors = cli.selectors()?;
    let filter = cli.filter();
    let mode = if cli.refresh {
        CacheMode::Refresh
    } else {
        CacheMode::Use
    };

    let events: Arc<dyn EventSink> = Arc::new(LogEventSink);
    let api = SteamApiClient::new(api_key)
        .with_timeout_ms(cli.timeout_ms)
        .with_max_pages(cli.max_pages)
        .with_events(Arc::clone(&events));
    let cache = match &cli.cache_dir {
        Some(dir) => BlobCache::open(dir)?,
        None => BlobCache::at_default_location()?,
    }
    .with_events(events);
    let loader = PlayerLoader::new(api, cache);

    for selector in &selectors {
        let player = loader
            .load(selector, cli.app_id, mode)
            .map_err(|source| CliError::Account {
                account: selector.to_string(),
                source,
            })?;

        if cli.display_player {
            output::render_player(&player);
        }
        if cli.display_inventory {
            output::render_inventory(&player.filtered(&filter));
        }
    }

    Ok(())
}
