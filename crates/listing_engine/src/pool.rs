use engine_logging::{engine_error, engine_info};
use futures_util::stream::{self, StreamExt};

use crate::fetch::{FetchError, FetchSettings, RetryingFetcher};
use crate::normalize::normalize_payload;
use crate::room::scrape_room;
use crate::settings::ScrapeSettings;
use crate::types::RoomPayload;

/// Fetch, extract, and normalize every URL with a bounded worker pool.
///
/// Results arrive in completion order. A URL whose fetch exhausts its retry
/// budget is logged and dropped; sibling workers are unaffected.
pub async fn scrape_all(urls: &[String], settings: &ScrapeSettings) -> Vec<RoomPayload> {
    let workers = settings.max_workers.max(1);
    engine_info!(
        "starting scrape of {} url(s) with up to {workers} workers",
        urls.len()
    );

    let fetch_settings = settings.fetch_settings();
    let payloads: Vec<RoomPayload> = stream::iter(urls.iter().cloned())
        .map(|url| {
            let fetch_settings = fetch_settings.clone();
            async move {
                match scrape_one(&url, fetch_settings).await {
                    Ok(payload) => {
                        engine_info!("successfully scraped {url}");
                        Some(payload)
                    }
                    Err(error) => {
                        engine_error!("failed to scrape {url}: {error}");
                        None
                    }
                }
            }
        })
        .buffer_unordered(workers)
        .filter_map(|outcome| async move { outcome })
        .collect()
        .await;

    engine_info!("finished scraping, collected {} record(s)", payloads.len());
    payloads
}

/// One worker's end-to-end task. Each task owns its own HTTP client.
async fn scrape_one(url: &str, settings: FetchSettings) -> Result<RoomPayload, FetchError> {
    let fetcher = RetryingFetcher::new(settings)?;
    let raw = scrape_room(&fetcher, url).await?;
    Ok(normalize_payload(&raw))
}
