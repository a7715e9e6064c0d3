//! Listing engine: fetch, extract, and normalize rental listing pages.
mod amenities;
mod document;
mod fetch;
mod input;
mod normalize;
mod output;
mod pool;
mod ratings;
mod room;
mod settings;
mod types;

pub use amenities::extract_amenities;
pub use document::Document;
pub use fetch::{FetchError, FetchSettings, Fetcher, RetryingFetcher};
pub use input::{collect_start_urls, load_start_urls, InputError};
pub use normalize::normalize_payload;
pub use output::{write_payloads, PersistError};
pub use pool::scrape_all;
pub use ratings::extract_ratings;
pub use room::{parse_room, scrape_room};
pub use settings::{load_settings, ScrapeSettings};
pub use types::{
    AmenityGroup, AmenityItem, Highlight, HostDetails, ImageRef, PriceInfo, RatingSummary,
    RoomPayload,
};
