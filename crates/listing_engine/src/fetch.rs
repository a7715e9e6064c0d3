use std::time::Duration;

use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use engine_logging::{engine_debug, engine_warn};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE};
use reqwest::StatusCode;
use thiserror::Error;

pub(crate) const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; ListingHarvester/1.0)";

/// Per-worker fetch configuration.
#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub user_agent: String,
    /// Per-attempt timeout; there is no overall deadline across retries.
    pub request_timeout: Duration,
    /// Additional attempts after the first one.
    pub max_retries: u32,
    /// One backoff unit: the wait before attempt N+1 is N units.
    pub backoff_unit: Duration,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout: Duration::from_secs(20),
            max_retries: 2,
            backoff_unit: Duration::from_secs(1),
        }
    }
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to build http client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("failed to fetch {url} after {attempts} attempt(s)")]
    Exhausted {
        url: String,
        attempts: u32,
        #[source]
        source: Option<reqwest::Error>,
    },
}

#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

enum AttemptError {
    Status(StatusCode),
    Transport(reqwest::Error),
}

/// Reqwest-backed fetcher accepting only 200 responses, with linear backoff
/// between attempts.
#[derive(Debug)]
pub struct RetryingFetcher {
    client: reqwest::Client,
    settings: FetchSettings,
}

impl RetryingFetcher {
    pub fn new(settings: FetchSettings) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            ),
        );
        let client = reqwest::Client::builder()
            .user_agent(settings.user_agent.clone())
            .default_headers(headers)
            .timeout(settings.request_timeout)
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self { client, settings })
    }

    async fn attempt(&self, url: &str) -> Result<String, AttemptError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(AttemptError::Transport)?;
        let status = response.status();
        if status != StatusCode::OK {
            return Err(AttemptError::Status(status));
        }
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());
        let bytes = response.bytes().await.map_err(AttemptError::Transport)?;
        Ok(decode_body(&bytes, content_type.as_deref()))
    }
}

#[async_trait::async_trait]
impl Fetcher for RetryingFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let attempts = self.settings.max_retries + 1;
        let mut last_error: Option<reqwest::Error> = None;
        for attempt in 1..=attempts {
            engine_debug!("fetching {url} (attempt {attempt}/{attempts})");
            match self.attempt(url).await {
                Ok(body) => return Ok(body),
                Err(AttemptError::Status(status)) => {
                    engine_warn!("unexpected status {status} for {url} on attempt {attempt}");
                }
                Err(AttemptError::Transport(error)) => {
                    engine_warn!("request error for {url} on attempt {attempt}: {error}");
                    last_error = Some(error);
                }
            }
            // Linear backoff, only between attempts.
            if attempt < attempts {
                tokio::time::sleep(self.settings.backoff_unit * attempt).await;
            }
        }
        Err(FetchError::Exhausted {
            url: url.to_string(),
            attempts,
            source: last_error,
        })
    }
}

/// Decode response bytes with the declared charset when there is one, else
/// by content sniffing. Undecodable bytes become replacement characters.
fn decode_body(bytes: &[u8], content_type: Option<&str>) -> String {
    if let Some(encoding) = content_type
        .and_then(charset_label)
        .and_then(|label| Encoding::for_label(label.as_bytes()))
    {
        return encoding.decode(bytes).0.into_owned();
    }
    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    detector.guess(None, true).decode(bytes).0.into_owned()
}

fn charset_label(content_type: &str) -> Option<&str> {
    content_type.split(';').find_map(|part| {
        let part = part.trim();
        match part.get(..8) {
            Some(prefix) if prefix.eq_ignore_ascii_case("charset=") => {
                Some(part[8..].trim_matches(['"', '\''].as_ref()))
            }
            _ => None,
        }
    })
}
