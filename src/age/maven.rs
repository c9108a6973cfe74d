//! Maven Central search client for fetching artifact release dates

use std::time::Duration;

use chrono::{DateTime, NaiveDate};
use reqwest::Client;
use serde::Deserialize;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::age::error::RegistryError;
use crate::age::registry::ReleaseDateSource;
use crate::age::types::Coordinate;

/// Pause between retry attempts against the search API.
const RETRY_DELAY: Duration = Duration::from_secs(1);

/// Client for the Maven Central search API.
///
/// The search endpoint quite often times out or returns HTTP 5xx, so every
/// lookup runs through a bounded retry loop. 4xx responses and empty result
/// sets are definitive "no data" outcomes and are never retried.
pub struct MavenSearchClient {
    client: Client,
    base_url: String,
    retry_count: u32,
    retry_delay: Duration,
}

impl MavenSearchClient {
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        retry_count: u32,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            retry_count,
            retry_delay: RETRY_DELAY,
        })
    }

    /// Overrides the pause between retries. Tests use this to avoid
    /// sleeping through the default one-second backoff.
    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    async fn attempt(&self, url: &str) -> Result<Option<NaiveDate>, RegistryError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if status.is_client_error() {
            // Definitive "no data" for this artifact, not a failure.
            debug!("Search API returned {} for {}", status, url);
            return Ok(None);
        }

        if !status.is_success() {
            return Err(RegistryError::Status(status));
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| RegistryError::Malformed(e.to_string()))?;

        if body.response.num_found == 0 {
            return Ok(None);
        }

        let doc = body.response.docs.first().ok_or_else(|| {
            RegistryError::Malformed("numFound is non-zero but docs is empty".to_string())
        })?;

        let release_date = DateTime::from_timestamp_millis(doc.timestamp)
            .map(|instant| instant.date_naive())
            .ok_or_else(|| {
                RegistryError::Malformed(format!("timestamp {} out of range", doc.timestamp))
            })?;

        Ok(Some(release_date))
    }
}

#[async_trait::async_trait]
impl ReleaseDateSource for MavenSearchClient {
    async fn fetch_release_date(
        &self,
        coordinate: &Coordinate,
        version: &str,
    ) -> Result<Option<NaiveDate>, RegistryError> {
        let url = format!(
            "{}/solrsearch/select?q=g:{}+AND+a:{}+AND+v:{}&wt=json",
            self.base_url, coordinate.group_id, coordinate.artifact_id, version
        );
        debug!("Fetching {}", url);

        let label = format!("{} {}", coordinate, version);
        fetch_with_retries(self.retry_count, self.retry_delay, &label, || {
            self.attempt(&url)
        })
        .await
    }
}

/// Runs `attempt` until it succeeds or the retry budget is spent. Only
/// transient failures (5xx, network-level errors) are retried; anything
/// else is returned immediately.
async fn fetch_with_retries<F, Fut>(
    retry_count: u32,
    retry_delay: Duration,
    label: &str,
    mut attempt: F,
) -> Result<Option<NaiveDate>, RegistryError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<Option<NaiveDate>, RegistryError>>,
{
    let mut retries_left = retry_count;
    loop {
        match attempt().await {
            Ok(found) => return Ok(found),
            Err(error) if error.is_transient() && retries_left > 0 => {
                warn!(
                    "Transient failure fetching release date for {}: {} ({} retries left)",
                    label, error, retries_left
                );
                retries_left -= 1;
                sleep(retry_delay).await;
            }
            Err(error) => return Err(error),
        }
    }
}

/// Search API response shape: `{"response": {"numFound": N, "docs": [...]}}`.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    response: SearchResult,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    #[serde(rename = "numFound")]
    num_found: u64,
    #[serde(default)]
    docs: Vec<SearchDoc>,
}

#[derive(Debug, Deserialize)]
struct SearchDoc {
    /// Release instant in milliseconds since the UNIX epoch.
    timestamp: i64,
}
