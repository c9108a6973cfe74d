//! Source trait for looking up release dates of published artifacts

#[cfg(test)]
use mockall::automock;

use chrono::NaiveDate;

use crate::age::error::RegistryError;
use crate::age::types::Coordinate;

/// Trait for fetching the release date of one artifact version.
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait ReleaseDateSource: Send + Sync {
    /// Fetches the release date for `coordinate` at `version`.
    ///
    /// # Returns
    /// * `Ok(Some(date))` - the registry knows the version
    /// * `Ok(None)` - the registry has no record of it (definitive, not an error)
    /// * `Err(RegistryError)` - the lookup failed after the configured retries
    async fn fetch_release_date(
        &self,
        coordinate: &Coordinate,
        version: &str,
    ) -> Result<Option<NaiveDate>, RegistryError>;
}
