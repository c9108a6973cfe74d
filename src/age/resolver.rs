//! Release-date resolution: cache first, registry on miss

use chrono::NaiveDate;
use tracing::{debug, error};

use crate::age::cache::ReleaseDateCache;
use crate::age::registry::ReleaseDateSource;
use crate::age::types::Coordinate;

/// Combines the release-date cache with a registry source. Every distinct
/// (coordinate, version) pair costs at most one fetch on the happy path;
/// failed or empty lookups are not cached, so a later lookup may try again.
pub struct ReleaseDateResolver<S> {
    cache: ReleaseDateCache,
    source: S,
}

impl<S: ReleaseDateSource> ReleaseDateResolver<S> {
    pub fn new(source: S) -> Self {
        Self {
            cache: ReleaseDateCache::new(),
            source,
        }
    }

    pub fn cache(&self) -> &ReleaseDateCache {
        &self.cache
    }

    /// Returns the release date for `coordinate` at `version`, or `None`
    /// when the registry has no record of it or the lookup failed. Failures
    /// are logged and never propagate; a single unresolvable dependency
    /// must not abort the analysis of a whole build.
    pub async fn resolve(&self, coordinate: &Coordinate, version: &str) -> Option<NaiveDate> {
        if let Some(release_date) = self.cache.get(coordinate, version) {
            return Some(release_date);
        }

        match self.source.fetch_release_date(coordinate, version).await {
            Ok(Some(release_date)) => {
                debug!(
                    "Found release date {} for {} {}",
                    release_date, coordinate, version
                );
                self.cache.put(coordinate, version, release_date);
                Some(release_date)
            }
            Ok(None) => {
                debug!("No release metadata for {} {}", coordinate, version);
                None
            }
            Err(e) => {
                error!(
                    "Failed to fetch release date for {} {}: {}",
                    coordinate, version, e
                );
                None
            }
        }
    }
}
