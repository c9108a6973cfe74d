//! Update evaluation: turning version pairs into aged updates

use tracing::debug;

use crate::age::registry::ReleaseDateSource;
use crate::age::resolver::ReleaseDateResolver;
use crate::age::types::{AgedUpdate, UpdateCandidate};

/// Weeks per year used to convert libweeks into fractional libyears.
pub const WEEKS_PER_YEAR: f32 = 52.0;

/// Evaluates one update candidate into an [`AgedUpdate`].
///
/// Returns `None` when there is nothing to age: the candidate is already on
/// the latest version, either release date is unknown, or the registry
/// reports the "latest" version as released *before* the current one. The
/// last case happens with legacy date-stamped version schemes (e.g.
/// commons-io 2.11.0 -> 20030203.000550) and would otherwise contribute a
/// negative age.
pub async fn evaluate_update<S: ReleaseDateSource>(
    resolver: &ReleaseDateResolver<S>,
    candidate: &UpdateCandidate,
) -> Option<AgedUpdate> {
    if candidate.current_version == candidate.latest_version {
        return None;
    }

    let latest_release = resolver
        .resolve(&candidate.coordinate, &candidate.latest_version)
        .await?;
    let current_release = resolver
        .resolve(&candidate.coordinate, &candidate.current_version)
        .await?;

    if current_release > latest_release {
        debug!(
            "Discarding {}: current version {} ({}) released after latest {} ({})",
            candidate.coordinate,
            candidate.current_version,
            current_release,
            candidate.latest_version,
            latest_release
        );
        return None;
    }

    let lib_weeks = (latest_release - current_release).num_weeks();
    Some(AgedUpdate {
        coordinate: candidate.coordinate.clone(),
        current_release,
        latest_release,
        lib_weeks,
        lib_years: lib_weeks as f32 / WEEKS_PER_YEAR,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::age::registry::MockReleaseDateSource;
    use crate::age::types::Coordinate;
    use chrono::NaiveDate;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn candidate(current: &str, latest: &str) -> UpdateCandidate {
        UpdateCandidate {
            coordinate: Coordinate::new("g", "a"),
            current_version: current.to_string(),
            latest_version: latest.to_string(),
        }
    }

    fn resolver_with_dates(
        dates: Vec<(&'static str, NaiveDate)>,
    ) -> ReleaseDateResolver<MockReleaseDateSource> {
        let mut source = MockReleaseDateSource::new();
        source.expect_fetch_release_date().returning(move |_, version| {
            Ok(dates
                .iter()
                .find(|(v, _)| *v == version)
                .map(|(_, date)| *date))
        });
        ReleaseDateResolver::new(source)
    }

    #[tokio::test]
    async fn one_year_between_releases_is_one_libyear() {
        let resolver = resolver_with_dates(vec![
            ("1.0.0", date(2022, 5, 1)),
            ("2.0.0", date(2023, 5, 1)),
        ]);

        let aged = evaluate_update(&resolver, &candidate("1.0.0", "2.0.0"))
            .await
            .unwrap();

        assert_eq!(aged.lib_weeks, 52);
        assert_eq!(aged.lib_years, 1.0);
        assert!(aged.lib_years >= 0.0);
    }

    #[tokio::test]
    async fn same_version_is_not_an_update() {
        // The resolver must not be consulted at all.
        let mut source = MockReleaseDateSource::new();
        source.expect_fetch_release_date().times(0);
        let resolver = ReleaseDateResolver::new(source);

        let aged = evaluate_update(&resolver, &candidate("1.0.0", "1.0.0")).await;

        assert_eq!(aged, None);
    }

    #[tokio::test]
    async fn unknown_current_release_date_skips_the_candidate() {
        let resolver = resolver_with_dates(vec![("2.0.0", date(2023, 5, 1))]);

        let aged = evaluate_update(&resolver, &candidate("1.0.0", "2.0.0")).await;

        assert_eq!(aged, None);
    }

    #[tokio::test]
    async fn unknown_latest_release_date_skips_the_candidate() {
        let resolver = resolver_with_dates(vec![("1.0.0", date(2022, 5, 1))]);

        let aged = evaluate_update(&resolver, &candidate("1.0.0", "2.0.0")).await;

        assert_eq!(aged, None);
    }

    #[tokio::test]
    async fn inverted_release_dates_are_discarded() {
        // "Latest" by version ordering but released ~15 years earlier, as
        // with date-stamped legacy versions.
        let resolver = resolver_with_dates(vec![
            ("2.11.0", date(2021, 7, 1)),
            ("20030203.000550", date(2003, 2, 3)),
        ]);

        let aged = evaluate_update(&resolver, &candidate("2.11.0", "20030203.000550")).await;

        assert_eq!(aged, None);
    }

    #[tokio::test]
    async fn same_day_releases_age_zero() {
        let resolver = resolver_with_dates(vec![
            ("1.0.0", date(2023, 5, 1)),
            ("1.0.1", date(2023, 5, 1)),
        ]);

        let aged = evaluate_update(&resolver, &candidate("1.0.0", "1.0.1"))
            .await
            .unwrap();

        assert_eq!(aged.lib_weeks, 0);
        assert_eq!(aged.lib_years, 0.0);
    }
}
