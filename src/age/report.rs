//! Report formatting: aged-dependency lines and CSV report records

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

use chrono::NaiveDate;
use tracing::info;

use crate::age::detect::WEEKS_PER_YEAR;
use crate::age::registry::ReleaseDateSource;
use crate::age::resolver::ReleaseDateResolver;
use crate::age::totals::SessionTotals;
use crate::age::types::{AgedUpdate, ReportRecord, UpdateCandidate};

/// Screen width for formatting the output number of libyears.
const INFO_PAD_SIZE: usize = 72;

/// Logs one category's outdated dependencies in alphabetical order, feeds
/// each into the session totals, and returns the category's libyear
/// subtotal. Sorts `updates` in place.
pub fn report_outdated(
    category: &str,
    updates: &mut [AgedUpdate],
    totals: &SessionTotals,
) -> f32 {
    if updates.is_empty() {
        return 0.0;
    }

    updates.sort_by(|a, b| a.coordinate.cmp(&b.coordinate));

    info!("The following dependencies in {} have newer versions:", category);
    let mut lib_years = 0.0;
    for update in updates.iter() {
        for line in format_age_lines(&update.coordinate.to_string(), update.lib_years) {
            info!("{}", line);
        }
        lib_years += update.lib_years;
        totals.record_update(update);
    }
    info!("");

    lib_years
}

/// Formats one dependency's age as dot-padded line(s):
///
/// ```text
///   mygroup:myartifact ................................... 1.00 libyears
///   mygroup:myartifactwithaverylongname
///   ..................................................... 2.00 libyears
/// ```
///
/// The coordinate is wrapped onto its own line when the combined width
/// would exceed the column budget.
pub fn format_age_lines(coordinate: &str, lib_years: f32) -> Vec<String> {
    let right = format!(" {lib_years:.2} libyears");
    let left = format!("  {coordinate} ");
    let width = INFO_PAD_SIZE.saturating_sub(right.len());

    if left.len() + right.len() > INFO_PAD_SIZE {
        vec![left, format!("{:.<width$}{}", "  ", right)]
    } else {
        vec![format!("{left:.<width$}{right}")]
    }
}

/// Builds one report record per candidate for the report writer
/// collaborator. The reported age is that of the version in use, measured
/// against `today`; it renders as "unknown" when no release date could be
/// resolved or the age does not clear `min_lib_years`.
pub async fn build_report_records<S: ReleaseDateSource>(
    resolver: &ReleaseDateResolver<S>,
    category: &str,
    candidates: &[UpdateCandidate],
    min_lib_years: f32,
    today: NaiveDate,
) -> Vec<ReportRecord> {
    let mut records = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let lib_years = resolver
            .resolve(&candidate.coordinate, &candidate.current_version)
            .await
            .and_then(|release| {
                let years = (today - release).num_weeks() as f32 / WEEKS_PER_YEAR;
                (years > 0.0 && (min_lib_years <= 0.0 || years > min_lib_years)).then_some(years)
            });

        records.push(ReportRecord {
            coordinate: candidate.coordinate.clone(),
            version: candidate.current_version.clone(),
            category: category.to_string(),
            lib_years,
        });
    }
    records
}

/// Renders report records as CSV lines: `coordinate,version,category,age`.
pub fn render_csv(records: &[ReportRecord]) -> String {
    let mut out = String::new();
    for record in records {
        let lib_years = match record.lib_years {
            Some(years) => format!("{years:.2}"),
            None => "unknown".to_string(),
        };
        out.push_str(&format!(
            "{},{},{},{}\n",
            record.coordinate, record.version, record.category, lib_years
        ));
    }
    out
}

/// Appends report records to `path`, creating the file if needed. Appending
/// lets every module of a multi-module build share one report file.
pub fn append_report(path: &Path, records: &[ReportRecord]) -> io::Result<()> {
    if records.is_empty() {
        return Ok(());
    }

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(render_csv(records).as_bytes())
}
