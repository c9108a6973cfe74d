//! Core value types for dependency age analysis

use std::fmt;

use chrono::NaiveDate;
use serde::Deserialize;

/// The version-independent identity of a dependency (groupId:artifactId).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coordinate {
    pub group_id: String,
    pub artifact_id: String,
}

impl Coordinate {
    pub fn new(group_id: impl Into<String>, artifact_id: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group_id, self.artifact_id)
    }
}

/// A dependency with an update available, as reported by the external
/// version resolver.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCandidate {
    pub coordinate: Coordinate,
    pub current_version: String,
    pub latest_version: String,
}

/// An outdated dependency whose age could be computed from both release
/// dates. `lib_years` is always non-negative.
#[derive(Debug, Clone, PartialEq)]
pub struct AgedUpdate {
    pub coordinate: Coordinate,
    pub current_release: NaiveDate,
    pub latest_release: NaiveDate,
    /// Whole weeks between the two release dates.
    pub lib_weeks: i64,
    pub lib_years: f32,
}

/// One row handed to the report writer collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRecord {
    pub coordinate: Coordinate,
    pub version: String,
    pub category: String,
    /// `None` renders as "unknown" (no release date, or below the
    /// configured reporting threshold).
    pub lib_years: Option<f32>,
}

/// The whole handoff document produced by the external version resolver:
/// every module of the build, each with its dependency categories.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildAnalysis {
    pub modules: Vec<ModuleAnalysis>,
}

/// One module of a multi-module build.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleAnalysis {
    pub name: String,
    pub categories: Vec<CategoryAnalysis>,
}

/// One dependency category of a module (e.g. "Dependencies",
/// "Dependency Management", "Plugin Dependencies").
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryAnalysis {
    pub name: String,
    pub candidates: Vec<UpdateCandidate>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn coordinate_displays_as_group_colon_artifact() {
        let coordinate = Coordinate::new("org.apache.commons", "commons-lang3");
        assert_eq!(coordinate.to_string(), "org.apache.commons:commons-lang3");
    }

    #[test]
    fn coordinate_orders_by_group_then_artifact() {
        let mut coordinates = vec![
            Coordinate::new("b", "two"),
            Coordinate::new("a", "one"),
            Coordinate::new("a", "zero"),
        ];
        coordinates.sort();
        assert_eq!(
            coordinates,
            vec![
                Coordinate::new("a", "one"),
                Coordinate::new("a", "zero"),
                Coordinate::new("b", "two"),
            ]
        );
    }

    #[test]
    fn build_analysis_deserializes_from_resolver_handoff() {
        let build = serde_json::from_value::<BuildAnalysis>(json!({
            "modules": [{
                "name": "core",
                "categories": [{
                    "name": "Dependencies",
                    "candidates": [{
                        "coordinate": {"groupId": "g", "artifactId": "a"},
                        "currentVersion": "1.0.0",
                        "latestVersion": "2.0.0"
                    }]
                }]
            }]
        }))
        .unwrap();

        assert_eq!(build.modules.len(), 1);
        let candidate = &build.modules[0].categories[0].candidates[0];
        assert_eq!(candidate.coordinate, Coordinate::new("g", "a"));
        assert_eq!(candidate.current_version, "1.0.0");
        assert_eq!(candidate.latest_version, "2.0.0");
    }
}
