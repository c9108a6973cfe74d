//! Build-session orchestration

use chrono::Utc;
use tracing::{error, info};

use crate::age::detect::evaluate_update;
use crate::age::error::AnalysisError;
use crate::age::registry::ReleaseDateSource;
use crate::age::report::{append_report, build_report_records, report_outdated};
use crate::age::resolver::ReleaseDateResolver;
use crate::age::totals::SessionTotals;
use crate::age::types::{BuildAnalysis, ModuleAnalysis};
use crate::config::AnalysisConfig;

/// Everything printed once the last module of the build has been analyzed.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildSummary {
    pub total_lib_years: f32,
    pub oldest_module: Option<(String, f32)>,
    pub oldest_dependency: Option<(String, f32)>,
}

/// One build session's analysis context: the release-date cache, the
/// registry source and the running totals, shared by every module of the
/// build.
///
/// All methods take `&self`; a parallel build may analyze modules from
/// concurrent tasks against one shared session. The session is reusable
/// across independent builds via [`AnalysisSession::reset`].
pub struct AnalysisSession<S> {
    resolver: ReleaseDateResolver<S>,
    totals: SessionTotals,
    config: AnalysisConfig,
}

impl<S: ReleaseDateSource> AnalysisSession<S> {
    pub fn new(config: AnalysisConfig, source: S) -> Self {
        Self {
            resolver: ReleaseDateResolver::new(source),
            totals: SessionTotals::new(),
            config,
        }
    }

    pub fn resolver(&self) -> &ReleaseDateResolver<S> {
        &self.resolver
    }

    pub fn totals(&self) -> &SessionTotals {
        &self.totals
    }

    /// Analyzes one module: evaluates and reports every dependency
    /// category, then enforces the module ceiling. Returns the module's
    /// libyear total.
    ///
    /// The ceiling is checked only after *all* categories have been
    /// evaluated and reported, so a breach never truncates the module's
    /// own output.
    pub async fn analyze_module(&self, module: &ModuleAnalysis) -> Result<f32, AnalysisError> {
        let mut module_total = 0.0;

        for category in &module.categories {
            if let Some(report_file) = &self.config.report_file {
                let records = build_report_records(
                    &self.resolver,
                    &category.name,
                    &category.candidates,
                    self.config.min_lib_years_for_report,
                    Utc::now().date_naive(),
                )
                .await;
                if let Err(e) = append_report(report_file, &records) {
                    error!("Failed to write report file {}: {}", report_file.display(), e);
                }
            }

            let mut aged = Vec::new();
            for candidate in &category.candidates {
                if let Some(update) = evaluate_update(&self.resolver, candidate).await {
                    aged.push(update);
                }
            }

            module_total += report_outdated(&category.name, &mut aged, &self.totals);
        }

        if module_total != 0.0 {
            info!("This module is {:.2} libyears behind", module_total);
        }
        self.totals.record_module(&module.name, module_total);

        if self.config.max_lib_years > 0.0 && module_total >= self.config.max_lib_years {
            info!("");
            error!(
                "This module exceeds the maximum dependency age of {} libyears",
                self.config.max_lib_years
            );
            return Err(AnalysisError::ThresholdExceeded {
                module: module.name.clone(),
                limit: self.config.max_lib_years,
                actual: module_total,
            });
        }

        Ok(module_total)
    }

    /// Analyzes every module of the build in order and finalizes. Stops at
    /// the first module that breaches the ceiling.
    pub async fn run(&self, build: &BuildAnalysis) -> Result<BuildSummary, AnalysisError> {
        for module in &build.modules {
            self.analyze_module(module).await?;
        }
        Ok(self.finish())
    }

    /// Emits the build-wide summary. The caller invokes this exactly once,
    /// after the last module's analysis has returned.
    pub fn finish(&self) -> BuildSummary {
        let summary = BuildSummary {
            total_lib_years: self.totals.total_lib_years(),
            oldest_module: self.totals.oldest_module(),
            oldest_dependency: self.totals.oldest_dependency(),
        };

        info!(
            "The build is {:.2} libyears behind in total",
            summary.total_lib_years
        );
        if let Some((module, lib_years)) = &summary.oldest_module {
            info!("The oldest module is {} ({:.2} libyears)", module, lib_years);
        }
        if let Some((coordinate, lib_years)) = &summary.oldest_dependency {
            info!(
                "The oldest dependency is {} ({:.2} libyears)",
                coordinate, lib_years
            );
        }

        summary
    }

    /// Clears the cache and every counter so the session can serve another
    /// independent build within the same process.
    pub fn reset(&self) {
        self.resolver.cache().clear();
        self.totals.reset();
    }
}
