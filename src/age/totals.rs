//! Build-session aggregation of dependency and module ages

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::age::detect::WEEKS_PER_YEAR;
use crate::age::types::AgedUpdate;

/// Running totals for one build session.
///
/// Mutated by every module's analysis pass, possibly from concurrent tasks
/// in a parallel build. Each mutation is a single short-lived lock or an
/// atomic increment; nothing is held across network calls.
#[derive(Debug, Default)]
pub struct SessionTotals {
    /// Total libyears per module, one entry per analyzed module.
    module_ages: Mutex<HashMap<String, f32>>,
    /// Largest age observed per coordinate. A dependency may appear with
    /// different effective versions in different modules; only the worst
    /// one is kept.
    dependency_ages: Mutex<HashMap<String, f32>>,
    /// Build-wide age, kept in whole weeks for precision and converted to
    /// years at display time.
    lib_weeks: AtomicI64,
}

impl SessionTotals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one aged update into the build-wide counters.
    pub fn record_update(&self, update: &AgedUpdate) {
        self.lib_weeks.fetch_add(update.lib_weeks, Ordering::Relaxed);

        let key = update.coordinate.to_string();
        let mut ages = self.dependency_ages.lock().unwrap_or_else(|p| p.into_inner());
        let entry = ages.entry(key).or_insert(0.0);
        if *entry < update.lib_years {
            *entry = update.lib_years;
        }
    }

    /// Records the final total for one module.
    pub fn record_module(&self, module: &str, lib_years: f32) {
        self.module_ages
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .insert(module.to_string(), lib_years);
    }

    /// Build-wide total in fractional libyears.
    pub fn total_lib_years(&self) -> f32 {
        self.lib_weeks.load(Ordering::Relaxed) as f32 / WEEKS_PER_YEAR
    }

    /// The module with the highest total, ties broken alphabetically.
    pub fn oldest_module(&self) -> Option<(String, f32)> {
        Self::oldest_entry(&self.module_ages.lock().unwrap_or_else(|p| p.into_inner()))
    }

    /// The coordinate with the highest observed age, ties broken
    /// alphabetically.
    pub fn oldest_dependency(&self) -> Option<(String, f32)> {
        Self::oldest_entry(&self.dependency_ages.lock().unwrap_or_else(|p| p.into_inner()))
    }

    fn oldest_entry(ages: &HashMap<String, f32>) -> Option<(String, f32)> {
        ages.iter()
            .max_by(|(name_a, age_a), (name_b, age_b)| {
                age_a
                    .total_cmp(age_b)
                    .then_with(|| name_b.cmp(name_a))
            })
            .map(|(name, age)| (name.clone(), *age))
    }

    /// Zeroes every counter for reuse within a long-lived process.
    pub fn reset(&self) {
        self.lib_weeks.store(0, Ordering::Relaxed);
        self.module_ages
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .clear();
        self.dependency_ages
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .clear();
    }
}
