//! Dependency age analysis layer
//!
//! This module turns the external version resolver's (current, latest)
//! version pairs into libyear scores: release dates are looked up against
//! the registry search API, cached for the build session, aggregated per
//! dependency, module and build, and rendered with threshold enforcement.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Registry  │────▶│    Cache    │◀────│   Detector  │
//! │  (fetch)    │     │ (resolver)  │     │   (age)     │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                                                │
//!                                                ▼
//!                     ┌─────────────┐     ┌─────────────┐
//!                     │   Session   │────▶│   Totals /  │
//!                     │(orchestrate)│     │   Report    │
//!                     └─────────────┘     └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`cache`]: in-memory release-date cache shared across one build session
//! - [`detect`]: update evaluation, libweek/libyear arithmetic
//! - [`error`]: error types for registry lookups and analysis outcomes
//! - [`maven`]: Maven Central search client with bounded timeout and retries
//! - [`registry`]: source trait for release-date lookups
//! - [`report`]: dot-padded output lines and CSV report records
//! - [`resolver`]: cache-through release-date resolution
//! - [`session`]: build-session orchestration and summary
//! - [`totals`]: per-module, per-dependency and build-wide aggregation
//! - [`types`]: coordinates, candidates and the resolver handoff document

pub mod cache;
pub mod detect;
pub mod error;
pub mod maven;
pub mod registry;
pub mod report;
pub mod resolver;
pub mod session;
pub mod totals;
pub mod types;
