//! libyear measures how far behind a build's dependencies are, in years.
//!
//! The [`age`] module is the analysis engine; [`config`] holds the
//! configuration surface consumed by it. The binary feeds the engine with
//! the JSON handoff produced by an external dependency-version resolver.

pub mod age;
pub mod config;
