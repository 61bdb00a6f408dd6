//! Shared log-scan domain primitives.
//!
//! This crate owns the scan configuration contract, keyword matching, and
//! notification report formatting. It intentionally excludes AWS SDK and
//! Lambda runtime concerns.

pub mod contract;
pub mod matcher;
pub mod report;
