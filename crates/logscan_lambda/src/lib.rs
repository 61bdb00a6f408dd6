//! AWS-oriented adapters and the handler for the scheduled log scan.
//!
//! This crate owns runtime integration details (the Lambda handler, the
//! CloudWatch Logs adapter, and the SNS notifier) on top of the domain
//! primitives in `logscan_core`.

pub mod adapters;
pub mod handlers;
