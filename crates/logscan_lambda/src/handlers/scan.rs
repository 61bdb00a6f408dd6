use std::time::Instant;

use serde::{Deserialize, Serialize};
use serde_json::json;

use logscan_core::contract::{ScanConfig, LAMBDA_LOG_GROUP_PREFIX};
use logscan_core::matcher::match_event;
use logscan_core::report::{build_notification_message, invocation_body, NOTIFICATION_SUBJECT};

use crate::adapters::log_store::LogStore;
use crate::adapters::notifier::Notifier;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScanResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

/// Any failure from the logging or notification service. No distinction
/// is made between transient and permanent causes; the first one aborts
/// the invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanError {
    pub message: String,
}

impl std::fmt::Display for ScanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ScanError {}

/// One full scan pass: regions in configured order, log groups in
/// listing order, one stream and one event per group. The caller's own
/// log group is excluded by exact name equality. Matches are aggregated
/// into at most one notification publish; empty log groups and streams
/// are skipped silently; any service failure propagates immediately
/// with no partial-region completion.
pub fn handle_scan_event(
    config: &ScanConfig,
    log_store: &dyn LogStore,
    notifier: &dyn Notifier,
) -> Result<ScanResponse, ScanError> {
    let started_at = Instant::now();
    log_scan_info(
        "scan_started",
        json!({
            "regions": config.regions,
            "self_log_group": config.self_log_group_name,
        }),
    );

    let mut matches = Vec::new();

    for region in &config.regions {
        let log_groups = log_store
            .list_log_groups(region, LAMBDA_LOG_GROUP_PREFIX)
            .map_err(|error| {
                scan_failure(format!("Failed to list log groups in {region}: {error}"))
            })?;

        for log_group in log_groups {
            if log_group.name == config.self_log_group_name {
                continue;
            }

            let Some(stream) = log_store
                .latest_stream(region, &log_group.name)
                .map_err(|error| {
                    scan_failure(format!(
                        "Failed to list log streams for {} in {region}: {error}",
                        log_group.name
                    ))
                })?
            else {
                continue;
            };

            let Some(event) = log_store
                .latest_event(region, &log_group.name, &stream.name)
                .map_err(|error| {
                    scan_failure(format!(
                        "Failed to fetch log events for {} in {region}: {error}",
                        log_group.name
                    ))
                })?
            else {
                continue;
            };

            if let Some(found) = match_event(&log_group.name, &event) {
                log_scan_info(
                    "match_found",
                    json!({
                        "region": region,
                        "log_group": found.source_name,
                        "timestamp_ms": found.timestamp_ms,
                    }),
                );
                matches.push(found);
            }
        }
    }

    if !matches.is_empty() {
        let message = build_notification_message(&matches);
        notifier
            .publish(&config.sns_topic_arn, NOTIFICATION_SUBJECT, &message)
            .map_err(|error| scan_failure(format!("Failed to publish notification: {error}")))?;
        log_scan_info(
            "notification_published",
            json!({
                "topic_arn": config.sns_topic_arn,
                "matches_reported": matches.len(),
            }),
        );
    }

    log_scan_info(
        "scan_completed",
        json!({
            "matches_found": matches.len(),
            "duration_ms": started_at.elapsed().as_millis(),
        }),
    );

    Ok(ScanResponse {
        status_code: 200,
        body: invocation_body(matches.len()),
    })
}

fn scan_failure(message: String) -> ScanError {
    log_scan_error("scan_failed", json!({ "error": message.clone() }));
    ScanError { message }
}

fn log_scan_info(event: &str, details: serde_json::Value) {
    eprintln!(
        "{}",
        json!({
            "component": "scan_handler",
            "event": event,
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "details": details,
        })
    );
}

fn log_scan_error(event: &str, details: serde_json::Value) {
    eprintln!(
        "{}",
        json!({
            "component": "scan_handler",
            "level": "error",
            "event": event,
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "details": details,
        })
    );
}
