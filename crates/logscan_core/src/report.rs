use chrono::{DateTime, Local, Utc};

use crate::contract::LogMatch;

pub const NOTIFICATION_SUBJECT: &str = "Lambda Errors/Exceptions Notification";
pub const REPORT_HEADER: &str = "Errors/Exceptions found in the following Lambda functions:";

/// Renders an epoch-millisecond event timestamp as a local-time ISO-style
/// string. Timestamps outside the representable range fall back to a raw
/// rendering rather than aborting the report.
pub fn format_event_timestamp(timestamp_ms: i64) -> String {
    match DateTime::<Utc>::from_timestamp_millis(timestamp_ms) {
        Some(instant) => instant
            .with_timezone(&Local)
            .format("%Y-%m-%dT%H:%M:%S%.3f")
            .to_string(),
        None => format!("epoch-ms:{timestamp_ms}"),
    }
}

/// Builds the aggregated notification body: the fixed header line, then
/// one `Lambda:`/`Time:`/`Message:` block per match, blocks separated by
/// blank lines. Matches appear in enumeration order, never time-sorted.
pub fn build_notification_message(matches: &[LogMatch]) -> String {
    let mut message = format!("{REPORT_HEADER}\n");
    for found in matches {
        message.push_str(&format!(
            "Lambda: {}\nTime: {}\nMessage: {}\n\n",
            found.source_name,
            format_event_timestamp(found.timestamp_ms),
            found.message
        ));
    }
    message
}

/// Success body returned to the invoker, with the number of matches
/// found during the pass.
pub fn invocation_body(match_count: usize) -> String {
    format!("{match_count} errors/exceptions found and reported.")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_match(source: &str, timestamp_ms: i64, message: &str) -> LogMatch {
        LogMatch {
            source_name: source.to_string(),
            timestamp_ms,
            message: message.to_string(),
        }
    }

    #[test]
    fn formats_timestamps_as_iso_style_local_time() {
        let rendered = format_event_timestamp(1_700_000_000_000);

        // Exact wall-clock digits depend on the local timezone; the shape
        // does not.
        assert_eq!(rendered.len(), "2023-11-14T22:13:20.000".len());
        assert_eq!(&rendered[4..5], "-");
        assert_eq!(&rendered[10..11], "T");
        assert_eq!(&rendered[19..20], ".");
    }

    #[test]
    fn out_of_range_timestamps_fall_back_to_raw_rendering() {
        assert_eq!(
            format_event_timestamp(i64::MAX),
            format!("epoch-ms:{}", i64::MAX)
        );
    }

    #[test]
    fn builds_report_with_header_and_one_block_per_match() {
        let matches = vec![
            sample_match("/aws/lambda/orders", 1_700_000_000_000, "ERROR: boom"),
            sample_match("/aws/lambda/billing", 1_700_000_060_000, "timeout exception"),
        ];

        let expected = format!(
            "{REPORT_HEADER}\n\
             Lambda: /aws/lambda/orders\nTime: {}\nMessage: ERROR: boom\n\n\
             Lambda: /aws/lambda/billing\nTime: {}\nMessage: timeout exception\n\n",
            format_event_timestamp(1_700_000_000_000),
            format_event_timestamp(1_700_000_060_000),
        );
        assert_eq!(build_notification_message(&matches), expected);
    }

    #[test]
    fn empty_match_list_yields_header_only() {
        assert_eq!(
            build_notification_message(&[]),
            format!("{REPORT_HEADER}\n")
        );
    }

    #[test]
    fn invocation_body_reports_match_count() {
        assert_eq!(invocation_body(0), "0 errors/exceptions found and reported.");
        assert_eq!(invocation_body(3), "3 errors/exceptions found and reported.");
    }
}
