use crate::contract::{LogEventRecord, LogMatch};

/// Keywords treated as evidence of a failed invocation. Matching is
/// case-insensitive substring containment, so "errorless" matches
/// "error" — a documented precision limitation.
pub const ERROR_KEYWORDS: [&str; 2] = ["error", "exception"];

pub fn message_matches(message: &str) -> bool {
    let normalized = message.to_lowercase();
    ERROR_KEYWORDS
        .iter()
        .any(|keyword| normalized.contains(keyword))
}

/// Tests one event against the keyword set and, on a hit, records a
/// match carrying the original message text.
pub fn match_event(source_name: &str, event: &LogEventRecord) -> Option<LogMatch> {
    if !message_matches(&event.message) {
        return None;
    }

    Some(LogMatch {
        source_name: source_name.to_string(),
        timestamp_ms: event.timestamp_ms,
        message: event.message.clone(),
    })
}
