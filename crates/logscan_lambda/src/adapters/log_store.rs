use logscan_core::contract::{LogEventRecord, LogGroupDescriptor, LogStreamDescriptor};

/// Read-only view of the per-region logging service. All three queries
/// are single calls; the stream and event lookups are limit-1 by
/// contract, so only the newest entry is ever visible.
pub trait LogStore {
    fn list_log_groups(
        &self,
        region: &str,
        name_prefix: &str,
    ) -> Result<Vec<LogGroupDescriptor>, String>;

    /// The stream with the most recent last-event time, or `None` for an
    /// empty log group.
    fn latest_stream(
        &self,
        region: &str,
        log_group_name: &str,
    ) -> Result<Option<LogStreamDescriptor>, String>;

    /// The single most recent event in the stream, or `None` for an
    /// empty stream.
    fn latest_event(
        &self,
        region: &str,
        log_group_name: &str,
        log_stream_name: &str,
    ) -> Result<Option<LogEventRecord>, String>;
}
