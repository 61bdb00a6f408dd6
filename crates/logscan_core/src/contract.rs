use serde::{Deserialize, Serialize};

/// Naming prefix shared by every Lambda function log group.
pub const LAMBDA_LOG_GROUP_PREFIX: &str = "/aws/lambda/";

/// Immutable configuration for one scan invocation, built once at the
/// entry boundary and passed down. Inner logic never reads the process
/// environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    pub regions: Vec<String>,
    pub sns_topic_arn: String,
    pub self_log_group_name: String,
}

impl ScanConfig {
    /// Builds a validated config from the raw `REGIONS` value, the SNS
    /// topic ARN, and the invoked function's own name.
    pub fn from_parts(
        regions_csv: &str,
        sns_topic_arn: &str,
        function_name: &str,
    ) -> Result<Self, ConfigurationError> {
        let mut regions = Vec::new();
        for entry in regions_csv.split(',') {
            let region = entry.trim();
            if region.is_empty() {
                return Err(ConfigurationError::new(
                    "REGIONS must be a comma-separated list of non-empty region identifiers",
                ));
            }
            regions.push(region.to_string());
        }

        let sns_topic_arn = sns_topic_arn.trim();
        if sns_topic_arn.is_empty() {
            return Err(ConfigurationError::new("SNS_TOPIC_ARN cannot be empty"));
        }

        let function_name = function_name.trim();
        if function_name.is_empty() {
            return Err(ConfigurationError::new(
                "the invoking function name cannot be empty",
            ));
        }

        Ok(Self {
            regions,
            sns_topic_arn: sns_topic_arn.to_string(),
            self_log_group_name: format!("{LAMBDA_LOG_GROUP_PREFIX}{function_name}"),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogGroupDescriptor {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogStreamDescriptor {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogEventRecord {
    pub timestamp_ms: i64,
    pub message: String,
}

/// One matched log event. Carries the original (non-lowercased) message
/// and the log-group name it came from. Held in memory only for the
/// duration of one invocation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogMatch {
    pub source_name: String,
    pub timestamp_ms: i64,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigurationError {
    message: String,
}

impl ConfigurationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ConfigurationError {}
