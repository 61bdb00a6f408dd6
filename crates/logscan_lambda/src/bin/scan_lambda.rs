use aws_sdk_cloudwatchlogs::config::Region;
use aws_sdk_cloudwatchlogs::types::OrderBy;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use logscan_core::contract::{
    LogEventRecord, LogGroupDescriptor, LogStreamDescriptor, ScanConfig,
};
use logscan_lambda::adapters::log_store::LogStore;
use logscan_lambda::adapters::notifier::Notifier;
use logscan_lambda::handlers::scan::{handle_scan_event, ScanResponse};
use serde_json::Value;

struct CloudWatchLogStore {
    sdk_config: aws_config::SdkConfig,
}

impl CloudWatchLogStore {
    fn client_for_region(&self, region: &str) -> aws_sdk_cloudwatchlogs::Client {
        let config = aws_sdk_cloudwatchlogs::config::Builder::from(&self.sdk_config)
            .region(Region::new(region.to_string()))
            .build();
        aws_sdk_cloudwatchlogs::Client::from_conf(config)
    }
}

impl LogStore for CloudWatchLogStore {
    fn list_log_groups(
        &self,
        region: &str,
        name_prefix: &str,
    ) -> Result<Vec<LogGroupDescriptor>, String> {
        let client = self.client_for_region(region);
        let name_prefix = name_prefix.to_string();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                let output = client
                    .describe_log_groups()
                    .log_group_name_prefix(name_prefix)
                    .send()
                    .await
                    .map_err(|error| format!("failed to describe log groups: {error}"))?;

                Ok(output
                    .log_groups()
                    .iter()
                    .filter_map(|log_group| {
                        log_group.log_group_name().map(|name| LogGroupDescriptor {
                            name: name.to_string(),
                        })
                    })
                    .collect())
            })
        })
    }

    fn latest_stream(
        &self,
        region: &str,
        log_group_name: &str,
    ) -> Result<Option<LogStreamDescriptor>, String> {
        let client = self.client_for_region(region);
        let log_group_name = log_group_name.to_string();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                let output = client
                    .describe_log_streams()
                    .log_group_name(log_group_name)
                    .order_by(OrderBy::LastEventTime)
                    .descending(true)
                    .limit(1)
                    .send()
                    .await
                    .map_err(|error| format!("failed to describe log streams: {error}"))?;

                Ok(output.log_streams().iter().find_map(|log_stream| {
                    log_stream.log_stream_name().map(|name| LogStreamDescriptor {
                        name: name.to_string(),
                    })
                }))
            })
        })
    }

    fn latest_event(
        &self,
        region: &str,
        log_group_name: &str,
        log_stream_name: &str,
    ) -> Result<Option<LogEventRecord>, String> {
        let client = self.client_for_region(region);
        let log_group_name = log_group_name.to_string();
        let log_stream_name = log_stream_name.to_string();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                let output = client
                    .get_log_events()
                    .log_group_name(log_group_name)
                    .log_stream_name(log_stream_name)
                    .limit(1)
                    .send()
                    .await
                    .map_err(|error| format!("failed to fetch log events: {error}"))?;

                Ok(output.events().iter().find_map(|event| {
                    let timestamp_ms = event.timestamp()?;
                    let message = event.message()?;
                    Some(LogEventRecord {
                        timestamp_ms,
                        message: message.to_string(),
                    })
                }))
            })
        })
    }
}

struct SnsNotifier {
    sns_client: aws_sdk_sns::Client,
}

impl Notifier for SnsNotifier {
    fn publish(&self, topic_arn: &str, subject: &str, message: &str) -> Result<(), String> {
        let client = self.sns_client.clone();
        let topic_arn = topic_arn.to_string();
        let subject = subject.to_string();
        let message = message.to_string();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .publish()
                    .topic_arn(topic_arn)
                    .subject(subject)
                    .message(message)
                    .send()
                    .await
                    .map(|_| ())
                    .map_err(|error| format!("failed to publish to sns: {error}"))
            })
        })
    }
}

async fn handle_request(event: LambdaEvent<Value>) -> Result<ScanResponse, Error> {
    // The event payload itself is opaque; only the context identity and
    // the environment drive the scan.
    let regions = std::env::var("REGIONS").map_err(|_| Error::from("REGIONS must be configured"))?;
    let sns_topic_arn =
        std::env::var("SNS_TOPIC_ARN").map_err(|_| Error::from("SNS_TOPIC_ARN must be configured"))?;

    let config = ScanConfig::from_parts(
        &regions,
        &sns_topic_arn,
        &event.context.env_config.function_name,
    )
    .map_err(|error| Error::from(error.message().to_string()))?;

    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let log_store = CloudWatchLogStore {
        sdk_config: aws_config.clone(),
    };
    let notifier = SnsNotifier {
        sns_client: aws_sdk_sns::Client::new(&aws_config),
    };

    handle_scan_event(&config, &log_store, &notifier).map_err(|error| Error::from(error.message))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    lambda_runtime::run(service_fn(handle_request)).await
}
