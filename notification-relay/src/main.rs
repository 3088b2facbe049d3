use std::sync::Arc;

use aws_sdk_sns::Client as SnsClient;
use lambda_runtime::{service_fn, LambdaEvent};
use serde_json::Value;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use notification_relay::relay::{Relay, RelayResult};
use notification_relay::types::{Environment, LogFormat};
use order_topics::topic::SnsTopic;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let environment = Environment::from_env();

    // CloudWatch timestamps every line, so JSON output omits its own
    match environment.log_format() {
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(EnvFilter::from_default_env())
                .without_time()
                .init();
        }
        LogFormat::Pretty => {
            fmt().with_env_filter(EnvFilter::from_default_env()).init();
        }
    }

    info!(
        "Starting order status notification relay in {:?} environment",
        environment
    );

    let sns_client = Arc::new(SnsClient::from_conf(environment.sns_client_config().await));
    let relay = Relay::new(
        Arc::new(SnsTopic::new(sns_client)),
        environment.topic_config(),
    );

    let relay = &relay;
    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
        Ok::<RelayResult, lambda_runtime::Error>(relay.handle(event.payload).await)
    }))
    .await
    .map_err(|e| anyhow::anyhow!(e))
}
