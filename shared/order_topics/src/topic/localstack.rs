//! Topic test setup utilities
//!
//! Creates a uniquely named SNS topic on `LocalStack` with an SQS queue subscribed to it, so
//! tests can observe exactly what was published.

#![allow(clippy::missing_panics_doc)]

use std::sync::Arc;

use aws_config::{BehaviorVersion, Region};
use aws_credential_types::Credentials;
use aws_sdk_sns::Client as SnsClient;
use aws_sdk_sqs::types::QueueAttributeName;
use aws_sdk_sqs::Client as SqsClient;
use uuid::Uuid;

/// Test configuration for `LocalStack`
const LOCALSTACK_ENDPOINT: &str = "http://localhost:4566";
const TEST_REGION: &str = "us-east-1";

/// Topic with a raw-delivery queue subscription, deleted on drop
pub struct TopicTestContext {
    /// SNS client pointed at `LocalStack`
    pub sns_client: Arc<SnsClient>,
    /// SQS client pointed at `LocalStack`
    pub sqs_client: Arc<SqsClient>,
    /// ARN of the created topic
    pub topic_arn: String,
    /// URL of the subscribed queue
    pub queue_url: String,
}

impl TopicTestContext {
    /// Creates a unique topic and a queue subscribed to it with raw message delivery
    pub async fn new(test_name: &str) -> Self {
        let name = format!("{}-{}", test_name, Uuid::new_v4());

        // Setup LocalStack client with hardcoded credentials for CI
        let credentials = Credentials::from_keys(
            "test", // AWS_ACCESS_KEY_ID
            "test", // AWS_SECRET_ACCESS_KEY
            None,   // no session token
        );

        let config = aws_config::defaults(BehaviorVersion::latest())
            .endpoint_url(LOCALSTACK_ENDPOINT)
            .region(Region::new(TEST_REGION))
            .credentials_provider(credentials)
            .load()
            .await;

        let sns_client = Arc::new(SnsClient::new(&config));
        let sqs_client = Arc::new(SqsClient::new(&config));

        let topic_arn = sns_client
            .create_topic()
            .name(&name)
            .send()
            .await
            .expect("Failed to create test topic")
            .topic_arn()
            .expect("Topic ARN not returned")
            .to_string();

        let queue_url = sqs_client
            .create_queue()
            .queue_name(&name)
            .send()
            .await
            .expect("Failed to create test queue")
            .queue_url()
            .expect("Queue URL not returned")
            .to_string();

        let queue_arn = sqs_client
            .get_queue_attributes()
            .queue_url(&queue_url)
            .attribute_names(QueueAttributeName::QueueArn)
            .send()
            .await
            .expect("Failed to get queue attributes")
            .attributes()
            .and_then(|attributes| attributes.get(&QueueAttributeName::QueueArn).cloned())
            .expect("Queue ARN not returned");

        sns_client
            .subscribe()
            .topic_arn(&topic_arn)
            .protocol("sqs")
            .endpoint(queue_arn)
            .attributes("RawMessageDelivery", "true")
            .send()
            .await
            .expect("Failed to subscribe queue to topic");

        Self {
            sns_client,
            sqs_client,
            topic_arn,
            queue_url,
        }
    }

    /// Receives the raw message bodies delivered to the subscribed queue
    pub async fn received_messages(&self) -> Vec<String> {
        let result = self
            .sqs_client
            .receive_message()
            .queue_url(&self.queue_url)
            .max_number_of_messages(10)
            .wait_time_seconds(2)
            .send()
            .await
            .expect("Failed to receive messages");

        result
            .messages()
            .iter()
            .filter_map(|msg| msg.body().map(ToString::to_string))
            .collect()
    }
}

impl Drop for TopicTestContext {
    fn drop(&mut self) {
        let sns_client = self.sns_client.clone();
        let sqs_client = self.sqs_client.clone();
        let topic_arn = self.topic_arn.clone();
        let queue_url = self.queue_url.clone();

        // Use tokio runtime to delete the topic and queue
        let handle = tokio::runtime::Handle::try_current();
        if let Ok(handle) = handle {
            handle.spawn(async move {
                let _ = sns_client.delete_topic().topic_arn(&topic_arn).send().await;
                let _ = sqs_client.delete_queue().queue_url(&queue_url).send().await;
            });
        }
    }
}
