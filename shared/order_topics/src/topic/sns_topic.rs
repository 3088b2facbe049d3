//! SNS-backed topic publisher

use std::sync::Arc;

use aws_sdk_sns::Client as SnsClient;

use crate::topic::{
    error::{TopicError, TopicResult},
    TopicPublisher,
};

/// Publishes plain-text messages to SNS topics
#[derive(Clone)]
pub struct SnsTopic {
    sns_client: Arc<SnsClient>,
}

impl SnsTopic {
    /// Creates a new SNS topic publisher
    ///
    /// # Arguments
    ///
    /// * `sns_client` - Pre-configured SNS client, shared across invocations
    #[must_use]
    pub const fn new(sns_client: Arc<SnsClient>) -> Self {
        Self { sns_client }
    }
}

#[async_trait::async_trait]
impl TopicPublisher for SnsTopic {
    async fn publish(&self, topic_arn: &str, message: &str) -> TopicResult<String> {
        if topic_arn.is_empty() {
            return Err(TopicError::MissingTopicArn);
        }

        let result = self
            .sns_client
            .publish()
            .topic_arn(topic_arn)
            .message(message)
            .send()
            .await?;

        let message_id = result
            .message_id()
            .map(std::string::ToString::to_string)
            .unwrap_or_default();

        tracing::debug!(topic_arn, message_id = %message_id, "Published message to SNS");

        Ok(message_id)
    }
}
