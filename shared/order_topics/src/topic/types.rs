/// Configuration for topic operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicConfig {
    /// ARN of the outbound topic
    pub topic_arn: String,
}

impl TopicConfig {
    /// Creates a topic configuration for `topic_arn`
    #[must_use]
    pub fn new(topic_arn: impl Into<String>) -> Self {
        Self {
            topic_arn: topic_arn.into(),
        }
    }
}
