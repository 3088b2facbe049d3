use aws_sdk_sns::error::{DisplayErrorContext, SdkError};
use aws_sdk_sns::operation::publish::PublishError;
use thiserror::Error;

/// Result type alias for topic operations
pub type TopicResult<T> = Result<T, TopicError>;

/// Error types for topic operations
#[derive(Error, Debug)]
pub enum TopicError {
    /// Error publishing a message to SNS
    ///
    /// Displays the whole source chain, so the service error code and message are included.
    #[error("Failed to publish message to SNS: {}", DisplayErrorContext(.0))]
    Publish(#[from] SdkError<PublishError>),

    /// No outbound topic ARN was configured
    #[error("Topic ARN must not be empty")]
    MissingTopicArn,
}
