//! Topic operations for order notifications
//!
//! This module provides the publishing seam used by the notification relay and its
//! AWS SNS implementation.

#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    dead_code
)]

/// Error types for topic operations
pub mod error;
/// `LocalStack` topic fixtures for integration tests
#[cfg(feature = "test-utils")]
pub mod localstack;
/// SNS topic publisher
pub mod sns_topic;
/// Common types for topic operations
pub mod types;

pub use error::{TopicError, TopicResult};
pub use sns_topic::SnsTopic;
pub use types::TopicConfig;

/// Publish-capable message bus
#[async_trait::async_trait]
pub trait TopicPublisher: Send + Sync {
    /// Publishes `message` to the topic identified by `topic_arn`
    ///
    /// # Returns
    ///
    /// The message ID assigned by the transport, or an empty string if none was returned
    ///
    /// # Errors
    ///
    /// Returns `TopicError` if the message could not be published
    async fn publish(&self, topic_arn: &str, message: &str) -> TopicResult<String>;
}

/// In-memory publisher for tests
#[cfg(any(test, feature = "test-utils"))]
pub mod mock {
    use std::sync::Mutex;

    use aws_sdk_sns::error::SdkError;
    use aws_sdk_sns::operation::publish::PublishError;
    use aws_sdk_sns::types::error::NotFoundException;
    use aws_smithy_runtime_api::http::{Response, StatusCode};
    use aws_smithy_types::body::SdkBody;

    use super::{TopicError, TopicPublisher, TopicResult};

    /// A message captured by [`RecordingPublisher`]
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct PublishedMessage {
        /// Topic the message was published to
        pub topic_arn: String,
        /// Message text
        pub message: String,
    }

    /// Records every publish call, optionally failing them
    #[derive(Debug, Default)]
    pub struct RecordingPublisher {
        published: Mutex<Vec<PublishedMessage>>,
        attempts: Mutex<usize>,
        failure: Option<String>,
    }

    impl RecordingPublisher {
        /// Creates a publisher that accepts every message
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Creates a publisher that fails every message the way SNS reports a missing topic,
        /// with `reason` as the service message
        #[must_use]
        pub fn failing(reason: &str) -> Self {
            Self {
                failure: Some(reason.to_string()),
                ..Self::default()
            }
        }

        /// Messages accepted so far
        ///
        /// # Panics
        ///
        /// Panics if the internal lock is poisoned
        #[must_use]
        pub fn published(&self) -> Vec<PublishedMessage> {
            self.published.lock().expect("lock poisoned").clone()
        }

        /// Number of publish calls, successful or not
        ///
        /// # Panics
        ///
        /// Panics if the internal lock is poisoned
        #[must_use]
        pub fn attempts(&self) -> usize {
            *self.attempts.lock().expect("lock poisoned")
        }
    }

    #[async_trait::async_trait]
    impl TopicPublisher for RecordingPublisher {
        async fn publish(&self, topic_arn: &str, message: &str) -> TopicResult<String> {
            *self.attempts.lock().expect("lock poisoned") += 1;

            if let Some(reason) = &self.failure {
                return Err(not_found(reason));
            }

            let mut published = self.published.lock().expect("lock poisoned");
            published.push(PublishedMessage {
                topic_arn: topic_arn.to_string(),
                message: message.to_string(),
            });

            Ok(format!("mock-message-{}", published.len()))
        }
    }

    /// A `NotFoundException` service error as returned by the SNS client
    fn not_found(reason: &str) -> TopicError {
        let raw = Response::new(
            StatusCode::try_from(404).expect("valid status code"),
            SdkBody::empty(),
        );
        let err = PublishError::NotFoundException(
            NotFoundException::builder().message(reason).build(),
        );

        TopicError::Publish(SdkError::service_error(err, raw))
    }

}
