use order_topics::topic::TopicError;
use thiserror::Error;

/// Processing failures of a relay invocation
///
/// Every variant is reported to the caller as a 500 with its display text.
#[derive(Error, Debug)]
pub enum RelayError {
    /// The trigger event or decoded message does not have the expected shape
    #[error("Malformed event: {0}")]
    Shape(String),

    /// The nested SNS message is not valid JSON
    #[error("Failed to parse message: {0}")]
    Parse(#[from] serde_json::Error),

    /// The outbound publish failed
    #[error("{0}")]
    Publish(#[from] TopicError),
}
