//! Order status notification relay
//!
//! Turns an SNS-triggered status change into a human-readable message on the outbound
//! topic. Every invocation yields a [`RelayResult`]; failures never escape [`Relay::handle`].

pub mod envelope;
pub mod error;
pub mod result;

use std::sync::Arc;

use order_topics::topic::{TopicConfig, TopicPublisher};
use serde_json::Value;
use tracing::{error, info, warn};

pub use envelope::{InboundEnvelope, InboundRecord, SnsNotification, StatusPayload};
pub use error::RelayError;
pub use result::RelayResult;

/// Outcome of a relay invocation that did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayOutcome {
    /// The notification was published with the given message id
    Sent {
        /// Message id assigned by the outbound topic
        message_id: String,
    },
    /// The payload lacked an id or status; nothing was published
    MissingFields,
}

/// Forwards order status changes to the outbound topic
pub struct Relay {
    publisher: Arc<dyn TopicPublisher>,
    config: TopicConfig,
}

impl Relay {
    /// Creates a relay publishing to the topic in `config`
    ///
    /// # Arguments
    ///
    /// * `publisher` - Long-lived publisher shared by all invocations
    /// * `config` - Outbound topic configuration
    #[must_use]
    pub fn new(publisher: Arc<dyn TopicPublisher>, config: TopicConfig) -> Self {
        Self { publisher, config }
    }

    /// Handles one trigger event and maps the outcome to a response
    pub async fn handle(&self, event: Value) -> RelayResult {
        match self.relay(event).await {
            Ok(RelayOutcome::Sent { message_id }) => {
                info!(
                    "Sent order status notification to {} (message id: {})",
                    self.config.topic_arn, message_id
                );
                RelayResult::ok()
            }
            Ok(RelayOutcome::MissingFields) => {
                warn!("Status payload is missing id or status, skipping notification");
                RelayResult::missing_fields()
            }
            Err(e) => {
                error!("Failed to relay order status notification: {}", e);
                RelayResult::from(e)
            }
        }
    }

    /// Decodes, validates and publishes the first record of `event`
    ///
    /// # Errors
    ///
    /// Returns `RelayError` if the event is malformed, the message is not valid JSON, or the
    /// publish fails
    pub async fn relay(&self, event: Value) -> Result<RelayOutcome, RelayError> {
        let record = InboundEnvelope::from_event(event)?.first_record()?;
        let payload = StatusPayload::parse(&record.sns.message)?;

        let Some(text) = payload.notification_text() else {
            return Ok(RelayOutcome::MissingFields);
        };

        let message_id = self
            .publisher
            .publish(&self.config.topic_arn, &text)
            .await?;

        Ok(RelayOutcome::Sent { message_id })
    }
}
