use serde::{Deserialize, Serialize};

use super::error::RelayError;

/// Body returned when a status payload lacks an order id or status
pub const MISSING_FIELDS_BODY: &str = "Missing \"id\" or \"status\" in message";
/// Body returned after a successful publish
pub const NOTIFICATION_SENT_BODY: &str = "Notification sent";

/// Response returned for every relay invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayResult {
    /// HTTP-style status code: 200, 400 or 500
    pub status_code: u16,
    /// Human-readable outcome
    pub body: String,
}

impl RelayResult {
    /// The notification was published
    #[must_use]
    pub fn ok() -> Self {
        Self {
            status_code: 200,
            body: NOTIFICATION_SENT_BODY.to_string(),
        }
    }

    /// The payload failed validation; nothing was published
    #[must_use]
    pub fn missing_fields() -> Self {
        Self {
            status_code: 400,
            body: MISSING_FIELDS_BODY.to_string(),
        }
    }
}

impl From<RelayError> for RelayResult {
    fn from(err: RelayError) -> Self {
        Self {
            status_code: 500,
            body: format!("Error: {err}"),
        }
    }
}
