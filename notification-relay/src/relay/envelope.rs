//! Trigger envelope and status payload decoding

use serde::Deserialize;
use serde_json::Value;

use super::error::RelayError;

/// SNS trigger event delivered to the relay
///
/// Records are kept undecoded so that only the record being relayed has to be well formed.
#[derive(Debug, Deserialize)]
pub struct InboundEnvelope {
    /// Records in delivery order
    #[serde(rename = "Records")]
    pub records: Vec<Value>,
}

/// A single SNS record
#[derive(Debug, Deserialize)]
pub struct InboundRecord {
    /// SNS notification carried by the record
    #[serde(rename = "Sns")]
    pub sns: SnsNotification,
}

/// The subset of an SNS notification the relay reads
#[derive(Debug, Deserialize)]
pub struct SnsNotification {
    /// JSON-encoded [`StatusPayload`]
    #[serde(rename = "Message")]
    pub message: String,
}

impl InboundEnvelope {
    /// Decodes a raw trigger event
    ///
    /// # Errors
    ///
    /// Returns `RelayError::Shape` if the event has no `Records` list
    pub fn from_event(event: Value) -> Result<Self, RelayError> {
        serde_json::from_value(event).map_err(|e| RelayError::Shape(e.to_string()))
    }

    /// Decodes the first record; any further records are ignored
    ///
    /// # Errors
    ///
    /// Returns `RelayError::Shape` if there are no records or the first one is not an SNS record
    pub fn first_record(&self) -> Result<InboundRecord, RelayError> {
        let record = self
            .records
            .first()
            .ok_or_else(|| RelayError::Shape("envelope contains no records".to_string()))?;

        InboundRecord::deserialize(record).map_err(|e| RelayError::Shape(e.to_string()))
    }
}

/// Order status change announced on the inbound topic
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusPayload {
    /// Order identifier, `None` when absent or empty
    pub id: Option<String>,
    /// New order status, `None` when absent or empty
    pub status: Option<String>,
}

impl StatusPayload {
    /// Parses the nested SNS message
    ///
    /// # Errors
    ///
    /// Returns `RelayError::Parse` for invalid JSON and `RelayError::Shape` when the
    /// message is not a JSON object
    pub fn parse(message: &str) -> Result<Self, RelayError> {
        let Value::Object(fields) = serde_json::from_str::<Value>(message)? else {
            return Err(RelayError::Shape(
                "message is not a JSON object".to_string(),
            ));
        };

        Ok(Self {
            id: fields.get("id").and_then(present_text),
            status: fields.get("status").and_then(present_text),
        })
    }

    /// Text published for this status change, or `None` if the id or status is missing
    #[must_use]
    pub fn notification_text(&self) -> Option<String> {
        match (&self.id, &self.status) {
            (Some(id), Some(status)) => Some(format!("Order {id} status is {status}")),
            _ => None,
        }
    }
}

/// Renders a field value, treating null, false, zero and empty values as absent
#[allow(clippy::float_cmp)]
fn present_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::String(s) if s.is_empty() => None,
        Value::Array(items) if items.is_empty() => None,
        Value::Object(fields) if fields.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_first_record_ignores_the_rest() {
        let envelope = InboundEnvelope::from_event(json!({
            "Records": [
                { "Sns": { "Message": "first" } },
                { "Sns": { "Message": "second" } },
                "not even a record"
            ]
        }))
        .unwrap();

        assert_eq!(envelope.first_record().unwrap().sns.message, "first");
    }

    #[test]
    fn test_first_record_tolerates_extra_sns_attributes() {
        let envelope = InboundEnvelope::from_event(json!({
            "Records": [{
                "EventSource": "aws:sns",
                "EventVersion": "1.0",
                "Sns": {
                    "Type": "Notification",
                    "TopicArn": "arn:aws:sns:us-east-1:000000000000:OrderUpdates",
                    "Message": "{\"id\":\"abc123\",\"status\":\"shipped\"}",
                    "Timestamp": "2024-01-01T12:00:00.000Z"
                }
            }]
        }))
        .unwrap();

        let record = envelope.first_record().unwrap();
        assert_eq!(record.sns.message, "{\"id\":\"abc123\",\"status\":\"shipped\"}");
    }

    #[test]
    fn test_envelope_shape_errors() {
        let err = InboundEnvelope::from_event(json!({ "records": [] })).unwrap_err();
        assert!(matches!(err, RelayError::Shape(_)));

        let envelope = InboundEnvelope::from_event(json!({ "Records": [] })).unwrap();
        let err = envelope.first_record().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Malformed event: envelope contains no records"
        );

        let envelope = InboundEnvelope::from_event(json!({ "Records": [{ "Sns": {} }] })).unwrap();
        assert!(matches!(
            envelope.first_record().unwrap_err(),
            RelayError::Shape(_)
        ));
    }

    #[test]
    fn test_parse_payload() {
        let payload = StatusPayload::parse(r#"{"id":"abc123","status":"shipped"}"#).unwrap();

        assert_eq!(
            payload,
            StatusPayload {
                id: Some("abc123".to_string()),
                status: Some("shipped".to_string()),
            }
        );
        assert_eq!(
            payload.notification_text().as_deref(),
            Some("Order abc123 status is shipped")
        );
    }

    #[test]
    fn test_falsy_fields_are_absent() {
        for message in [
            r#"{"id":"abc123"}"#,
            r#"{"status":"shipped"}"#,
            r#"{}"#,
            r#"{"id":"","status":"shipped"}"#,
            r#"{"id":"abc123","status":null}"#,
            r#"{"id":0,"status":"shipped"}"#,
            r#"{"id":false,"status":"shipped"}"#,
            r#"{"id":"abc123","status":[]}"#,
            r#"{"id":{},"status":"shipped"}"#,
        ] {
            let payload = StatusPayload::parse(message).unwrap();
            assert_eq!(payload.notification_text(), None, "message: {message}");
        }
    }

    #[test]
    fn test_non_string_fields_render_as_json() {
        let payload = StatusPayload::parse(r#"{"id":42,"status":true}"#).unwrap();

        assert_eq!(
            payload.notification_text().as_deref(),
            Some("Order 42 status is true")
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            StatusPayload::parse("not json").unwrap_err(),
            RelayError::Parse(_)
        ));
        assert!(matches!(
            StatusPayload::parse(r#"["abc123","shipped"]"#).unwrap_err(),
            RelayError::Shape(_)
        ));
    }
}
