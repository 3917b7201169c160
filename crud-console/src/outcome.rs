//! Tagged result of one dispatched request.

use serde::Deserialize;

use crate::error::{ConsoleError, Result};
use crate::record::Record;

/// Shape a request expects back on success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expect {
    Record,
    Collection,
    /// Any body is accepted and discarded.
    Empty,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Empty,
    Record(Record),
    Collection(Vec<Record>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureCause {
    /// The backend could not be reached.
    Unreachable,
    /// The backend reported an application error with a message.
    Rejected,
    /// The response body was absent or not what was expected.
    Malformed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub status: Option<u16>,
    pub message: Option<String>,
    pub cause: FailureCause,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<serde_json::Value>,
}

impl Failure {
    pub fn unreachable() -> Self {
        Self {
            status: None,
            message: None,
            cause: FailureCause::Unreachable,
        }
    }

    pub fn malformed(status: Option<u16>) -> Self {
        Self {
            status,
            message: None,
            cause: FailureCause::Malformed,
        }
    }

    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            message: Some(message.into()),
            cause: FailureCause::Rejected,
        }
    }

    /// Interpret a non-2xx response body. Only a JSON object with a string
    /// `message` counts as a structured application error.
    pub fn from_error_body(status: u16, body: &str) -> Self {
        match serde_json::from_str::<ErrorBody>(body) {
            Ok(ErrorBody {
                message: Some(serde_json::Value::String(message)),
            }) => Self::rejected(status, message),
            _ => Self::malformed(Some(status)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Success(Payload),
    Failure(Failure),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }
}

/// Decode a 2xx response body into the expected payload shape.
pub fn decode_payload(expect: Expect, body: &str) -> Result<Payload> {
    if expect == Expect::Empty {
        return Ok(Payload::Empty);
    }

    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| ConsoleError::MalformedResponse(format!("invalid JSON body: {}", e)))?;

    match expect {
        Expect::Record => Record::from_value(value).map(Payload::Record),
        Expect::Collection => match value {
            serde_json::Value::Array(items) => items
                .into_iter()
                .map(Record::from_value)
                .collect::<Result<Vec<_>>>()
                .map(Payload::Collection),
            _ => Err(ConsoleError::MalformedResponse(
                "expected a JSON array of records".to_string(),
            )),
        },
        Expect::Empty => Ok(Payload::Empty),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_body_with_message_is_rejected() {
        let failure = Failure::from_error_body(404, r#"{"status": 404, "error": "Not Found", "message": "Product with id '7' was not found."}"#);
        assert_eq!(failure.cause, FailureCause::Rejected);
        assert_eq!(failure.status, Some(404));
        assert_eq!(
            failure.message.as_deref(),
            Some("Product with id '7' was not found.")
        );
    }

    #[test]
    fn test_error_body_without_message_is_malformed() {
        for body in ["", "<html>oops</html>", "{}", r#"{"message": 12}"#, "[]"] {
            let failure = Failure::from_error_body(500, body);
            assert_eq!(failure.cause, FailureCause::Malformed, "body {:?}", body);
            assert_eq!(failure.message, None);
            assert_eq!(failure.status, Some(500));
        }
    }

    #[test]
    fn test_decode_record_and_collection() {
        let payload = decode_payload(Expect::Record, r#"{"id": 1, "name": "a"}"#).unwrap();
        assert!(matches!(payload, Payload::Record(ref r) if r.len() == 2));

        let payload =
            decode_payload(Expect::Collection, r#"[{"id": 1}, {"id": 2}]"#).unwrap();
        match payload {
            Payload::Collection(records) => assert_eq!(records.len(), 2),
            other => panic!("expected collection, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_rejects_wrong_shapes() {
        assert!(decode_payload(Expect::Record, "").is_err());
        assert!(decode_payload(Expect::Record, "[]").is_err());
        assert!(decode_payload(Expect::Collection, r#"{"id": 1}"#).is_err());
        assert!(decode_payload(Expect::Collection, r#"[{"name": "no id"}]"#).is_err());
    }

    #[test]
    fn test_decode_empty_ignores_body() {
        assert_eq!(decode_payload(Expect::Empty, "").unwrap(), Payload::Empty);
        assert_eq!(
            decode_payload(Expect::Empty, "not json").unwrap(),
            Payload::Empty
        );
    }
}
