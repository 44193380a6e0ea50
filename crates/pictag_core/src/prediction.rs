//! Prediction records and endpoint response decoding.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::ClientError;

/// One classification result as returned by the endpoint.
///
/// Missing text fields render as empty strings and a numeric string is
/// accepted for `confidence`, so one sloppy record does not sink the whole
/// response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    #[serde(default)]
    pub label: String,
    /// Percentage in 0-100. Not validated; rendered as given.
    #[serde(default, deserialize_with = "loose_number")]
    pub confidence: f64,
    #[serde(default)]
    pub emoji: String,
}

impl PredictionRecord {
    pub fn new(label: impl Into<String>, confidence: f64, emoji: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            confidence,
            emoji: emoji.into(),
        }
    }
}

/// How an analysis request ended.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    /// Endpoint reported success with these predictions, in display order
    Success(Vec<PredictionRecord>),
    /// Endpoint answered but reported failure, with its message if it gave one
    Rejected(Option<String>),
    /// Network failure or unreadable response
    Failed(String),
}

impl AnalysisOutcome {
    /// Turn a raw response body (or the error that prevented getting one)
    /// into an outcome. The HTTP status is deliberately not consulted.
    pub fn from_body(body: Result<String, ClientError>) -> Self {
        match body.and_then(|text| decode_response(&text)) {
            Ok(outcome) => outcome,
            Err(e) => {
                log::error!("Analysis request failed: {}", e);
                AnalysisOutcome::Failed(e.to_string())
            }
        }
    }
}

/// Decode a response body of the form
/// `{ "success": bool, "predictions": [...], "error": "..." }`.
///
/// `success` and `error` follow loose truthiness, since the endpoint is free to
/// omit them. A truthy `success` without a readable `predictions` list is an
/// error, not an empty result.
pub fn decode_response(body: &str) -> Result<AnalysisOutcome, ClientError> {
    let value: Value = serde_json::from_str(body)?;

    if is_truthy(value.get("success")) {
        let predictions = value
            .get("predictions")
            .cloned()
            .unwrap_or(Value::Null);
        let predictions: Vec<PredictionRecord> = serde_json::from_value(predictions)?;
        return Ok(AnalysisOutcome::Success(predictions));
    }

    let error = match value.get("error") {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(other) if is_truthy(Some(other)) => Some(other.to_string()),
        _ => None,
    };
    Ok(AnalysisOutcome::Rejected(error))
}

/// Accept a JSON number, a numeric string or null (as 0).
fn loose_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| serde::de::Error::custom("confidence out of range")),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| serde::de::Error::custom(format!("invalid confidence {:?}", s))),
        Value::Null => Ok(0.0),
        other => Err(serde::de::Error::custom(format!(
            "invalid confidence {}",
            other
        ))),
    }
}

fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_keeps_order() {
        let body = r#"{"success":true,"predictions":[
            {"label":"Cat","confidence":97,"emoji":"🐱"},
            {"label":"Dog","confidence":3,"emoji":"🐶"}]}"#;
        let outcome = decode_response(body).unwrap();
        assert_eq!(
            outcome,
            AnalysisOutcome::Success(vec![
                PredictionRecord::new("Cat", 97.0, "🐱"),
                PredictionRecord::new("Dog", 3.0, "🐶"),
            ])
        );
    }

    #[test]
    fn test_missing_text_fields_default_to_empty() {
        let body = r#"{"success":true,"predictions":[{"label":"Cat","confidence":97}]}"#;
        assert_eq!(
            decode_response(body).unwrap(),
            AnalysisOutcome::Success(vec![PredictionRecord::new("Cat", 97.0, "")])
        );
    }

    #[test]
    fn test_string_confidence_is_parsed() {
        let body = r#"{"success":true,"predictions":[
            {"label":"Cat","confidence":"97","emoji":"🐱"},
            {"label":"Dog","confidence":" 2.5 ","emoji":"🐶"}]}"#;
        assert_eq!(
            decode_response(body).unwrap(),
            AnalysisOutcome::Success(vec![
                PredictionRecord::new("Cat", 97.0, "🐱"),
                PredictionRecord::new("Dog", 2.5, "🐶"),
            ])
        );
    }

    #[test]
    fn test_unparseable_confidence_fails() {
        let body = r#"{"success":true,"predictions":[{"label":"Cat","confidence":"high"}]}"#;
        assert!(decode_response(body).is_err());
    }

    #[test]
    fn test_rejected_with_message() {
        let outcome = decode_response(r#"{"success":false,"error":"No file provided"}"#).unwrap();
        assert_eq!(
            outcome,
            AnalysisOutcome::Rejected(Some("No file provided".to_string()))
        );
    }

    #[test]
    fn test_missing_success_is_rejection() {
        // Server error responses carry only an error field.
        let outcome = decode_response(r#"{"error":"Invalid file type"}"#).unwrap();
        assert_eq!(
            outcome,
            AnalysisOutcome::Rejected(Some("Invalid file type".to_string()))
        );
        assert_eq!(decode_response("{}").unwrap(), AnalysisOutcome::Rejected(None));
    }

    #[test]
    fn test_empty_error_falls_back() {
        let outcome = decode_response(r#"{"success":false,"error":""}"#).unwrap();
        assert_eq!(outcome, AnalysisOutcome::Rejected(None));
    }

    #[test]
    fn test_truthy_success_values() {
        let body = r#"{"success":1,"predictions":[]}"#;
        assert_eq!(decode_response(body).unwrap(), AnalysisOutcome::Success(vec![]));
        let body = r#"{"success":0}"#;
        assert_eq!(decode_response(body).unwrap(), AnalysisOutcome::Rejected(None));
    }

    #[test]
    fn test_success_without_predictions_fails() {
        assert!(decode_response(r#"{"success":true}"#).is_err());
        let outcome = AnalysisOutcome::from_body(Ok(r#"{"success":true}"#.to_string()));
        assert!(matches!(outcome, AnalysisOutcome::Failed(_)));
    }

    #[test]
    fn test_malformed_json_fails() {
        let outcome = AnalysisOutcome::from_body(Ok("<html>502 Bad Gateway</html>".to_string()));
        assert!(matches!(outcome, AnalysisOutcome::Failed(_)));
    }

    #[test]
    fn test_transport_error_fails() {
        let outcome = AnalysisOutcome::from_body(Err(ClientError::transport("offline")));
        assert_eq!(
            outcome,
            AnalysisOutcome::Failed("Transport error: offline".to_string())
        );
    }
}
