pub mod http;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::models::TimeSlot;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),

    #[error("malformed availability response: {0}")]
    MalformedResponse(String),
}

/// Source of a tutor's free slots for one date.
#[async_trait]
pub trait SlotFetcher: Send + Sync {
    async fn fetch_slots(&self, tutor_id: i64, date: NaiveDate) -> Result<Vec<TimeSlot>, FetchError>;
}

/// Decodes an availability payload.
///
/// A missing `available_times` key is malformed; `null` or `[]` means the
/// tutor has no free time that day.
pub fn parse_available_times(body: &str) -> Result<Vec<TimeSlot>, FetchError> {
    let data: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| FetchError::MalformedResponse(format!("invalid JSON: {e}")))?;

    let times = data
        .get("available_times")
        .ok_or_else(|| FetchError::MalformedResponse("missing available_times".to_string()))?;

    if times.is_null() {
        return Ok(vec![]);
    }

    serde_json::from_value(times.clone())
        .map_err(|e| FetchError::MalformedResponse(format!("invalid available_times: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_slots() {
        let slots = parse_available_times(
            r#"{"available_times":[{"start":"09:00","end":"10:00"},{"start":"14:00","end":"15:30"}]}"#,
        )
        .unwrap();
        assert_eq!(slots.len(), 2);
        assert_eq!(slots[1].end().to_string(), "15:30");
    }

    #[test]
    fn test_empty_and_null_are_no_availability() {
        assert!(parse_available_times(r#"{"available_times":[]}"#).unwrap().is_empty());
        assert!(parse_available_times(r#"{"available_times":null}"#).unwrap().is_empty());
    }

    #[test]
    fn test_missing_key_is_malformed() {
        let err = parse_available_times(r#"{"error":"Missing parameters"}"#).unwrap_err();
        assert!(matches!(err, FetchError::MalformedResponse(_)));
    }

    #[test]
    fn test_bad_shapes_are_malformed() {
        for body in [
            "not json",
            r#"["09:00"]"#,
            r#"{"available_times":"09:00"}"#,
            r#"{"available_times":[{"start":"9am","end":"10:00"}]}"#,
            r#"{"available_times":[{"start":"11:00","end":"10:00"}]}"#,
        ] {
            assert!(
                matches!(parse_available_times(body), Err(FetchError::MalformedResponse(_))),
                "{body} should be malformed"
            );
        }
    }
}
