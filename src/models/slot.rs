use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::time::TimeOfDay;

/// A contiguous interval of tutor availability. Always `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTimeSlot")]
pub struct TimeSlot {
    start: TimeOfDay,
    end: TimeOfDay,
}

#[derive(Deserialize)]
struct RawTimeSlot {
    start: TimeOfDay,
    end: TimeOfDay,
}

impl TryFrom<RawTimeSlot> for TimeSlot {
    type Error = String;

    fn try_from(raw: RawTimeSlot) -> Result<Self, Self::Error> {
        TimeSlot::new(raw.start, raw.end)
            .ok_or_else(|| format!("slot start {} is not before end {}", raw.start, raw.end))
    }
}

impl TimeSlot {
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Option<Self> {
        (start < end).then_some(Self { start, end })
    }

    pub fn start(&self) -> TimeOfDay {
        self.start
    }

    pub fn end(&self) -> TimeOfDay {
        self.end
    }

    pub fn contains(&self, other: &TimeSlot) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Half-open overlap: touching intervals do not overlap.
    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        !(self.end <= other.start || self.start >= other.end)
    }
}

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Tutor id as sent by a page: a JSON number, or the numeric string read
/// straight out of a form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TutorRef {
    Id(i64),
    Text(String),
}

impl TutorRef {
    pub fn id(&self) -> Option<i64> {
        match self {
            TutorRef::Id(id) => Some(*id),
            TutorRef::Text(text) => text.trim().parse().ok(),
        }
    }
}

/// Body of `POST /student/get_available_times`. Fields are optional so the
/// server can answer a missing one with a 400 instead of a decode error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailableTimesRequest {
    pub tutor_id: Option<TutorRef>,
    pub date: Option<String>,
}

impl AvailableTimesRequest {
    pub fn new(tutor_id: i64, date: NaiveDate) -> Self {
        Self {
            tutor_id: Some(TutorRef::Id(tutor_id)),
            date: Some(date.format(DATE_FORMAT).to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailableTimesResponse {
    pub available_times: Vec<TimeSlot>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(start: &str, end: &str) -> TimeSlot {
        TimeSlot::new(start.parse().unwrap(), end.parse().unwrap()).unwrap()
    }

    #[test]
    fn test_new_requires_start_before_end() {
        let nine: TimeOfDay = "09:00".parse().unwrap();
        let ten: TimeOfDay = "10:00".parse().unwrap();
        assert!(TimeSlot::new(nine, ten).is_some());
        assert!(TimeSlot::new(ten, nine).is_none());
        assert!(TimeSlot::new(nine, nine).is_none());
    }

    #[test]
    fn test_deserialize_rejects_inverted_slot() {
        let ok: TimeSlot = serde_json::from_str(r#"{"start":"09:00","end":"10:30"}"#).unwrap();
        assert_eq!(ok, slot("09:00", "10:30"));
        assert!(serde_json::from_str::<TimeSlot>(r#"{"start":"11:00","end":"10:30"}"#).is_err());
        assert!(serde_json::from_str::<TimeSlot>(r#"{"start":"11:00"}"#).is_err());
    }

    #[test]
    fn test_overlap_is_half_open() {
        let a = slot("09:00", "10:00");
        assert!(a.overlaps(&slot("09:30", "10:30")));
        assert!(a.overlaps(&slot("08:00", "11:00")));
        assert!(!a.overlaps(&slot("10:00", "11:00")));
        assert!(!a.overlaps(&slot("08:00", "09:00")));
    }

    #[test]
    fn test_contains() {
        let window = slot("09:00", "12:00");
        assert!(window.contains(&slot("09:00", "12:00")));
        assert!(window.contains(&slot("10:00", "11:30")));
        assert!(!window.contains(&slot("08:30", "10:00")));
        assert!(!window.contains(&slot("11:00", "12:30")));
    }

    #[test]
    fn test_request_wire_format() {
        let req = AvailableTimesRequest::new(7, NaiveDate::from_ymd_opt(2025, 6, 16).unwrap());
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json, serde_json::json!({"tutor_id": 7, "date": "2025-06-16"}));

        let parsed: AvailableTimesRequest = serde_json::from_str(r#"{"tutor_id":7}"#).unwrap();
        assert!(parsed.date.is_none());
    }

    #[test]
    fn test_tutor_id_accepts_number_or_string() {
        let parsed: AvailableTimesRequest =
            serde_json::from_str(r#"{"tutor_id":"12","date":"2025-06-16"}"#).unwrap();
        assert_eq!(parsed.tutor_id.and_then(|t| t.id()), Some(12));

        let parsed: AvailableTimesRequest = serde_json::from_str(r#"{"tutor_id":12}"#).unwrap();
        assert_eq!(parsed.tutor_id, Some(TutorRef::Id(12)));

        let parsed: AvailableTimesRequest = serde_json::from_str(r#"{"tutor_id":null}"#).unwrap();
        assert!(parsed.tutor_id.is_none());

        assert_eq!(TutorRef::Text("abc".to_string()).id(), None);
        assert_eq!(TutorRef::Text(" 3 ".to_string()).id(), Some(3));
    }
}
