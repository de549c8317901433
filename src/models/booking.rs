use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::slot::DATE_FORMAT;
use super::TimeSlot;
use crate::time::TimeOfDay;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: i64,
    pub student_id: i64,
    pub tutor_id: i64,
    pub booking_date: NaiveDate,
    pub slot: TimeSlot,
    pub status: BookingStatus,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "confirmed" => BookingStatus::Confirmed,
            "completed" => BookingStatus::Completed,
            "cancelled" => BookingStatus::Cancelled,
            _ => BookingStatus::Pending,
        }
    }
}

/// Body of `POST /student/book/:tutor_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookSessionRequest {
    pub student_id: i64,
    pub booking_date: String,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
}

impl BookSessionRequest {
    pub fn new(student_id: i64, date: NaiveDate, slot: TimeSlot) -> Self {
        Self {
            student_id,
            booking_date: date.format(DATE_FORMAT).to_string(),
            start_time: slot.start(),
            end_time: slot.end(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingCreated {
    pub success: bool,
    pub booking_id: i64,
    pub price: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub id: i64,
    pub booking_id: i64,
    pub amount: f64,
    pub currency: String,
    pub status: PaymentStatus,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
    Refunded,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Completed => "completed",
            PaymentStatus::Failed => "failed",
            PaymentStatus::Refunded => "refunded",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "completed" => PaymentStatus::Completed,
            "failed" => PaymentStatus::Failed,
            "refunded" => PaymentStatus::Refunded,
            _ => PaymentStatus::Pending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trips_through_db_text() {
        for status in [
            BookingStatus::Pending,
            BookingStatus::Confirmed,
            BookingStatus::Completed,
            BookingStatus::Cancelled,
        ] {
            assert_eq!(BookingStatus::parse(status.as_str()), status);
        }
        assert_eq!(BookingStatus::parse("bogus"), BookingStatus::Pending);
    }

    #[test]
    fn test_book_request_wire_format() {
        let slot = TimeSlot::new("09:00".parse().unwrap(), "10:30".parse().unwrap()).unwrap();
        let req = BookSessionRequest::new(5, NaiveDate::from_ymd_opt(2025, 6, 16).unwrap(), slot);
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            serde_json::json!({
                "student_id": 5,
                "booking_date": "2025-06-16",
                "start_time": "09:00",
                "end_time": "10:30"
            })
        );
    }

    #[test]
    fn test_payment_status_unknown_is_pending() {
        assert_eq!(PaymentStatus::parse("refunded"), PaymentStatus::Refunded);
        assert_eq!(PaymentStatus::parse(""), PaymentStatus::Pending);
    }
}
