use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::TimeSlot;

/// A tutor's recurring weekly availability window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityWindow {
    pub id: i64,
    pub tutor_id: i64,
    /// 0 = Monday, 6 = Sunday.
    pub day_of_week: u8,
    pub slot: TimeSlot,
    pub is_available: bool,
}

impl AvailabilityWindow {
    pub fn applies_to(&self, date: NaiveDate) -> bool {
        self.is_available && self.day_of_week == day_of_week(date)
    }
}

pub fn day_of_week(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_monday() as u8
}
