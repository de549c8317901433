use chrono::NaiveDate;
use rusqlite::Connection;

use crate::db::queries;
use crate::models::availability::day_of_week;
use crate::models::{BookingStatus, TimeSlot};

/// Free slots for a tutor on a date: the weekday's enabled windows minus any
/// window overlapping a confirmed booking, ordered by start.
pub fn available_slots(
    conn: &Connection,
    tutor_id: i64,
    date: NaiveDate,
) -> anyhow::Result<Vec<TimeSlot>> {
    let windows = queries::get_availability_for_day(conn, tutor_id, day_of_week(date))?;
    let booked: Vec<TimeSlot> =
        queries::get_bookings_on_date(conn, tutor_id, date, BookingStatus::Confirmed)?
            .into_iter()
            .map(|b| b.slot)
            .collect();

    let slots = windows
        .into_iter()
        .filter(|w| w.applies_to(date))
        .map(|w| w.slot)
        .filter(|slot| !booked.iter().any(|b| slot.overlaps(b)))
        .collect();

    Ok(slots)
}
