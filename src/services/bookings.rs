use chrono::NaiveDate;
use rusqlite::Connection;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::availability::day_of_week;
use crate::models::{BookingStatus, PaymentStatus, TimeSlot};
use crate::services::pricing;

/// Books `slot` with a tutor as a pending session. The slot must sit inside
/// one of the tutor's windows for that weekday and must not overlap a
/// confirmed booking. Returns the new booking id and its price.
pub fn book_session(
    conn: &Connection,
    tutor_id: i64,
    student_id: i64,
    date: NaiveDate,
    slot: TimeSlot,
) -> Result<(i64, f64), AppError> {
    let tutor = queries::get_tutor(conn, tutor_id)?
        .ok_or_else(|| AppError::NotFound("tutor not found".to_string()))?;

    let windows = queries::get_availability_for_day(conn, tutor_id, day_of_week(date))?;
    if !windows.iter().any(|w| w.slot.contains(&slot)) {
        return Err(AppError::Conflict("This time slot is not available".to_string()));
    }

    let tx = conn.unchecked_transaction()?;
    let confirmed = queries::get_bookings_on_date(&tx, tutor_id, date, BookingStatus::Confirmed)?;
    if confirmed.iter().any(|b| b.slot.overlaps(&slot)) {
        return Err(AppError::Conflict(
            "This time slot has already been booked".to_string(),
        ));
    }
    let booking_id =
        queries::create_booking(&tx, student_id, tutor_id, date, &slot, BookingStatus::Pending)?;
    tx.commit()?;

    let price = pricing::session_price(tutor.hourly_rate, slot.start(), slot.end());
    tracing::info!(booking_id, tutor_id, student_id, %date, price, "session booked");
    Ok((booking_id, price))
}

pub fn complete_booking(conn: &Connection, booking_id: i64) -> Result<(), AppError> {
    ensure_exists(conn, booking_id)?;
    queries::update_booking_status(conn, booking_id, BookingStatus::Completed)?;
    tracing::info!(booking_id, "booking marked completed");
    Ok(())
}

/// Cancels the booking and refunds its payment if it was already taken.
pub fn cancel_booking(conn: &Connection, booking_id: i64) -> Result<(), AppError> {
    ensure_exists(conn, booking_id)?;

    let tx = conn.unchecked_transaction()?;
    queries::update_booking_status(&tx, booking_id, BookingStatus::Cancelled)?;

    if let Some(payment) = queries::get_payment_for_booking(&tx, booking_id)? {
        if payment.status == PaymentStatus::Completed {
            queries::update_payment_status(&tx, payment.id, PaymentStatus::Refunded)?;
            tracing::info!(booking_id, payment_id = payment.id, "payment refunded");
        }
    }
    tx.commit()?;

    tracing::info!(booking_id, "booking cancelled");
    Ok(())
}

fn ensure_exists(conn: &Connection, booking_id: i64) -> Result<(), AppError> {
    match queries::get_booking_by_id(conn, booking_id)? {
        Some(_) => Ok(()),
        None => Err(AppError::NotFound("booking not found".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use crate::models::TimeSlot;
    use chrono::NaiveDate;

    fn setup() -> (Connection, i64) {
        let conn = db::init_db(":memory:").unwrap();
        let tutor = queries::create_tutor(&conn, "Anna", None).unwrap();
        let booking = queries::create_booking(
            &conn,
            1,
            tutor,
            NaiveDate::from_ymd_opt(2025, 6, 16).unwrap(),
            &TimeSlot::new("09:00".parse().unwrap(), "10:00".parse().unwrap()).unwrap(),
            BookingStatus::Confirmed,
        )
        .unwrap();
        (conn, booking)
    }

    #[test]
    fn test_complete_booking() {
        let (conn, booking) = setup();
        complete_booking(&conn, booking).unwrap();
        let stored = queries::get_booking_by_id(&conn, booking).unwrap().unwrap();
        assert_eq!(stored.status, BookingStatus::Completed);
    }

    #[test]
    fn test_cancel_refunds_completed_payment() {
        let (conn, booking) = setup();
        queries::create_payment(&conn, booking, 25.0, PaymentStatus::Completed).unwrap();

        cancel_booking(&conn, booking).unwrap();

        let stored = queries::get_booking_by_id(&conn, booking).unwrap().unwrap();
        assert_eq!(stored.status, BookingStatus::Cancelled);
        let payment = queries::get_payment_for_booking(&conn, booking).unwrap().unwrap();
        assert_eq!(payment.status, PaymentStatus::Refunded);
    }

    #[test]
    fn test_cancel_leaves_pending_payment_alone() {
        let (conn, booking) = setup();
        queries::create_payment(&conn, booking, 25.0, PaymentStatus::Pending).unwrap();

        cancel_booking(&conn, booking).unwrap();

        let payment = queries::get_payment_for_booking(&conn, booking).unwrap().unwrap();
        assert_eq!(payment.status, PaymentStatus::Pending);
    }

    fn slot(start: &str, end: &str) -> TimeSlot {
        TimeSlot::new(start.parse().unwrap(), end.parse().unwrap()).unwrap()
    }

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 16).unwrap()
    }

    /// Tutor at 30/h with a Monday 09:00-12:00 window and the setup's
    /// confirmed 09:00-10:00 booking.
    fn bookable() -> (Connection, i64) {
        let (conn, booking) = setup();
        let tutor = queries::get_booking_by_id(&conn, booking).unwrap().unwrap().tutor_id;
        conn.execute("UPDATE tutors SET hourly_rate = 30.0 WHERE id = ?1", [tutor])
            .unwrap();
        queries::add_availability(&conn, tutor, 0, &slot("09:00", "12:00")).unwrap();
        (conn, tutor)
    }

    #[test]
    fn test_book_session_creates_pending_booking() {
        let (conn, tutor) = bookable();
        let (id, price) = book_session(&conn, tutor, 7, monday(), slot("10:00", "11:30")).unwrap();
        assert_eq!(price, 45.0);

        let stored = queries::get_booking_by_id(&conn, id).unwrap().unwrap();
        assert_eq!(stored.status, BookingStatus::Pending);
        assert_eq!(stored.student_id, 7);
        assert_eq!(stored.slot, slot("10:00", "11:30"));
    }

    #[test]
    fn test_book_session_outside_window_is_rejected() {
        let (conn, tutor) = bookable();
        let err = book_session(&conn, tutor, 7, monday(), slot("11:30", "12:30")).unwrap_err();
        assert!(matches!(err, AppError::Conflict(ref m) if m == "This time slot is not available"));

        let tuesday = NaiveDate::from_ymd_opt(2025, 6, 17).unwrap();
        assert!(matches!(
            book_session(&conn, tutor, 7, tuesday, slot("10:00", "11:00")),
            Err(AppError::Conflict(_))
        ));
    }

    #[test]
    fn test_book_session_overlapping_confirmed_is_rejected() {
        let (conn, tutor) = bookable();
        let err = book_session(&conn, tutor, 7, monday(), slot("09:30", "10:30")).unwrap_err();
        assert!(
            matches!(err, AppError::Conflict(ref m) if m == "This time slot has already been booked")
        );

        // touching the confirmed session is fine
        assert!(book_session(&conn, tutor, 7, monday(), slot("10:00", "10:15")).is_ok());
    }

    #[test]
    fn test_book_session_unknown_tutor() {
        let (conn, tutor) = bookable();
        assert!(matches!(
            book_session(&conn, tutor + 1, 7, monday(), slot("10:00", "11:00")),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_unknown_booking_is_not_found() {
        let (conn, booking) = setup();
        let err = cancel_booking(&conn, booking + 1).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert!(matches!(
            complete_booking(&conn, booking + 1),
            Err(AppError::NotFound(_))
        ));
    }
}
